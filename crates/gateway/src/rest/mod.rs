//! REST API endpoints for the gateway

pub mod health;
pub mod members;

use axum::{routing::get, Router};
use roster_runtime::RosterServices;

/// Create all REST API routes
pub fn create_rest_routes(services: RosterServices) -> Router<RosterServices> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(members::create_member_routes(services))
}
