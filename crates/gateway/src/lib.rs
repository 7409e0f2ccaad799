//! # Roster Gateway Crate
//!
//! HTTP layer for the member roster. Translates requests into calls on the member services
//! and wraps every outcome in the `{ code, data, message }` envelope.
//!
//! ## Architecture
//!
//! - **REST**: member endpoints with OpenAPI documentation
//! - **Middleware**: bearer authentication, CORS and request logging
//! - **Response**: the envelope and its application codes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_gateway::create_router;
//!
//! let services = RosterServices::initialise(&config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, create_router(services)).await?;
//! ```

pub mod docs;
pub mod error;
pub mod middleware;
pub mod response;
pub mod rest;

pub use docs::ApiDoc;
pub use error::{GatewayError, GatewayResult};
pub use response::ResponseData;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use roster_runtime::RosterServices;
use utoipa::OpenApi;

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the main application router with all routes
pub fn create_router(services: RosterServices) -> Router {
    Router::new()
        .merge(rest::create_rest_routes(services.clone()))
        .route("/api/openapi.json", get(openapi_document))
        .layer(middleware::create_cors_middleware())
        .layer(middleware::create_trace_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(services)
}
