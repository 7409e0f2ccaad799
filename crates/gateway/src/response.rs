//! The JSON envelope every endpoint answers with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application code for a successful call.
pub const CODE_OK: u32 = 200;
/// Application code for a rejected request (bad input, conflict, wrong credentials).
pub const CODE_BAD_REQUEST: u32 = 40001;
/// Application code for a missing, malformed or expired bearer token.
pub const CODE_UNAUTHORIZED: u32 = 40101;
/// Application code for an unexpected server-side failure.
pub const CODE_INTERNAL: u32 = 50000;

pub const MSG_QUERY_OK: &str = "query succeeded";
pub const MSG_NO_RESULTS: &str = "no results";

#[derive(Debug, Serialize)]
pub struct ResponseData<T> {
    pub code: u32,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ResponseData<T> {
    pub fn ok(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: CODE_OK,
            data,
            message: message.into(),
        }
    }
}

impl ResponseData<()> {
    pub fn fail(message: impl Into<String>, code: u32) -> Self {
        Self {
            code,
            data: None,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseData<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
