//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_members::{
    AuthError, DirectoryError, ErrorKind, MembershipError, RegistrationError, TokenError,
};
use thiserror::Error;

use crate::response::{ResponseData, CODE_BAD_REQUEST, CODE_INTERNAL, CODE_UNAUTHORIZED};

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed or missing request input, rejected before reaching a service.
    #[error("{0}")]
    InvalidRequest(String),

    /// A service declined the request for a reason the caller can act on.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::Rejected(_) => StatusCode::OK,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::Rejected(_) => CODE_BAD_REQUEST,
            GatewayError::Unauthorized(_) => CODE_UNAUTHORIZED,
            GatewayError::InternalError(_) => CODE_INTERNAL,
        }
    }

    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::Validation
            | ErrorKind::Conflict
            | ErrorKind::NotFound
            | ErrorKind::Authentication => GatewayError::Rejected(message),
            ErrorKind::Token => GatewayError::Unauthorized(message),
            ErrorKind::Internal => GatewayError::InternalError(message),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = match &self {
            GatewayError::InternalError(detail) => {
                tracing::error!(%detail, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ResponseData::fail(message, self.code());
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<RegistrationError> for GatewayError {
    fn from(error: RegistrationError) -> Self {
        GatewayError::from_kind(error.kind(), error.to_string())
    }
}

impl From<AuthError> for GatewayError {
    fn from(error: AuthError) -> Self {
        let message = match error.kind() {
            ErrorKind::Authentication => error.public_message().to_string(),
            _ => error.to_string(),
        };
        GatewayError::from_kind(error.kind(), message)
    }
}

impl From<TokenError> for GatewayError {
    fn from(error: TokenError) -> Self {
        GatewayError::from_kind(error.kind(), error.to_string())
    }
}

impl From<DirectoryError> for GatewayError {
    fn from(error: DirectoryError) -> Self {
        GatewayError::from_kind(error.kind(), error.to_string())
    }
}

impl From<MembershipError> for GatewayError {
    fn from(error: MembershipError) -> Self {
        GatewayError::from_kind(error.kind(), error.to_string())
    }
}
