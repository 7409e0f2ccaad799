//! Error types for the member directory.

use roster_database::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Message shown to callers for every rejected login, whatever the internal reason.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid identifier or password";

/// Transport-independent failure category shared by all service errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Authentication,
    Token,
    Internal,
}

/// Password hashing could not be performed (bad cost parameters or a hashing failure).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Password hashing failed: {0}")]
pub struct HashingError(pub String);

impl From<argon2::Error> for HashingError {
    fn from(err: argon2::Error) -> Self {
        HashingError(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for HashingError {
    fn from(err: argon2::password_hash::Error) -> Self {
        HashingError(err.to_string())
    }
}

/// Registration failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Member {0} already exists")]
    DuplicateIdentifier(i64),

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error("Store error: {0}")]
    Store(String),
}

impl RegistrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrationError::InvalidField(_) | RegistrationError::PasswordMismatch => {
                ErrorKind::Validation
            }
            RegistrationError::DuplicateIdentifier(_) => ErrorKind::Conflict,
            RegistrationError::Hashing(_) | RegistrationError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(identifier) => RegistrationError::DuplicateIdentifier(identifier),
            StoreError::Database(message) => RegistrationError::Store(message),
        }
    }
}

/// Token signing and verification failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token could not be signed: {0}")]
    Encoding(String),

    #[error("Token secret must not be empty")]
    EmptySecret,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::Encoding(_) | TokenError::EmptySecret => ErrorKind::Internal,
            _ => ErrorKind::Token,
        }
    }
}

/// Login failures.
///
/// `MemberNotFound` and `InvalidCredentials` stay distinct for logs and tests but share
/// [`ErrorKind::Authentication`] and [`INVALID_LOGIN_MESSAGE`] toward callers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("Member not found")]
    MemberNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Store error: {0}")]
    Store(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MemberNotFound | AuthError::InvalidCredentials => ErrorKind::Authentication,
            AuthError::Token(err) => err.kind(),
            AuthError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand to an unauthenticated caller.
    pub fn public_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Authentication => INVALID_LOGIN_MESSAGE,
            _ => "Login is temporarily unavailable",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err.to_string())
    }
}

/// Directory query failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("Invalid page request: {0}")]
    InvalidPage(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl DirectoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::InvalidPage(_) | DirectoryError::InvalidQuery(_) => {
                ErrorKind::Validation
            }
            DirectoryError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        DirectoryError::Store(err.to_string())
    }
}

/// Update and delete failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MembershipError {
    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("No changes supplied")]
    NoChanges,

    #[error("Member {0} not found")]
    MemberNotFound(i64),

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error("Store error: {0}")]
    Store(String),
}

impl MembershipError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MembershipError::InvalidField(_) | MembershipError::NoChanges => ErrorKind::Validation,
            MembershipError::MemberNotFound(_) => ErrorKind::NotFound,
            MembershipError::Hashing(_) | MembershipError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for MembershipError {
    fn from(err: StoreError) -> Self {
        MembershipError::Store(err.to_string())
    }
}

pub type RegistrationResult<T> = Result<T, RegistrationError>;
pub type AuthResult<T> = Result<T, AuthError>;
pub type DirectoryResult<T> = Result<T, DirectoryError>;
pub type MembershipResult<T> = Result<T, MembershipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(RegistrationError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(
            RegistrationError::DuplicateIdentifier(1001).to_string(),
            "Member 1001 already exists"
        );
        assert_eq!(TokenError::Expired.to_string(), "Token has expired");
    }

    #[test]
    fn login_failures_share_public_category() {
        let unknown = AuthError::MemberNotFound;
        let wrong = AuthError::InvalidCredentials;

        assert_ne!(unknown, wrong);
        assert_eq!(unknown.kind(), wrong.kind());
        assert_eq!(unknown.public_message(), wrong.public_message());
        assert_eq!(unknown.public_message(), INVALID_LOGIN_MESSAGE);
    }

    #[test]
    fn store_conflict_becomes_duplicate_identifier() {
        let err = RegistrationError::from(StoreError::Conflict(42));
        assert_eq!(err, RegistrationError::DuplicateIdentifier(42));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = RegistrationError::from(StoreError::Database("disk full".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn error_kinds() {
        assert_eq!(MembershipError::MemberNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(MembershipError::NoChanges.kind(), ErrorKind::Validation);
        assert_eq!(DirectoryError::InvalidPage("zero".into()).kind(), ErrorKind::Validation);
        assert_eq!(TokenError::InvalidSignature.kind(), ErrorKind::Token);
        assert_eq!(AuthError::Token(TokenError::Encoding("x".into())).kind(), ErrorKind::Internal);
    }
}
