//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Failures reported by the member store
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The unique index on `identifier` rejected a write.
    #[error("Member {0} already exists")]
    Conflict(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl StoreError {
    /// Classify an insert failure, treating a unique-index violation as a conflict on `identifier`.
    pub fn from_insert(err: sqlx::Error, identifier: i64) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(identifier)
            }
            _ => StoreError::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::Conflict(7).to_string(), "Member 7 already exists");
        assert_eq!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Database(sqlx::Error::RowNotFound.to_string())
        );
    }
}
