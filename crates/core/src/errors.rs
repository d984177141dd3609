//! Core error types for Rightsbook.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the domain.
///
/// Every variant terminates the single call that raised it. None of them
/// leaves a partially applied batch behind.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied a value the domain cannot accept (non-positive
    /// quantity, zero delta, malformed announcement, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown security: {0}")]
    UnknownSecurity(String),

    #[error("Insufficient rights for {symbol}: requested {requested}, available {available}")]
    InsufficientRights {
        symbol: String,
        requested: i64,
        available: i64,
    },

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// True for failures raised by the event log adapter rather than by a
    /// domain rule.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Error::Database(_))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate event id).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::InvalidArgument(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_rights_message_carries_amounts() {
        let err = Error::InsufficientRights {
            symbol: "FOOLAD_X".to_string(),
            requested: 121,
            available: 120,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient rights for FOOLAD_X: requested 121, available 120"
        );
        assert!(!err.is_persistence_failure());
    }

    #[test]
    fn test_database_error_is_persistence_failure() {
        let err: Error = DatabaseError::QueryFailed("disk I/O error".to_string()).into();
        assert!(err.is_persistence_failure());
    }
}
