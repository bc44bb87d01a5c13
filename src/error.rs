//! Error types for the phonebook service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors surfaced by the contact service to its callers.
///
/// The HTTP layer maps each variant to a status code: `Validation` to 400,
/// `NotFound` to 404 and `Internal` to 500.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhonebookError {
    /// A request parameter or contact field violated a constraint
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Unexpected failure, usually from the store
    #[error("{0}")]
    Internal(String),
}

impl PhonebookError {
    /// Build a validation error from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Not-found error for a contact id.
    pub fn contact_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Contact",
            id: id.into(),
        }
    }
}

/// Message returned to clients when the store fails; details stay in the logs.
pub const STORE_FAILURE_MESSAGE: &str = "Unexpected error while accessing contacts";

impl From<StoreError> for PhonebookError {
    fn from(_: StoreError) -> Self {
        Self::Internal(STORE_FAILURE_MESSAGE.to_string())
    }
}

/// Errors reported by a contact store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection to the backing database failed or was lost
    #[error("Store connection error: {0}")]
    Connection(String),

    /// A query failed to execute
    #[error("Store query failed: {0}")]
    Query(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Connection(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with PhonebookError
pub type PhonebookResult<T> = Result<T, PhonebookError>;

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
