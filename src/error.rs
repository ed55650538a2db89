//! Error types for dbharness-rs.
//!
//! This module defines domain-specific error types organized by functional area.

use thiserror::Error;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection-related errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Statement preparation, binding, and execution errors
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors related to database connections.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Failed to establish connection to the database
    #[error("Failed to connect to {target}: {message}")]
    ConnectionFailed { target: String, message: String },

    /// No live connection is held by the accessor
    #[error("No live connection")]
    Disconnected,

    /// Connection string parsing error
    #[error("Failed to parse connection string: {0}")]
    ParseError(String),

    /// Invalid connection parameters
    #[error("Invalid connection parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Closing the connection failed
    #[error("Failed to close connection: {0}")]
    CloseFailed(String),
}

/// Errors related to statement execution.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Malformed statement text
    #[error("Failed to prepare statement: {0}")]
    PreparationFailed(String),

    /// Positional parameter binding error (count mismatch, unbindable value)
    #[error("Parameter binding error: {0}")]
    BindingFailed(String),

    /// Statement execution failed (constraint violation, engine error)
    #[error("Statement execution failed: {0}")]
    ExecutionFailed(String),

    /// The statement did not produce a result set
    #[error("Statement did not produce a result set")]
    NoResultSet,
}

/// Errors surfaced by a [`crate::driver::SqlDriver`] implementation.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Could not open the underlying database
    #[error("Failed to open database '{target}': {message}")]
    OpenFailed { target: String, message: String },

    /// Positional parameter count does not match the statement's placeholders
    #[error("Invalid parameter count: statement expects {expected}, got {supplied}")]
    ParameterCount { supplied: usize, expected: usize },

    /// The driver connection has been closed
    #[error("Driver connection is closed")]
    Closed,

    /// Any other engine-reported error
    #[error("Engine error: {0}")]
    Engine(String),
}

// Driver failures map onto the query taxonomy at the accessor boundary:
// a count mismatch is a binding error, everything else an execution error.
impl From<DriverError> for QueryError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::ParameterCount { .. } => QueryError::BindingFailed(err.to_string()),
            other => QueryError::ExecutionFailed(other.to_string()),
        }
    }
}

// Conversions from external error types
impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::InvalidParameterCount(supplied, expected) => {
                DriverError::ParameterCount { supplied, expected }
            }
            other => DriverError::Engine(other.to_string()),
        }
    }
}

impl From<tokio_rusqlite::Error> for DriverError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => DriverError::from(e),
            tokio_rusqlite::Error::ConnectionClosed => DriverError::Closed,
            other => DriverError::Engine(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display() {
        let err = ConnectionError::ConnectionFailed {
            target: ":memory:".to_string(),
            message: "unable to open database file".to_string(),
        };
        assert!(err.to_string().contains(":memory:"));
        assert!(err.to_string().contains("unable to open"));
    }

    #[test]
    fn test_query_error_display() {
        let err = QueryError::PreparationFailed("near \"SELEC\": syntax error".to_string());
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_driver_parameter_count_maps_to_binding_error() {
        let err = DriverError::ParameterCount {
            supplied: 3,
            expected: 2,
        };
        let query_err = QueryError::from(err);
        assert!(matches!(query_err, QueryError::BindingFailed(_)));
        assert!(query_err.to_string().contains("expects 2"));
    }

    #[test]
    fn test_driver_engine_error_maps_to_execution_error() {
        let err = DriverError::Engine("UNIQUE constraint failed".to_string());
        let query_err = QueryError::from(err);
        assert!(matches!(query_err, QueryError::ExecutionFailed(_)));
    }

    #[test]
    fn test_rusqlite_parameter_count_conversion() {
        let err = rusqlite::Error::InvalidParameterCount(1, 2);
        let driver_err = DriverError::from(err);
        assert!(matches!(
            driver_err,
            DriverError::ParameterCount {
                supplied: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_db_error_wraps_transparently() {
        let err = DbError::from(ConnectionError::Disconnected);
        assert_eq!(err.to_string(), "No live connection");
    }
}
