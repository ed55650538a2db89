//! Driver abstraction for SQL execution engines.
//!
//! This module defines the [`SqlDriver`] trait that abstracts the underlying
//! execution engine the accessor talks to. The bundled implementation is
//! SQLite ([`SqliteDriver`]); any engine exposing prepare, positional bind,
//! execute, and batch-execute primitives can stand behind the same trait.
//!
//! # Example
//!
//! ```no_run
//! use dbharness_rs::driver::{Credentials, SqlDriver, SqliteDriver};
//! use dbharness_rs::connection::ConnectionBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ConnectionBuilder::new().target(":memory:").build()?;
//! let credentials = Credentials::new(String::new(), String::new());
//! let mut driver = SqliteDriver::connect(&params, &credentials).await?;
//!
//! let outcome = driver.execute("SELECT 1 AS N", &[]).await?;
//! assert!(outcome.is_rows());
//!
//! driver.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod sqlite;

use crate::error::DriverError;
use crate::value::{ParameterSet, Value};
use async_trait::async_trait;

pub use sqlite::SqliteDriver;

/// User credentials for authentication.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password (will be cleared after use)
    pub password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

// Security: Implement Drop to clear password from memory
impl Drop for Credentials {
    fn drop(&mut self) {
        // Clear password bytes (basic security measure)
        // For production, consider using the `zeroize` crate
        self.password.clear();
    }
}

/// Driver trait for SQL statement execution.
///
/// This trait abstracts the underlying execution engine, allowing for
/// different implementations (SQLite, mocks, etc.). Statements are not
/// retained between calls; every operation prepares its own statement.
#[async_trait]
pub trait SqlDriver: Send + Sync {
    /// Prepare a statement without executing it.
    ///
    /// Used to validate that statement text compiles. Nothing runs and no
    /// rows are affected.
    ///
    /// # Errors
    ///
    /// Returns `DriverError` if the statement text is malformed.
    async fn prepare(&mut self, sql: &str) -> Result<(), DriverError>;

    /// Execute a statement with positional parameters.
    ///
    /// Parameters are bound in the order supplied, matching the statement's
    /// placeholders one to one.
    ///
    /// # Returns
    ///
    /// Rows with live column metadata for result-producing statements, or
    /// the affected-row count otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DriverError` if preparation, binding, or execution fails.
    async fn execute(&mut self, sql: &str, parameters: &[Value])
        -> Result<QueryOutcome, DriverError>;

    /// Execute one statement against many parameter sets in a single round trip.
    ///
    /// The statement is prepared once; every parameter set is bound and run
    /// in input order. The first failure aborts the remainder of the batch.
    ///
    /// # Returns
    ///
    /// The total number of rows affected across the batch.
    ///
    /// # Errors
    ///
    /// Returns `DriverError` if preparation, binding, or any execution fails.
    async fn execute_batch(
        &mut self,
        sql: &str,
        parameter_sets: &[ParameterSet],
    ) -> Result<u64, DriverError>;

    /// Close the connection.
    ///
    /// # Errors
    ///
    /// Returns `DriverError` if the underlying close fails.
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Check if the connection is still active.
    fn is_connected(&self) -> bool;
}

/// Result of a statement execution.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Rows from a result-producing statement, with live column metadata
    Rows {
        /// Column labels in result-metadata order
        columns: Vec<String>,
        /// Row values, one `Vec<Value>` per row in iteration order
        rows: Vec<Vec<Value>>,
    },
    /// Affected-row count from a non-result statement
    RowCount {
        /// Number of affected rows
        count: u64,
    },
}

impl QueryOutcome {
    /// Create a rows outcome.
    pub fn rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self::Rows { columns, rows }
    }

    /// Create a row count outcome.
    pub fn row_count(count: u64) -> Self {
        Self::RowCount { count }
    }

    /// Check if this outcome carries rows.
    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows { .. })
    }

    /// Check if this outcome carries a row count.
    pub fn is_row_count(&self) -> bool {
        matches!(self, Self::RowCount { .. })
    }

    /// Get the affected-row count, if this is a row count outcome.
    pub fn affected_rows(&self) -> Option<u64> {
        match self {
            Self::RowCount { count } => Some(*count),
            _ => None,
        }
    }
}
