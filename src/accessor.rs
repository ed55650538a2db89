//! Generic parameterized data access over a [`SqlDriver`].
//!
//! [`DataAccessor`] is the crate's core component. It turns
//! (statement, parameter-sets) pairs into database effects: single-statement
//! execution, per-statement batched writes, grouped multi-statement writes
//! keyed by statement text, and untyped row projection into ordered
//! [`Row`]s.
//!
//! Two surfaces are exposed. The `try_*` methods return `Result<_, DbError>`
//! and carry the failure kind. The unprefixed methods are a fail-soft façade
//! over them: any failure is logged through `tracing` and swallowed, reads
//! yield an empty [`RowSet`], and only [`DataAccessor::close`] reports an
//! outcome (as a bool). Callers that need to distinguish "no rows" from
//! "query failed" use the `try_*` forms.
//!
//! # Example
//!
//! ```no_run
//! use dbharness_rs::DataAccessor;
//!
//! # async fn example() {
//! let mut accessor = DataAccessor::connect(":memory:", "", "").await;
//!
//! accessor
//!     .write("CREATE TABLE users (ID INTEGER, NAME TEXT)", None)
//!     .await;
//! accessor
//!     .write(
//!         "INSERT INTO users (ID, NAME) VALUES (?, ?)",
//!         Some(&vec![1.into(), "alice".into()]),
//!     )
//!     .await;
//!
//! let rows = accessor.read("SELECT ID, NAME FROM users", None).await;
//! for row in &rows {
//!     println!("{:?}", row.get("NAME"));
//! }
//!
//! assert!(accessor.close().await);
//! # }
//! ```

use crate::connection::ConnectionBuilder;
use crate::driver::{Credentials, QueryOutcome, SqlDriver, SqliteDriver};
use crate::error::{ConnectionError, DbError, QueryError};
use crate::row::{Row, RowSet};
use crate::value::ParameterSet;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// A data accessor bound to at most one driver connection.
///
/// Not designed for concurrent callers: overlapping calls serialize on the
/// driver mutex rather than race, but no fairness or throughput guarantee is
/// made. Each operation awaits to completion before returning.
pub struct DataAccessor {
    driver: Option<Arc<Mutex<dyn SqlDriver>>>,
}

impl DataAccessor {
    /// Connect to the given target with the bundled SQLite driver.
    ///
    /// Never fails: if the connection cannot be established the failure is
    /// logged and the accessor is left disconnected. Every later operation
    /// detects the disconnected state and fails gracefully.
    pub async fn connect(target: &str, username: &str, password: &str) -> Self {
        let params = match ConnectionBuilder::new()
            .target(target)
            .username(username)
            .password(password)
            .build()
        {
            Ok(params) => params,
            Err(e) => {
                error!(target, error = %e, "invalid connection parameters");
                return Self { driver: None };
            }
        };

        let credentials = Credentials::new(username.to_string(), password.to_string());

        match SqliteDriver::connect(&params, &credentials).await {
            Ok(driver) => {
                debug!(target, "accessor connected");
                Self {
                    driver: Some(Arc::new(Mutex::new(driver))),
                }
            }
            Err(e) => {
                error!(target, error = %e, "connection failed");
                Self { driver: None }
            }
        }
    }

    /// Wrap an already-connected driver.
    ///
    /// Used to run the accessor over alternative [`SqlDriver`]
    /// implementations.
    pub fn from_driver(driver: Arc<Mutex<dyn SqlDriver>>) -> Self {
        Self {
            driver: Some(driver),
        }
    }

    fn driver(&self) -> Result<&Arc<Mutex<dyn SqlDriver>>, DbError> {
        self.driver
            .as_ref()
            .ok_or(DbError::Connection(ConnectionError::Disconnected))
    }

    /// Whether the accessor currently holds a live connection.
    pub async fn is_connected(&self) -> bool {
        match &self.driver {
            Some(driver) => driver.lock().await.is_connected(),
            None => false,
        }
    }

    /// Execute a result-producing statement and project every returned row.
    ///
    /// Parameters are bound positionally in the order supplied; `None` means
    /// zero bindings. Column labels and order come from the live result
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the accessor is disconnected, if
    /// preparation/binding/execution fails, or if the statement did not
    /// produce a result set (`QueryError::NoResultSet`).
    pub async fn try_read(
        &self,
        query: &str,
        parameters: Option<&ParameterSet>,
    ) -> Result<RowSet, DbError> {
        let driver = self.driver()?;
        let parameters = parameters.map(|p| p.as_slice()).unwrap_or(&[]);

        let outcome = driver
            .lock()
            .await
            .execute(query, parameters)
            .await
            .map_err(QueryError::from)?;

        match outcome {
            QueryOutcome::Rows { columns, rows } => Ok(rows
                .into_iter()
                .map(|values| columns.iter().cloned().zip(values).collect::<Row>())
                .collect()),
            QueryOutcome::RowCount { .. } => Err(QueryError::NoResultSet.into()),
        }
    }

    /// Fail-soft [`Self::try_read`]: failures are logged and yield an empty
    /// [`RowSet`].
    pub async fn read(&self, query: &str, parameters: Option<&ParameterSet>) -> RowSet {
        match self.try_read(query, parameters).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(query, error = %e, "read failed");
                RowSet::new()
            }
        }
    }

    /// Execute a single statement with positional parameters.
    ///
    /// `None` means zero bindings.
    ///
    /// # Returns
    ///
    /// The number of affected rows (0 for result-producing statements).
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the accessor is disconnected or if
    /// preparation/binding/execution fails.
    pub async fn try_write(
        &self,
        query: &str,
        parameters: Option<&ParameterSet>,
    ) -> Result<u64, DbError> {
        let driver = self.driver()?;
        let parameters = parameters.map(|p| p.as_slice()).unwrap_or(&[]);

        let outcome = driver
            .lock()
            .await
            .execute(query, parameters)
            .await
            .map_err(QueryError::from)?;

        Ok(outcome.affected_rows().unwrap_or(0))
    }

    /// Fail-soft [`Self::try_write`]: failures are logged, not propagated.
    pub async fn write(&self, query: &str, parameters: Option<&ParameterSet>) {
        if let Err(e) = self.try_write(query, parameters).await {
            error!(query, error = %e, "write failed");
        }
    }

    /// Execute one statement against many parameter sets.
    ///
    /// - `None`: single execution of the bare statement, zero bindings.
    /// - `Some(empty)`: the statement is prepared but nothing is enqueued
    ///   and nothing executes. This no-op is meaningful and preserved: it
    ///   validates the statement text without side effects.
    /// - `Some(sets)`: every set is bound and run in input order in one
    ///   driver round trip. The first failure aborts the remainder of the
    ///   batch.
    ///
    /// # Returns
    ///
    /// The total number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the accessor is disconnected or if
    /// preparation/binding/execution fails.
    pub async fn try_write_batch(
        &self,
        query: &str,
        parameter_sets: Option<&[ParameterSet]>,
    ) -> Result<u64, DbError> {
        let driver = self.driver()?;

        match parameter_sets {
            None => {
                let outcome = driver
                    .lock()
                    .await
                    .execute(query, &[])
                    .await
                    .map_err(QueryError::from)?;
                Ok(outcome.affected_rows().unwrap_or(0))
            }
            Some([]) => {
                driver
                    .lock()
                    .await
                    .prepare(query)
                    .await
                    .map_err(QueryError::from)?;
                Ok(0)
            }
            Some(sets) => {
                let affected = driver
                    .lock()
                    .await
                    .execute_batch(query, sets)
                    .await
                    .map_err(QueryError::from)?;
                Ok(affected)
            }
        }
    }

    /// Fail-soft [`Self::try_write_batch`]: failures are logged, not
    /// propagated.
    pub async fn write_batch(&self, query: &str, parameter_sets: Option<&[ParameterSet]>) {
        if let Err(e) = self.try_write_batch(query, parameter_sets).await {
            error!(query, error = %e, "batch write failed");
        }
    }

    /// Execute every (statement, parameter sets) entry as its own batch.
    ///
    /// Batches are independent: one statement's failure does not block
    /// another's, and every entry is attempted. Cross-statement order is
    /// unspecified.
    ///
    /// # Errors
    ///
    /// After all entries have been attempted, returns the first error
    /// encountered, if any.
    pub async fn try_write_grouped(
        &self,
        request: &HashMap<String, Vec<ParameterSet>>,
    ) -> Result<(), DbError> {
        let mut first_error = None;

        for (query, sets) in request {
            if let Err(e) = self.try_write_batch(query, Some(sets)).await {
                error!(query, error = %e, "grouped batch failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Fail-soft [`Self::try_write_grouped`]: per-entry failures are already
    /// logged, and the aggregate error is swallowed.
    pub async fn write_grouped(&self, request: &HashMap<String, Vec<ParameterSet>>) {
        let _ = self.try_write_grouped(request).await;
    }

    /// Close the connection and release the driver handle.
    ///
    /// Idempotent: closing a disconnected accessor is a no-op. On failure
    /// the handle is kept so the outcome is observable on a retry.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::CloseFailed` if the underlying close fails.
    pub async fn try_close(&mut self) -> Result<(), DbError> {
        let Some(driver) = &self.driver else {
            return Ok(());
        };

        driver
            .lock()
            .await
            .close()
            .await
            .map_err(|e| ConnectionError::CloseFailed(e.to_string()))?;

        self.driver = None;
        debug!("accessor closed");
        Ok(())
    }

    /// Fail-soft [`Self::try_close`].
    ///
    /// Returns true when there is no connection to close or the close
    /// succeeds; false only when the underlying close fails.
    pub async fn close(&mut self) -> bool {
        match self.try_close().await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "close failed");
                false
            }
        }
    }
}
