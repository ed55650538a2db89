//! # dbharness-rs
//!
//! A test-support data-access crate: a generic parameterized accessor that
//! turns (statement, parameter-sets) pairs into database effects with
//! explicit ordering and batching semantics, plus small text and fixture
//! helpers for integration suites.
//!
//! ## Features
//!
//! - Single-statement execution with positional parameter binding
//! - Batched writes: one statement, many parameter sets, one round trip
//! - Grouped multi-statement writes keyed by statement text
//! - Untyped row projection preserving live result-metadata column order
//! - Fail-soft façade (log and return empty) over a `try_*` result core
//! - Bundled SQLite driver behind a swappable [`SqlDriver`] trait
//!
//! ## Example
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
//!
//! // One statement, many parameter sets, one round trip.
//! accessor
//!     .write_batch(
//!         "INSERT INTO users (ID, NAME) VALUES (?, ?)",
//!         Some(&[
//!             vec![1.into(), "alice".into()],
//!             vec![2.into(), "bob".into()],
//!         ]),
//!     )
//!     .await;
//!
//! let rows = accessor.read("SELECT ID, NAME FROM users ORDER BY ID", None).await;
//! assert_eq!(rows.len(), 2);
//!
//! assert!(accessor.close().await);
//! # }
//! ```

pub mod accessor;
pub mod connection;
pub mod driver;
pub mod error;
pub mod row;
pub mod text;
pub mod util;
pub mod value;
pub mod xlsx;

pub use accessor::DataAccessor;
pub use connection::{ConnectionBuilder, ConnectionParams};
pub use driver::{Credentials, QueryOutcome, SqlDriver, SqliteDriver};
pub use error::{ConnectionError, DbError, DriverError, QueryError};
pub use row::{Row, RowSet};
pub use value::{ParameterSet, Value};
