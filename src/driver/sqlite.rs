//! SQLite implementation of the [`SqlDriver`] trait.
//!
//! All statements run on tokio-rusqlite's single background thread; one
//! `call` is one driver round trip, which is the batching unit the accessor
//! relies on.

use crate::connection::ConnectionParams;
use crate::driver::{Credentials, QueryOutcome, SqlDriver};
use crate::error::DriverError;
use crate::value::{ParameterSet, Value};
use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, ToSql};
use tracing::debug;

/// SQLite-backed driver over a single tokio-rusqlite connection.
///
/// The target in [`ConnectionParams`] is a filesystem path, or `:memory:`
/// for an in-process database. SQLite has no authentication; credentials
/// are accepted for interface parity and otherwise unused.
pub struct SqliteDriver {
    conn: Option<tokio_rusqlite::Connection>,
    target: String,
}

impl SqliteDriver {
    /// Open a connection to the configured target.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::OpenFailed` if the database cannot be opened.
    pub async fn connect(
        params: &ConnectionParams,
        _credentials: &Credentials,
    ) -> Result<Self, DriverError> {
        let conn = if params.target == ":memory:" {
            tokio_rusqlite::Connection::open_in_memory().await
        } else {
            tokio_rusqlite::Connection::open(&params.target).await
        }
        .map_err(|e| DriverError::OpenFailed {
            target: params.target.clone(),
            message: e.to_string(),
        })?;

        debug!(target = %params.target, "SQLite driver connected");

        Ok(Self {
            conn: Some(conn),
            target: params.target.clone(),
        })
    }

    fn connection(&self) -> Result<&tokio_rusqlite::Connection, DriverError> {
        self.conn.as_ref().ok_or(DriverError::Closed)
    }
}

#[async_trait]
impl SqlDriver for SqliteDriver {
    async fn prepare(&mut self, sql: &str) -> Result<(), DriverError> {
        let sql = sql.to_string();
        self.connection()?
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.prepare(&sql).map(|_| ())
            })
            .await
            .map_err(DriverError::from)
    }

    async fn execute(
        &mut self,
        sql: &str,
        parameters: &[Value],
    ) -> Result<QueryOutcome, DriverError> {
        let sql = sql.to_string();
        let parameters = parameters.to_vec();
        self.connection()?
            .call(move |conn| -> Result<QueryOutcome, rusqlite::Error> {
                let mut stmt = conn.prepare(&sql)?;

                // column_count is 0 for statements with no result set
                if stmt.column_count() == 0 {
                    let count = stmt.execute(params_from_iter(parameters.iter()))?;
                    return Ok(QueryOutcome::row_count(count as u64));
                }

                let columns: Vec<String> =
                    stmt.column_names().iter().map(|c| c.to_string()).collect();

                let mut out = Vec::new();
                let mut rows = stmt.query(params_from_iter(parameters.iter()))?;
                while let Some(row) = rows.next()? {
                    let mut record = Vec::with_capacity(columns.len());
                    for idx in 0..columns.len() {
                        record.push(Value::from(row.get_ref(idx)?));
                    }
                    out.push(record);
                }

                Ok(QueryOutcome::rows(columns, out))
            })
            .await
            .map_err(DriverError::from)
    }

    async fn execute_batch(
        &mut self,
        sql: &str,
        parameter_sets: &[ParameterSet],
    ) -> Result<u64, DriverError> {
        let sql = sql.to_string();
        let parameter_sets = parameter_sets.to_vec();
        self.connection()?
            .call(move |conn| -> Result<u64, rusqlite::Error> {
                let mut stmt = conn.prepare(&sql)?;
                let mut affected = 0u64;
                for set in &parameter_sets {
                    affected += stmt.execute(params_from_iter(set.iter()))? as u64;
                }
                Ok(affected)
            })
            .await
            .map_err(DriverError::from)
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.close().await {
                return match e {
                    // The failed close hands the connection back; keep the
                    // handle so a retry can still observe the outcome.
                    tokio_rusqlite::Error::Close((conn, err)) => {
                        self.conn = Some(conn);
                        Err(DriverError::from(err))
                    }
                    other => Err(DriverError::from(other)),
                };
            }
            debug!(target = %self.target, "SQLite driver closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Ok(ToSqlOutput::Owned(rusqlite::types::Value::Null)),
            Value::Boolean(b) => b.to_sql(),
            Value::Integer(i) => i.to_sql(),
            Value::Float(f) => f.to_sql(),
            Value::Text(s) => s.to_sql(),
            Value::Timestamp(ts) => ts.to_sql(),
        }
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Float(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            // The value union is closed over scalars; BLOB columns are
            // surfaced as (lossy) text rather than rejected mid-row.
            ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
        }
    }
}
