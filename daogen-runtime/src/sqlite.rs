//! SQLite backend over an sqlx pool.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::SecondsFormat;
use futures_util::TryStreamExt;
use serde_json::{Number, Value};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, Sqlite, SqlitePool, TypeInfo, ValueRef};

use crate::error::{DaoError, DaoResult};
use crate::executor::PooledQueryExecutor;
use crate::json::JsonObject;
use crate::lifecycle::{BackendConnection, ConnectionProvider};
use crate::query::Statement;
use crate::value::SqlValue;

/// Hands out pooled SQLite connections.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `url`, e.g. `sqlite::memory:` or `sqlite:app.db?mode=rwc`.
    pub async fn connect(url: &str) -> DaoResult<Self> {
        let pool = SqlitePoolOptions::new()
            .connect(url)
            .await
            .map_err(|e| DaoError::connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// A private in-memory database.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> DaoResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| DaoError::connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wrap this provider in an executor.
    pub fn into_executor(self) -> PooledQueryExecutor<Self> {
        PooledQueryExecutor::new(self)
    }
}

/// A pooled connection, returned to the pool on release.
pub struct PooledSqlite(PoolConnection<Sqlite>);

impl ConnectionProvider for SqliteProvider {
    type Connection = PooledSqlite;

    async fn acquire(&self) -> DaoResult<PooledSqlite> {
        self.pool
            .acquire()
            .await
            .map(PooledSqlite)
            .map_err(|e| DaoError::connection(e.to_string()))
    }

    fn release(&self, connection: PooledSqlite) {
        drop(connection);
    }
}

impl BackendConnection for PooledSqlite {
    async fn execute(&mut self, statement: &Statement) -> DaoResult<u64> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = bind_param(query, param);
        }
        let result = query.execute(&mut *self.0).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(&mut self, statement: &Statement) -> DaoResult<Vec<JsonObject>> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = bind_param(query, param);
        }
        let mut rows = query.fetch(&mut *self.0);
        let mut objects = Vec::new();
        while let Some(row) = rows.try_next().await? {
            objects.push(row_to_json(&row)?);
        }
        Ok(objects)
    }
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    param: &'q SqlValue,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match param {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::Int(v) => query.bind(*v),
        SqlValue::Real(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.as_str()),
        SqlValue::Blob(v) => query.bind(v.as_slice()),
        SqlValue::Timestamp(v) => query.bind(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        // SQLite has no JSON type, store as text
        SqlValue::Json(v) => query.bind(v.to_string()),
    }
}

/// Decode a row by the storage class of each value.
fn row_to_json(row: &SqliteRow) -> DaoResult<JsonObject> {
    let mut object = JsonObject::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let storage = raw.type_info().name().to_ascii_uppercase();
            match storage.as_str() {
                "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => {
                    Value::from(row.try_get_unchecked::<i64, _>(idx)?)
                }
                "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => {
                    let v = row.try_get_unchecked::<f64, _>(idx)?;
                    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
                }
                "BLOB" => {
                    let bytes = row.try_get_unchecked::<Vec<u8>, _>(idx)?;
                    Value::String(STANDARD.encode(bytes))
                }
                _ => Value::String(row.try_get_unchecked::<String, _>(idx)?),
            }
        };
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}
