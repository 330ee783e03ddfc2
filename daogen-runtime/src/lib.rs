//! Runtime support for DAOs generated by daogen.
//!
//! Generated code depends on three pieces:
//!
//! - [`QueryExecutor`] runs single statements: writes, multi-row reads and
//!   at-most-one-row reads with a cardinality check.
//! - [`ScopedConnection`] gives every operation its own connection and
//!   releases it exactly once, before the outcome reaches the caller.
//! - [`Dao`] builds CRUD statements for any [`Entity`].
//!
//! [`SqliteProvider`] plugs an sqlx SQLite pool into the executor.

mod dao;
mod error;
mod executor;
pub mod json;
mod key;
mod lifecycle;
mod query;
mod sqlite;
mod traits;
mod value;

pub use chrono;
pub use dao::Dao;
pub use error::{DaoError, DaoResult};
pub use executor::{PooledQueryExecutor, QueryExecutor};
pub use json::{JsonArray, JsonObject, Timestamp};
pub use key::{KeyValues, RecordKey};
pub use lifecycle::{BackendConnection, ConnectionProvider, ScopedConnection};
pub use query::{Condition, Statement, TableMeta, quote_ident};
pub use sqlite::{PooledSqlite, SqliteProvider};
pub use traits::{Entity, EnumLiteral, Identifiable, JsonConvertible};
pub use value::SqlValue;
