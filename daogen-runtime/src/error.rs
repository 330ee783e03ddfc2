//! Error types for DAO operations.
//!
//! Every variant aborts only the operation that produced it. The connection
//! used by that operation has already been released when the error reaches
//! the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaoError {
    /// A single-row query matched more than one row.
    #[error("Found more than one row: {count}")]
    TooManyRows { count: usize },

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// Failure from a non-sqlx backend, propagated unchanged.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),

    #[error("Entity of table '{table}' has unset key columns")]
    MissingIdentity { table: &'static str },

    /// A key did not supply exactly one value per key column.
    #[error("Key for table '{table}' has {actual} values, expected {expected}")]
    KeyArity {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to decode row: {message}")]
    Decode { message: String },
}

pub type DaoResult<T> = Result<T, DaoError>;

impl DaoError {
    pub fn too_many_rows(count: usize) -> Self {
        Self::TooManyRows { count }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn backend(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(error))
    }

    pub fn missing_identity(table: &'static str) -> Self {
        Self::MissingIdentity { table }
    }

    pub fn key_arity(table: &'static str, expected: usize, actual: usize) -> Self {
        Self::KeyArity {
            table,
            expected,
            actual,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this is a cardinality violation.
    pub fn is_too_many_rows(&self) -> bool {
        matches!(self, Self::TooManyRows { .. })
    }
}
