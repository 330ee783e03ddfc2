//! The query execution contract implemented per backend.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::{DaoError, DaoResult};
use crate::json::JsonObject;
use crate::lifecycle::{BackendConnection, ConnectionProvider, ScopedConnection};
use crate::query::Statement;
use crate::traits::Entity;

/// Runs single statements against a backend.
///
/// `find_one_json`, `find_many` and `find_one` have default bodies built on
/// the two required methods, so a backend adapter only supplies those.
pub trait QueryExecutor: Send + Sync {
    /// Run a write statement, returning the affected row count.
    fn execute(&self, statement: Statement) -> impl Future<Output = DaoResult<u64>> + Send;

    /// Run a read statement, returning every row in backend order.
    fn find_many_json(
        &self,
        statement: Statement,
    ) -> impl Future<Output = DaoResult<Vec<JsonObject>>> + Send;

    /// Run a read statement expecting at most one row.
    ///
    /// Zero rows is `None`; more than one row fails with
    /// [`DaoError::TooManyRows`].
    fn find_one_json(
        &self,
        statement: Statement,
    ) -> impl Future<Output = DaoResult<Option<JsonObject>>> + Send {
        async move {
            let mut rows = self.find_many_json(statement).await?;
            match rows.len() {
                0 | 1 => Ok(rows.pop()),
                count => {
                    warn!(count, "single-row query matched more than one row");
                    Err(DaoError::too_many_rows(count))
                }
            }
        }
    }

    fn find_many<E: Entity>(
        &self,
        statement: Statement,
    ) -> impl Future<Output = DaoResult<Vec<E>>> + Send {
        async move {
            let rows = self.find_many_json(statement).await?;
            Ok(rows.iter().map(E::from_row).collect())
        }
    }

    fn find_one<E: Entity>(
        &self,
        statement: Statement,
    ) -> impl Future<Output = DaoResult<Option<E>>> + Send {
        async move {
            let row = self.find_one_json(statement).await?;
            Ok(row.as_ref().map(E::from_row))
        }
    }
}

/// Executes every statement on its own connection from a provider.
#[derive(Debug, Clone)]
pub struct PooledQueryExecutor<P> {
    provider: P,
}

impl<P: ConnectionProvider> PooledQueryExecutor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: ConnectionProvider> QueryExecutor for PooledQueryExecutor<P> {
    async fn execute(&self, statement: Statement) -> DaoResult<u64> {
        debug!(sql = %statement.sql, params = statement.params.len(), "Executing statement");
        let mut scoped = ScopedConnection::acquire(&self.provider).await?;
        let outcome = match scoped.connection() {
            Ok(connection) => connection.execute(&statement).await,
            Err(e) => Err(e),
        };
        scoped.release();
        outcome
    }

    async fn find_many_json(&self, statement: Statement) -> DaoResult<Vec<JsonObject>> {
        debug!(sql = %statement.sql, params = statement.params.len(), "Executing query");
        let mut scoped = ScopedConnection::acquire(&self.provider).await?;
        let outcome = match scoped.connection() {
            Ok(connection) => connection.fetch_all(&statement).await,
            Err(e) => Err(e),
        };
        scoped.release();
        outcome
    }
}
