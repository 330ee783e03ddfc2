//! Scoped connection acquisition.
//!
//! Every operation runs `acquire -> execute -> release` on a connection it
//! owns exclusively. [`ScopedConnection`] releases exactly once: explicitly
//! through [`ScopedConnection::release`], or on drop if the operation never
//! got that far.

use std::future::Future;

use tracing::trace;

use crate::error::{DaoError, DaoResult};
use crate::json::JsonObject;
use crate::query::Statement;

/// A raw connection able to run one statement at a time.
pub trait BackendConnection: Send {
    /// Run a write statement, returning the affected row count.
    fn execute(&mut self, statement: &Statement) -> impl Future<Output = DaoResult<u64>> + Send;

    /// Run a read statement, returning rows in backend order.
    fn fetch_all(
        &mut self,
        statement: &Statement,
    ) -> impl Future<Output = DaoResult<Vec<JsonObject>>> + Send;
}

/// Supplies connections to the lifecycle. Pooling policy belongs to the implementor.
pub trait ConnectionProvider: Send + Sync {
    type Connection: BackendConnection;

    /// Obtain a connection; may suspend while the backend is busy.
    fn acquire(&self) -> impl Future<Output = DaoResult<Self::Connection>> + Send;

    /// Give a connection back. Called exactly once per acquired connection.
    fn release(&self, connection: Self::Connection);
}

/// A connection held for the duration of one operation.
pub struct ScopedConnection<'p, P: ConnectionProvider> {
    provider: &'p P,
    connection: Option<P::Connection>,
}

impl<'p, P: ConnectionProvider> ScopedConnection<'p, P> {
    pub async fn acquire(provider: &'p P) -> DaoResult<Self> {
        let connection = provider.acquire().await?;
        trace!("connection acquired");
        Ok(Self {
            provider,
            connection: Some(connection),
        })
    }

    pub fn connection(&mut self) -> DaoResult<&mut P::Connection> {
        self.connection
            .as_mut()
            .ok_or_else(|| DaoError::connection("connection already released"))
    }

    /// Release now, before the operation's outcome is handed back.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.provider.release(connection);
            trace!("connection released");
        }
    }
}

impl<P: ConnectionProvider> Drop for ScopedConnection<'_, P> {
    fn drop(&mut self) {
        self.release_inner();
    }
}
