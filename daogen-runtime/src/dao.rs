//! CRUD helper wrapped by every generated DAO.

use std::marker::PhantomData;

use tracing::debug;

use crate::error::{DaoError, DaoResult};
use crate::executor::QueryExecutor;
use crate::json;
use crate::key::KeyValues;
use crate::query::{Condition, TableMeta};
use crate::traits::Entity;

/// Typed CRUD operations for one entity over an injected executor.
pub struct Dao<E, X> {
    executor: X,
    _entity: PhantomData<fn() -> E>,
}

impl<E, X: Clone> Clone for Dao<E, X> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, X: QueryExecutor> Dao<E, X> {
    pub fn new(executor: X) -> Self {
        Self {
            executor,
            _entity: PhantomData,
        }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    fn table(&self) -> TableMeta {
        E::TABLE
    }

    pub async fn find_by_id(&self, id: E::Id) -> DaoResult<Option<E>> {
        let condition = self.table().key_condition(id.key_values())?;
        self.find_one_by(condition).await
    }

    /// Rows whose key is one of `ids`; no query is issued for an empty list.
    pub async fn find_many_by_ids(&self, ids: Vec<E::Id>) -> DaoResult<Vec<E>> {
        let keys = ids.iter().map(KeyValues::key_values).collect();
        let condition = self.table().keys_condition(keys)?;
        self.find_many_by(condition).await
    }

    pub async fn find_all(&self) -> DaoResult<Vec<E>> {
        self.executor.find_many(self.table().select_all()).await
    }

    /// Rows matching `condition`, in backend order.
    pub async fn find_many_by(&self, condition: Condition) -> DaoResult<Vec<E>> {
        if condition.is_never() {
            debug!(table = self.table().name, "condition matches nothing, skipping query");
            return Ok(Vec::new());
        }
        self.executor.find_many(self.table().select(&condition)).await
    }

    /// The single row matching `condition`.
    ///
    /// Fails with [`DaoError::TooManyRows`] if several rows match.
    pub async fn find_one_by(&self, condition: Condition) -> DaoResult<Option<E>> {
        if condition.is_never() {
            debug!(table = self.table().name, "condition matches nothing, skipping query");
            return Ok(None);
        }
        self.executor.find_one(self.table().select(&condition)).await
    }

    pub async fn exists_by_id(&self, id: E::Id) -> DaoResult<bool> {
        let condition = self.table().key_condition(id.key_values())?;
        Ok(self.count_by(Some(&condition)).await? > 0)
    }

    pub async fn count(&self) -> DaoResult<u64> {
        self.count_by(None).await
    }

    async fn count_by(&self, condition: Option<&Condition>) -> DaoResult<u64> {
        let row = self
            .executor
            .find_one_json(self.table().count(condition))
            .await?;
        row.as_ref()
            .and_then(|r| json::read_i64(r, "count"))
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| DaoError::decode("COUNT(*) returned no integer"))
    }

    pub async fn insert(&self, entity: &E) -> DaoResult<u64> {
        self.executor
            .execute(self.table().insert(entity.values()))
            .await
    }

    /// Insert `entity` and return the key the backend stored.
    ///
    /// Unset key columns are filled in by the backend, so an entity with a
    /// null auto-increment key yields the generated value.
    pub async fn insert_returning_id(&self, entity: &E) -> DaoResult<E::Id> {
        let statement = self.table().insert_returning(entity.values());
        let row = self.executor.find_one_json(statement).await?;
        row.as_ref()
            .and_then(|r| E::from_row(r).id())
            .ok_or_else(|| DaoError::decode("insert returned no key"))
    }

    /// Insert every entity in one statement; no query is issued for an empty slice.
    pub async fn insert_many(&self, entities: &[E]) -> DaoResult<u64> {
        let rows = entities.iter().map(Entity::values).collect();
        match self.table().insert_many(rows) {
            Some(statement) => self.executor.execute(statement).await,
            None => Ok(0),
        }
    }

    /// Update the non-key columns of the row identified by `entity`.
    pub async fn update(&self, entity: &E) -> DaoResult<u64> {
        let id = entity
            .id()
            .ok_or_else(|| DaoError::missing_identity(self.table().name))?;
        let condition = self.table().key_condition(id.key_values())?;
        match self.table().update(entity.values(), &condition) {
            Some(statement) => self.executor.execute(statement).await,
            None => Ok(0),
        }
    }

    pub async fn delete_by_id(&self, id: E::Id) -> DaoResult<u64> {
        let condition = self.table().key_condition(id.key_values())?;
        self.executor
            .execute(self.table().delete(&condition))
            .await
    }

    /// Delete the rows whose key is one of `ids`.
    pub async fn delete_by_ids(&self, ids: Vec<E::Id>) -> DaoResult<u64> {
        let keys = ids.iter().map(KeyValues::key_values).collect();
        let condition = self.table().keys_condition(keys)?;
        self.delete_by(condition).await
    }

    pub async fn delete_by(&self, condition: Condition) -> DaoResult<u64> {
        if condition.is_never() {
            return Ok(0);
        }
        self.executor
            .execute(self.table().delete(&condition))
            .await
    }
}
