use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::pool::{ConfigAndPool, StorePool};
use crate::results::ResultSet;
use crate::statement::BuiltStatement;
use crate::types::RowValues;

#[cfg(feature = "postgres")]
use crate::postgres;
#[cfg(feature = "sqlite")]
use crate::sqlite;

/// Runs one parameterized statement and hands back its rows.
///
/// Statements are written with `$N` placeholders; implementations translate if their backend
/// needs another dialect. An empty [`ResultSet`] is success. Implementations must not retry or
/// return partial results: any failure is returned as-is.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a statement that yields rows (`SELECT`, or DML with `RETURNING`).
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, StoreError>;

    /// Convenience wrapper for a [`BuiltStatement`].
    async fn run(&self, statement: &BuiltStatement) -> Result<ResultSet, StoreError> {
        self.execute_select(&statement.sql, &statement.params).await
    }
}

#[async_trait]
impl QueryExecutor for ConfigAndPool {
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, StoreError> {
        let result = match &self.pool {
            #[cfg(feature = "postgres")]
            StorePool::Postgres(pool) => postgres::execute_select(pool, query, params).await,
            #[cfg(feature = "sqlite")]
            StorePool::Sqlite(pool) => sqlite::execute_select(pool, query, params).await,
        };
        if let Err(e) = &result {
            tracing::warn!(db_type = ?self.db_type, error = %e, "statement failed");
        }
        result
    }
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Arc<E> {
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, StoreError> {
        (**self).execute_select(query, params).await
    }
}
