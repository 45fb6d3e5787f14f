use deadpool_sqlite::{Config as DeadpoolSqliteConfig, PoolConfig, Runtime};

use crate::error::StoreError;
use crate::pool::{ConfigAndPool, StorePool};
use crate::types::DatabaseType;

/// Options for configuring a `SQLite` pool.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    /// Upper bound on pooled connections; `None` keeps deadpool's default.
    pub max_size: Option<usize>,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            max_size: None,
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }
}

impl ConfigAndPool {
    /// Build a `SQLite` pool over the database file at `db_path`.
    ///
    /// # Errors
    /// Returns `StoreError::ConnectionError` if pool creation fails, or the backend error if the
    /// first connection cannot be opened.
    pub async fn new_sqlite(db_path: impl Into<String>) -> Result<Self, StoreError> {
        Self::new_sqlite_with_options(SqliteOptions::new(db_path)).await
    }

    /// Build a `SQLite` pool from [`SqliteOptions`], checking one connection out as a smoke test.
    ///
    /// # Errors
    /// See [`ConfigAndPool::new_sqlite`].
    pub async fn new_sqlite_with_options(opts: SqliteOptions) -> Result<Self, StoreError> {
        let mut cfg = DeadpoolSqliteConfig::new(opts.db_path.clone());
        if let Some(max_size) = opts.max_size {
            cfg.pool = Some(PoolConfig::new(max_size));
        }

        let pool = cfg.create_pool(Runtime::Tokio1).map_err(|e| {
            StoreError::ConnectionError(format!("Failed to create SQLite pool: {e}"))
        })?;

        {
            let conn = pool.get().await?;
            // journal_mode answers with a row, so it cannot go through execute_batch
            conn.interact(|conn| conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(())))
                .await??;
        }

        tracing::debug!(db_path = %opts.db_path, "sqlite pool created");

        Ok(ConfigAndPool {
            pool: StorePool::Sqlite(pool),
            db_type: DatabaseType::Sqlite,
        })
    }
}
