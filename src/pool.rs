#[cfg(feature = "postgres")]
use deadpool_postgres::Pool as DeadpoolPostgresPool;
#[cfg(feature = "sqlite")]
use deadpool_sqlite::Pool as DeadpoolSqlitePool;

use crate::error::StoreError;
use crate::types::DatabaseType;

#[cfg(feature = "postgres")]
use crate::postgres;
#[cfg(feature = "sqlite")]
use crate::sqlite;

/// Connection pool for one of the supported stores.
#[derive(Clone)]
pub enum StorePool {
    /// `PostgreSQL` connection pool
    #[cfg(feature = "postgres")]
    Postgres(DeadpoolPostgresPool),
    /// `SQLite` connection pool
    #[cfg(feature = "sqlite")]
    Sqlite(DeadpoolSqlitePool),
}

impl std::fmt::Debug for StorePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(pool) => f
                .debug_tuple("Postgres")
                .field(&pool.status())
                .finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(pool) => f.debug_tuple("Sqlite").field(&pool.status()).finish(),
        }
    }
}

/// A configured pool plus the backend it talks to.
///
/// Create one at process start with [`ConfigAndPool::new_postgres`] or
/// [`ConfigAndPool::new_sqlite`], hand it (or an `Arc` of it) to
/// [`LightBnbStore`](crate::store::LightBnbStore), and drop it at shutdown. Cloning is cheap and
/// shares the underlying pool.
#[derive(Clone, Debug)]
pub struct ConfigAndPool {
    /// The connection pool
    pub pool: StorePool,
    /// The database type
    pub db_type: DatabaseType,
}

impl ConfigAndPool {
    /// Run parameterless SQL, possibly several `;`-separated statements.
    ///
    /// Meant for fixtures and test setup; store operations never call it.
    ///
    /// # Errors
    /// Returns pool checkout errors or the backend's error for the first failing statement.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        match &self.pool {
            #[cfg(feature = "postgres")]
            StorePool::Postgres(pool) => postgres::execute_batch(pool, sql).await,
            #[cfg(feature = "sqlite")]
            StorePool::Sqlite(pool) => sqlite::execute_batch(pool, sql).await,
        }
    }

    /// Close the pool. Outstanding connections are dropped as they are returned.
    pub fn close(&self) {
        match &self.pool {
            #[cfg(feature = "postgres")]
            StorePool::Postgres(pool) => pool.close(),
            #[cfg(feature = "sqlite")]
            StorePool::Sqlite(pool) => pool.close(),
        }
    }
}
