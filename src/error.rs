use thiserror::Error;

#[cfg(feature = "sqlite")]
use deadpool_sqlite::rusqlite;

/// Every failure a store operation can report.
///
/// An empty result is never an error: lookups return `Ok(None)` and searches return an empty
/// `Vec`. Anything that reaches this enum came from configuration, the pool, the backend, or a
/// row that could not be mapped onto a model.
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolErrorPostgres(#[from] deadpool_postgres::PoolError),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    PoolErrorSqlite(#[from] deadpool_sqlite::PoolError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Row mapping error: {0}")]
    RowMapping(String),
}

#[cfg(feature = "sqlite")]
impl From<deadpool_sqlite::InteractError> for StoreError {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        StoreError::ConnectionError(format!("SQLite interact error: {err}"))
    }
}
