use deadpool_postgres::Config as PgConfig;
use tokio_postgres::NoTls;

use crate::error::StoreError;
use crate::pool::{ConfigAndPool, StorePool};
use crate::types::DatabaseType;

/// The conventional development database: `lightbnb` on `localhost:5432` as `vagrant`.
///
/// Override individual fields before handing it to [`ConfigAndPool::new_postgres`].
#[must_use]
pub fn lightbnb_pg_config() -> PgConfig {
    let mut cfg = PgConfig::new();
    cfg.host = Some("localhost".to_string());
    cfg.port = Some(5432);
    cfg.dbname = Some("lightbnb".to_string());
    cfg.user = Some("vagrant".to_string());
    cfg.password = Some("123".to_string());
    cfg
}

impl ConfigAndPool {
    /// Build a Postgres pool.
    ///
    /// No connection is opened here; the first statement checks one out.
    ///
    /// # Errors
    /// Returns `StoreError::ConfigError` if required config fields are missing or
    /// `StoreError::ConnectionError` if pool creation fails.
    pub fn new_postgres(pg_config: PgConfig) -> Result<Self, StoreError> {
        let required = [
            ("dbname", pg_config.dbname.is_none()),
            ("host", pg_config.host.is_none()),
            ("port", pg_config.port.is_none()),
            ("user", pg_config.user.is_none()),
            ("password", pg_config.password.is_none()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
            return Err(StoreError::ConfigError(format!("{field} is required")));
        }

        let pg_pool = pg_config
            .create_pool(Some(deadpool_postgres::Runtime::Tokio1), NoTls)
            .map_err(|e| {
                StoreError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
            })?;

        tracing::debug!(
            host = ?pg_config.host,
            dbname = ?pg_config.dbname,
            "postgres pool created"
        );

        Ok(ConfigAndPool {
            pool: StorePool::Postgres(pg_pool),
            db_type: DatabaseType::Postgres,
        })
    }
}
