//! Embedded `PostgreSQL` for integration tests (feature `test-utils`).

use std::sync::LazyLock;

use postgresql_embedded::PostgreSQL;
use tokio::runtime::Runtime;

use crate::pool::ConfigAndPool;

/// Shared runtime so setup and teardown can run from synchronous test code.
static SHARED_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("Failed to create tokio runtime for test utilities"));

/// A running embedded `PostgreSQL` instance.
pub struct EmbeddedPostgres {
    pub postgresql: PostgreSQL,
    pub port: u16,
    /// Working configuration with the instance's real host, port and credentials.
    pub config: deadpool_postgres::Config,
}

/// Start an embedded server and create database `dbname` on it.
///
/// # Errors
/// Returns an error if the server cannot be set up or started, the database cannot be created,
/// or a pool built from the resulting config cannot be created.
pub fn setup_postgres_embedded(
    dbname: &str,
) -> Result<EmbeddedPostgres, Box<dyn std::error::Error>> {
    SHARED_RUNTIME.block_on(async {
        let mut postgresql = PostgreSQL::default();
        postgresql.setup().await?;
        postgresql.start().await?;
        postgresql.create_database(dbname).await?;

        let settings = postgresql.settings();
        let port = settings.port;
        let mut config = deadpool_postgres::Config::new();
        config.host = Some(settings.host.clone());
        config.port = Some(port);
        config.user = Some(settings.username.clone());
        config.password = Some(settings.password.clone());
        config.dbname = Some(dbname.to_string());

        ConfigAndPool::new_postgres(config.clone())?;
        tracing::info!(port, dbname, "embedded postgres started");

        Ok::<_, Box<dyn std::error::Error>>(EmbeddedPostgres {
            postgresql,
            port,
            config,
        })
    })
}

/// Stop a previously started embedded `PostgreSQL` instance.
pub fn stop_postgres_embedded(postgres: EmbeddedPostgres) {
    let EmbeddedPostgres { postgresql, .. } = postgres;
    SHARED_RUNTIME.block_on(async move {
        if let Err(e) = postgresql.stop().await {
            tracing::warn!(error = %e, "embedded postgres did not stop cleanly");
        }
    });
}
