use deadpool_postgres::Pool;

use super::params::Params;
use super::query::build_result_set;
use crate::error::StoreError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Execute a batch of parameterless SQL statements.
///
/// # Errors
/// Returns pool checkout errors or the first failing statement's error.
pub async fn execute_batch(pool: &Pool, query: &str) -> Result<(), StoreError> {
    let client = pool.get().await?;
    client.batch_execute(query).await?;
    Ok(())
}

/// Execute a row-returning statement with parameters.
///
/// Each call checks out its own client, so concurrent calls never share a connection. The
/// statement goes through the client's prepared-statement cache.
///
/// # Errors
/// Returns pool checkout, preparation, or execution errors from tokio-postgres.
pub async fn execute_select(
    pool: &Pool,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, StoreError> {
    let client = pool.get().await?;
    let stmt = client.prepare_cached(query).await?;
    let converted = Params::convert(params);
    let rows = client.query(&stmt, converted.as_refs()).await?;
    build_result_set(&rows)
}
