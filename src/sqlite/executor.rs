use deadpool_sqlite::Pool;

use super::params::Params;
use super::query::build_result_set;
use crate::error::StoreError;
use crate::results::ResultSet;
use crate::translation::to_sqlite_placeholders;
use crate::types::RowValues;

/// Execute a batch of parameterless SQL statements.
///
/// # Errors
/// Returns pool checkout errors or the first failing statement's error.
pub async fn execute_batch(pool: &Pool, query: &str) -> Result<(), StoreError> {
    let sql = query.to_owned();
    let conn = pool.get().await?;
    conn.interact(move |conn| conn.execute_batch(&sql)).await??;
    Ok(())
}

/// Execute a row-returning statement with parameters.
///
/// `$N` placeholders are rewritten to `?N`. `LIKE` is switched to case-sensitive on the
/// connection first so substring filters match the way they do on Postgres.
///
/// # Errors
/// Returns pool checkout, worker, preparation, or execution errors.
pub async fn execute_select(
    pool: &Pool,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, StoreError> {
    let sql = to_sqlite_placeholders(query).into_owned();
    let values = Params::convert(params);
    let conn = pool.get().await?;
    conn.interact(move |conn| {
        conn.execute_batch("PRAGMA case_sensitive_like = ON;")?;
        let mut stmt = conn.prepare_cached(&sql)?;
        build_result_set(&mut stmt, values.as_values())
    })
    .await?
}
