use std::sync::Arc;

use deadpool_sqlite::rusqlite;
use rusqlite::Statement;
use rusqlite::types::Value;

use crate::error::StoreError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
/// Returns `StoreError::SqliteError` if the column cannot be read.
pub fn sqlite_extract_value(row: &rusqlite::Row<'_>, idx: usize) -> Result<RowValues, StoreError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a prepared statement and collect every row.
///
/// Column names come from the statement, so an empty result still knows its columns.
///
/// # Errors
/// Returns `StoreError::SqliteError` if binding, stepping or reading a column fails.
pub fn build_result_set(stmt: &mut Statement<'_>, params: &[Value]) -> Result<ResultSet, StoreError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(16);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
    while let Some(row) = rows.next()? {
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(sqlite_extract_value(row, idx)?);
        }
        result_set.add_row_values(row_values)?;
    }

    Ok(result_set)
}
