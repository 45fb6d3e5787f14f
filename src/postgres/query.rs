use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use tokio_postgres::Row;
use tokio_postgres::types::Type;

use crate::error::StoreError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Build a result set from rows returned by a tokio-postgres client.
///
/// Column names come from the first row; an empty row list yields an empty result set.
///
/// # Errors
/// Returns [`StoreError::PostgresError`] if a column value cannot be decoded.
pub fn build_result_set(rows: &[Row]) -> Result<ResultSet, StoreError> {
    let mut result_set = ResultSet::with_capacity(rows.len());
    let Some(first) = rows.first() else {
        return Ok(result_set);
    };
    let column_names: Vec<String> = first
        .columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();
    let column_count = column_names.len();
    result_set.set_column_names(Arc::new(column_names));

    for row in rows {
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(postgres_extract_value(row, idx)?);
        }
        result_set.add_row_values(row_values)?;
    }

    Ok(result_set)
}

/// Extracts a `RowValues` from a `tokio_postgres` Row at the given index.
///
/// # Errors
/// Returns [`StoreError::RowMapping`] if `idx` is past the last column, or `StoreError` if the
/// column cannot be decoded as its declared type.
pub fn postgres_extract_value(row: &Row, idx: usize) -> Result<RowValues, StoreError> {
    let ty = row
        .columns()
        .get(idx)
        .ok_or_else(|| {
            StoreError::RowMapping(format!(
                "column index {idx} out of range for a row of {} columns",
                row.len()
            ))
        })?
        .type_();

    let value = match *ty {
        Type::INT2 => row
            .try_get::<_, Option<i16>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Int(i64::from(v))),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(idx)?
            .map_or(RowValues::Null, RowValues::Int),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Float(f64::from(v))),
        Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(idx)?
            .map_or(RowValues::Null, RowValues::Float),
        Type::BOOL => row
            .try_get::<_, Option<bool>>(idx)?
            .map_or(RowValues::Null, RowValues::Bool),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map_or(RowValues::Null, RowValues::Timestamp),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?
            .map_or(RowValues::Null, |v| RowValues::Timestamp(v.naive_utc())),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .map_or(RowValues::Null, |d| {
                RowValues::Timestamp(d.and_time(NaiveTime::MIN))
            }),
        Type::JSON | Type::JSONB => row
            .try_get::<_, Option<Value>>(idx)?
            .map_or(RowValues::Null, RowValues::JSON),
        Type::BYTEA => row
            .try_get::<_, Option<Vec<u8>>>(idx)?
            .map_or(RowValues::Null, RowValues::Blob),
        // text, varchar, bpchar, name; anything else must at least decode as a string
        _ => row
            .try_get::<_, Option<String>>(idx)?
            .map_or(RowValues::Null, RowValues::Text),
    };
    Ok(value)
}
