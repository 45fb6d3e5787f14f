use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use serde_json::Value as JsonValue;

/// Values that can be bound as statement parameters or read back from a row.
///
/// Both backends speak this enum, so the statement builder never has to know which store it is
/// talking to:
/// ```rust
/// use lightbnb_store::prelude::*;
///
/// let params = vec![
///     RowValues::Text("%Vancouver%".into()),
///     RowValues::Int(15_000),
///     RowValues::Float(4.5),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value (dates are widened to midnight)
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// SQLite has no boolean storage class, so `0`/`1` integers are accepted too.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RowValues::Bool(value) => Some(*value),
            RowValues::Int(1) => Some(true),
            RowValues::Int(0) => Some(false),
            _ => None,
        }
    }

    /// Integers widen to `f64`; averages come back as integers from some drivers when every
    /// rating in the group is identical.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
            // Plain "YYYY-MM-DD" (SQLite stores DATE columns as text)
            if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(d.and_time(NaiveTime::MIN));
            }
        }
        None
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_timestamp().map(|dt| dt.date())
    }
}

/// The backing store a pool talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DatabaseType {
    /// `PostgreSQL` database
    #[cfg(feature = "postgres")]
    Postgres,
    /// `SQLite` database
    #[cfg(feature = "sqlite")]
    Sqlite,
}
