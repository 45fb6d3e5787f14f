//! Placeholder-safe statement assembly.
//!
//! Every bound value is pushed onto the parameter list in the same call that writes its `$N`
//! marker, so marker `N` always names parameter `N`. The `WHERE` keyword is written once, and only
//! when at least one condition was bound.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::types::RowValues;

/// Accumulates a base statement, AND-ed filter conditions, and trailing clauses.
///
/// ```rust
/// use lightbnb_store::prelude::*;
///
/// let built = StatementBuilder::new("SELECT * FROM properties")
///     .filter("city", "LIKE", RowValues::Text("%Boston%".into()))
///     .tail("ORDER BY cost_per_night")
///     .tail_bind("LIMIT", RowValues::Int(10))
///     .finish();
///
/// assert_eq!(
///     built.sql,
///     "SELECT * FROM properties WHERE city LIKE $1 ORDER BY cost_per_night LIMIT $2"
/// );
/// assert_eq!(built.params.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    base: String,
    conditions: Vec<String>,
    tail: Vec<String>,
    params: Vec<RowValues>,
}

impl StatementBuilder {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            conditions: Vec::new(),
            tail: Vec::new(),
            params: Vec::new(),
        }
    }

    fn bind(&mut self, value: RowValues) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// Add `<column> <op> $N` to the filter, binding `value` as parameter `N`.
    #[must_use]
    pub fn filter(mut self, column: &str, op: &str, value: RowValues) -> Self {
        let placeholder = self.bind(value);
        self.conditions.push(format!("{column} {op} {placeholder}"));
        self
    }

    /// [`StatementBuilder::filter`] when `value` is `Some`, otherwise a no-op.
    ///
    /// An absent criterion is dropped, never compared against `NULL`.
    #[must_use]
    pub fn filter_opt(self, column: &str, op: &str, value: Option<RowValues>) -> Self {
        match value {
            Some(value) => self.filter(column, op, value),
            None => self,
        }
    }

    /// Append a clause with no parameters after the filter.
    #[must_use]
    pub fn tail(mut self, clause: &str) -> Self {
        self.tail.push(clause.to_string());
        self
    }

    /// Append `<clause> $N` after the filter, binding `value` as parameter `N`.
    #[must_use]
    pub fn tail_bind(mut self, clause: &str, value: RowValues) -> Self {
        let placeholder = self.bind(value);
        self.tail.push(format!("{clause} {placeholder}"));
        self
    }

    /// Number of filter conditions bound so far.
    #[must_use]
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub fn finish(self) -> BuiltStatement {
        let mut sql = self.base.trim_end().to_string();
        if !self.conditions.is_empty() {
            let _ = write!(sql, " WHERE {}", self.conditions.join(" AND "));
        }
        for clause in &self.tail {
            sql.push(' ');
            sql.push_str(clause);
        }
        BuiltStatement {
            sql,
            params: self.params,
        }
    }
}

/// A finished statement and the parameters its placeholders refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStatement {
    pub sql: String,
    pub params: Vec<RowValues>,
}

impl BuiltStatement {
    /// A statement with a fixed shape whose parameters are supplied directly.
    #[must_use]
    pub fn fixed(sql: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Placeholder numbers in the order they appear in the text.
    ///
    /// Only numbered `$N` markers are counted; the statements this crate builds never put a `$`
    /// inside a literal.
    #[must_use]
    pub fn placeholder_indices(&self) -> Vec<usize> {
        let bytes = self.sql.as_bytes();
        let mut found = Vec::new();
        let mut idx = 0;
        while idx < bytes.len() {
            if bytes[idx] == b'$' {
                let start = idx + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if let Ok(n) = self.sql[start..end].parse::<usize>() {
                    found.push(n);
                }
                idx = end.max(idx + 1);
            } else {
                idx += 1;
            }
        }
        found
    }

    /// Number of distinct placeholders in the text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_indices()
            .into_iter()
            .collect::<BTreeSet<_>>()
            .len()
    }
}
