use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::types::RowValues;

/// A single row returned by the executor.
///
/// Column names are shared with every other row of the same [`ResultSet`].
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, positionally aligned with `column_names`
    pub rows: Vec<RowValues>,
    column_index: Arc<HashMap<String, usize>>,
}

impl CustomDbRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self {
            column_names,
            rows,
            column_index,
        }
    }

    /// Get the index of a column by name.
    ///
    /// Joins over `table.*` can repeat a column name (`id` in particular); the first occurrence
    /// wins.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    /// Like [`CustomDbRow::get`], but a missing column is an error.
    ///
    /// # Errors
    /// Returns [`StoreError::RowMapping`] if the column is not present.
    pub fn require(&self, column_name: &str) -> Result<&RowValues, StoreError> {
        self.get(column_name)
            .ok_or_else(|| StoreError::RowMapping(format!("missing column `{column_name}`")))
    }
}

fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    index
}

/// The rows produced by one statement, in the order the store returned them.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set.
    ///
    /// # Errors
    /// Returns [`StoreError::ExecutionError`] if no column names were set first or the value count
    /// does not match the column count.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) -> Result<(), StoreError> {
        let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        else {
            return Err(StoreError::ExecutionError(
                "No column names available".to_string(),
            ));
        };
        if column_names.len() != row_values.len() {
            return Err(StoreError::ExecutionError(format!(
                "row has {} values for {} columns",
                row_values.len(),
                column_names.len()
            )));
        }

        self.results.push(CustomDbRow {
            column_names: column_names.clone(),
            rows: row_values,
            column_index: column_index.clone(),
        });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomDbRow> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a CustomDbRow;
    type IntoIter = std::slice::Iter<'a, CustomDbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
