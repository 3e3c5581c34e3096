//! In-memory temporal columns and frames.

use crate::preprocessing::error::{PreprocessingError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// A named column of optional timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct TemporalColumn {
    name: String,
    values: Vec<Option<NaiveDateTime>>,
}

impl TemporalColumn {
    /// Create a column from optional timestamps. `None` marks a missing cell.
    pub fn new(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Create a column of calendar dates, each taken at midnight.
    pub fn from_dates(name: impl Into<String>, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::from_optional_dates(name, dates.into_iter().map(Some))
    }

    /// Create a column of dates where some cells may be missing.
    pub fn from_optional_dates(
        name: impl Into<String>,
        dates: impl IntoIterator<Item = Option<NaiveDate>>,
    ) -> Self {
        let values = dates
            .into_iter()
            .map(|d| d.map(|d| d.and_time(NaiveTime::MIN)))
            .collect();
        Self::new(name, values)
    }

    /// Create a column of timestamps.
    pub fn from_datetimes(
        name: impl Into<String>,
        datetimes: impl IntoIterator<Item = NaiveDateTime>,
    ) -> Self {
        Self::new(name, datetimes.into_iter().map(Some).collect())
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw cell values.
    pub fn values(&self) -> &[Option<NaiveDateTime>] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Extract the calendar year of every row, preserving row order.
    ///
    /// # Errors
    /// [`PreprocessingError::MissingValues`] at the first missing cell.
    pub fn years(&self) -> Result<Vec<i32>> {
        self.values
            .iter()
            .enumerate()
            .map(|(row, value)| {
                value.map(|ts| ts.year()).ok_or_else(|| {
                    PreprocessingError::MissingValues(format!(
                        "column '{}' has no timestamp at row {}",
                        self.name, row
                    ))
                })
            })
            .collect()
    }
}

/// A table of equally long temporal columns.
#[derive(Clone, Debug, PartialEq)]
pub struct TemporalFrame {
    columns: Vec<TemporalColumn>,
    n_rows: usize,
}

impl TemporalFrame {
    /// Create a frame from columns.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidShape`] if the columns differ in length.
    pub fn new(columns: Vec<TemporalColumn>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, TemporalColumn::len);
        if let Some(ragged) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} rows in every column", n_rows),
                got: format!("{} rows in column '{}'", ragged.len(), ragged.name()),
            });
        }
        Ok(Self { columns, n_rows })
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&TemporalColumn> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[TemporalColumn] {
        &self.columns
    }

    /// Borrow the only column of the frame.
    ///
    /// # Errors
    /// [`PreprocessingError::InvalidShape`] unless the frame has exactly one column.
    pub fn single_column(&self) -> Result<&TemporalColumn> {
        match self.columns.as_slice() {
            [column] => Ok(column),
            columns => Err(PreprocessingError::InvalidShape {
                expected: "exactly one column".to_string(),
                got: format!("{} columns", columns.len()),
            }),
        }
    }
}

impl From<TemporalColumn> for TemporalFrame {
    fn from(column: TemporalColumn) -> Self {
        Self {
            n_rows: column.len(),
            columns: vec![column],
        }
    }
}
