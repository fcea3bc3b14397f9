//! data::table — date-indexed series and the aligned analysis table.
//!
//! Purpose
//! -------
//! Hold raw provider observations as [`TimeSeries`] and the merged,
//! month-end-aligned analysis sample as [`SeriesTable`].
//!
//! Key behaviors
//! -------------
//! - Resample an irregular (daily or first-of-month) series to month-end
//!   frequency by keeping the last observation of each calendar month.
//! - Derive simple returns from month-end levels.
//! - Inner-join any number of series on date, dropping every row in which
//!   any series is missing or non-finite.
//!
//! Invariants & assumptions
//! ------------------------
//! - `SeriesTable` dates are strictly increasing and every column has one
//!   finite value per date after [`SeriesTable::inner_join`].
//! - Column names are unique within a table.
//!
//! Conventions
//! -----------
//! - Month-end dates are calendar month ends (not business-day ends).
//! - Columns are stored as `ndarray::Array1<f64>` so that downstream
//!   statistics can borrow them as views without copying.
use crate::data::{
    dates::{is_next_month, month_end, DateRange},
    errors::{TableError, TableResult},
};
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};
use std::collections::BTreeMap;

/// TimeSeries — a named, date-ordered sequence of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    points: BTreeMap<NaiveDate, f64>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: BTreeMap<NaiveDate, f64>) -> Self {
        TimeSeries { name: name.into(), points }
    }

    /// Build from `(date, value)` pairs; later duplicates overwrite earlier ones.
    pub fn from_pairs(
        name: impl Into<String>, pairs: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Self {
        TimeSeries { name: name.into(), points: pairs.into_iter().collect() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.points.get(date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.points.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.keys().copied().collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }

    /// Observations whose date falls inside `range` (inclusive).
    pub fn restrict(&self, range: &DateRange) -> TimeSeries {
        let points = self
            .points
            .range(range.start()..=range.end())
            .map(|(d, v)| (*d, *v))
            .collect();
        TimeSeries { name: self.name.clone(), points }
    }

    /// Last finite observation of each calendar month, keyed by month end.
    pub fn resample_month_end_last(&self) -> TimeSeries {
        let mut points = BTreeMap::new();
        for (date, value) in self.points.iter().filter(|(_, v)| v.is_finite()) {
            // BTreeMap iteration is ordered, so the last write per month wins.
            points.insert(month_end(*date), *value);
        }
        TimeSeries { name: self.name.clone(), points }
    }

    /// Simple returns `x_t / x_{t−1} − 1`; the first observation is dropped
    /// and periods with a zero base are skipped.
    pub fn pct_change(&self) -> TimeSeries {
        let mut points = BTreeMap::new();
        let mut prev: Option<f64> = None;
        for (date, value) in self.points.iter() {
            if let Some(p) = prev {
                if p != 0.0 {
                    points.insert(*date, value / p - 1.0);
                }
            }
            prev = Some(*value);
        }
        TimeSeries { name: self.name.clone(), points }
    }
}

/// SeriesTable — the aligned analysis sample.
///
/// Purpose
/// -------
/// Represent a rectangular, date-indexed table of named numeric columns with
/// no missing values, as consumed by the stationarity, lag-selection, and
/// estimation stages.
///
/// Fields
/// ------
/// - `dates`: strictly increasing row index.
/// - `names`: unique column names, in insertion order.
/// - `columns`: one `Array1<f64>` per name, each of length `dates.len()`.
///
/// Invariants
/// ----------
/// - All columns have the same length as `dates`.
/// - `dates[i] < dates[i + 1]` for all `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    dates: Vec<NaiveDate>,
    names: Vec<String>,
    columns: Vec<Array1<f64>>,
}

impl SeriesTable {
    /// Assemble a table from a date index and named columns.
    ///
    /// Errors
    /// ------
    /// - `TableError::UnorderedDates` if the index is not strictly increasing.
    /// - `TableError::LengthMismatch` if any column length differs.
    /// - `TableError::DuplicateColumn` on repeated names.
    pub fn from_columns(
        dates: Vec<NaiveDate>, columns: Vec<(String, Array1<f64>)>,
    ) -> TableResult<Self> {
        if let Some(index) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(TableError::UnorderedDates { index: index + 1 });
        }
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            if column.len() != dates.len() {
                return Err(TableError::LengthMismatch {
                    name,
                    expected: dates.len(),
                    found: column.len(),
                });
            }
            if names.contains(&name) {
                return Err(TableError::DuplicateColumn { name });
            }
            names.push(name);
            values.push(column);
        }
        Ok(SeriesTable { dates, names, columns: values })
    }

    /// Inner-join `series` on date, keeping only rows where every series has
    /// a finite value. Column order follows the input order.
    pub fn inner_join(series: &[TimeSeries]) -> TableResult<Self> {
        let Some(first) = series.first() else {
            return SeriesTable::from_columns(Vec::new(), Vec::new());
        };
        let dates: Vec<NaiveDate> = first
            .points
            .keys()
            .filter(|date| {
                series.iter().all(|s| s.points.get(date).is_some_and(|v| v.is_finite()))
            })
            .copied()
            .collect();
        let columns = series
            .iter()
            .map(|s| {
                let column: Array1<f64> =
                    dates.iter().map(|d| s.points.get(d).copied().unwrap_or(f64::NAN)).collect();
                (s.name.clone(), column)
            })
            .collect();
        SeriesTable::from_columns(dates, columns)
    }

    pub fn nrows(&self) -> usize {
        self.dates.len()
    }

    pub fn ncols(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.names.iter().position(|n| n == name).map(|i| self.columns[i].view())
    }

    /// Like [`column`](Self::column) but reports a missing name as an error.
    pub fn require(&self, name: &str) -> TableResult<ArrayView1<'_, f64>> {
        self.column(name).ok_or_else(|| TableError::MissingColumn { name: name.to_string() })
    }

    /// `true` when consecutive dates fall in consecutive calendar months.
    pub fn is_monthly_contiguous(&self) -> bool {
        self.dates.windows(2).all(|w| is_next_month(w[0], w[1]))
    }

    /// Keep only rows in which every column is finite.
    pub fn drop_incomplete(&self) -> SeriesTable {
        let keep: Vec<usize> = (0..self.nrows())
            .filter(|&i| self.columns.iter().all(|c| c[i].is_finite()))
            .collect();
        let dates = keep.iter().map(|&i| self.dates[i]).collect();
        let columns =
            self.columns.iter().map(|c| keep.iter().map(|&i| c[i]).collect()).collect();
        SeriesTable { dates, names: self.names.clone(), columns }
    }
}
