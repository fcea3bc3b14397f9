//! data::errors — validation and availability failures of the series fetcher.
//!
//! Two families of failure stop the pipeline before any statistics run:
//! - [`ValidationError`]: the requested window is malformed or inverted. It is
//!   raised before any provider is contacted.
//! - [`DataUnavailableError`]: a provider returned nothing usable for the
//!   window, or alignment left no complete rows.
//!
//! [`TableError`] covers structural problems when assembling a
//! [`SeriesTable`](crate::data::table::SeriesTable) from columns.
use chrono::NaiveDate;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;
pub type DataResult<T> = Result<T, DataUnavailableError>;
pub type TableResult<T> = Result<T, TableError>;
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Malformed or inverted date window.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A date string does not parse under the configured format.
    #[error("Date '{value}' does not match the expected format '{format}'.")]
    MalformedDate { value: String, format: String },

    /// The start date is not strictly before the end date.
    #[error("Start date {start} must be before end date {end}.")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// A provider produced no usable observations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataUnavailableError {
    /// The provider answered but the window holds no observations.
    #[error("No observations returned for '{series}' in the requested window.")]
    EmptySeries { series: String },

    /// The provider could not be reached or its payload could not be read.
    #[error("Provider failure for '{series}': {reason}")]
    Provider { series: String, reason: String },

    /// Inner-joining the series left no row with all values present.
    #[error("No complete rows remain after aligning all series on date.")]
    EmptyAfterAlignment,

    /// The aligned table could not be assembled.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Low-level failures of an HTTP provider client, before they are attributed
/// to a named series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Transport failure or non-success HTTP status.
    #[error("Request failed: {0}")]
    Request(String),

    /// The payload could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The provider reported an error in its payload.
    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },

    /// The payload decoded but held no usable observations.
    #[error("No data returned")]
    NoData,
}

impl ProviderError {
    /// Attribute the failure to the series `name`.
    pub fn for_series(self, name: &str) -> DataUnavailableError {
        match self {
            ProviderError::NoData => DataUnavailableError::EmptySeries { series: name.to_string() },
            other => DataUnavailableError::Provider {
                series: name.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

/// Structural problems when building a table from columns.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A column length differs from the date index length.
    #[error("Column '{name}' has {found} values, expected {expected}.")]
    LengthMismatch { name: String, expected: usize, found: usize },

    /// Dates are not strictly increasing at the given position.
    #[error("Dates are not strictly increasing at row {index}.")]
    UnorderedDates { index: usize },

    /// Two columns share a name.
    #[error("Duplicate column name '{name}'.")]
    DuplicateColumn { name: String },

    /// A requested column does not exist.
    #[error("Column '{name}' not found.")]
    MissingColumn { name: String },
}
