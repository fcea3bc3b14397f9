//! data — series retrieval, month-end alignment, and the analysis table.
//!
//! Purpose
//! -------
//! Implement the first stage of the report: validate the requested window,
//! fetch every input series through a [`SeriesSource`], and align them into
//! one month-end [`SeriesTable`] with no missing values.
//!
//! Key behaviors
//! -------------
//! - [`DateRange`] parses and validates the window before any I/O.
//! - [`SeriesSource`] is the narrow capability the rest of the crate sees;
//!   [`MarketDataSource`] is its HTTP implementation (Yahoo + FRED).
//! - [`build_table`] resamples, derives returns, and inner-joins.
//!
//! Invariants & assumptions
//! ------------------------
//! - Table dates are strictly increasing; no cell is missing or non-finite.
//! - A [`ValidationError`] is always raised before a source is invoked.
//!
//! Testing notes
//! -------------
//! - Provider payload decoding is tested on embedded JSON/CSV bodies; no test
//!   touches the network.
//! - [`build_table`] is tested through an in-memory stub source.

pub mod dates;
pub mod errors;
pub mod fetcher;
pub mod fred;
pub mod source;
pub mod table;
pub mod yahoo;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::dates::DateRange;
pub use self::errors::{
    DataResult, DataUnavailableError, ProviderError, TableError, ValidationError, ValidationResult,
};
pub use self::fetcher::build_table;
pub use self::source::{
    MarketDataSource, Provider, SeriesKind, SeriesRequest, SeriesSource, SeriesSpec,
};
pub use self::table::{SeriesTable, TimeSeries};
