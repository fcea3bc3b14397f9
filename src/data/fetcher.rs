//! data::fetcher — retrieve, resample, and align the input series.
//!
//! Purpose
//! -------
//! Turn a list of [`SeriesSpec`]s and a validated [`DateRange`] into one
//! month-end-indexed [`SeriesTable`] with no missing values.
//!
//! Key behaviors
//! -------------
//! - Each series is requested once from the [`SeriesSource`].
//! - Raw observations are resampled to month end (last observation).
//! - `SeriesKind::Returns` series are converted to simple returns, which
//!   drops their first month.
//! - All series are inner-joined on date.
//!
//! Invariants & assumptions
//! ------------------------
//! - The caller has already validated the range; this module never
//!   parses date strings.
//! - Any series empty after resampling aborts the build with
//!   `DataUnavailableError::EmptySeries`: alignment needs all of them.
use crate::data::{
    dates::DateRange,
    errors::{DataResult, DataUnavailableError},
    source::{SeriesKind, SeriesRequest, SeriesSource, SeriesSpec},
    table::{SeriesTable, TimeSeries},
};
use tracing::debug;

/// Fetch every series in `specs` over `range` and align them on month end.
///
/// Parameters
/// ----------
/// - `source`: `&dyn SeriesSource`
///   Capability used for retrieval; invoked exactly once per spec.
/// - `range`: `&DateRange`
///   Inclusive sample window.
/// - `specs`: `&[SeriesSpec]`
///   Series to fetch, in output column order.
///
/// Returns
/// -------
/// `DataResult<SeriesTable>`
///   Aligned table whose columns are named by `spec.name`.
///
/// Errors
/// ------
/// - Any error returned by `source`.
/// - `DataUnavailableError::EmptySeries` if a series has no month-end
///   observations inside `range`.
/// - `DataUnavailableError::EmptyAfterAlignment` if the inner join is empty.
pub fn build_table(
    source: &dyn SeriesSource, range: &DateRange, specs: &[SeriesSpec],
) -> DataResult<SeriesTable> {
    let mut monthly: Vec<TimeSeries> = Vec::with_capacity(specs.len());
    for spec in specs {
        let request = SeriesRequest { spec, range: *range };
        let raw = source.fetch(&request)?;
        let series = to_monthly(&raw.restrict(range), spec);
        debug!(series = %spec.name, raw = raw.len(), monthly = series.len(), "fetched series");
        if series.is_empty() {
            return Err(DataUnavailableError::EmptySeries { series: spec.name.clone() });
        }
        monthly.push(series);
    }

    let table = SeriesTable::inner_join(&monthly)?;
    if table.is_empty() {
        return Err(DataUnavailableError::EmptyAfterAlignment);
    }
    Ok(table)
}

fn to_monthly(raw: &TimeSeries, spec: &SeriesSpec) -> TimeSeries {
    let month_end = raw.resample_month_end_last();
    let series = match spec.kind {
        SeriesKind::Level => month_end,
        SeriesKind::Returns => month_end.pct_change(),
    };
    series.with_name(spec.name.clone())
}
