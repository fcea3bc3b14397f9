//! data::source — the "series source" capability and its network-backed
//! implementation.
//!
//! Purpose
//! -------
//! Decouple the statistical core from network retrieval. Everything past
//! [`build_table`](crate::data::fetcher::build_table) only sees a
//! [`SeriesSource`], so tests can substitute fixture series and count
//! invocations.
//!
//! Key behaviors
//! -------------
//! - [`SeriesSpec`] names one input series: its output column, its provider
//!   code, which provider serves it, and whether it enters the table as a
//!   level or as simple returns.
//! - [`MarketDataSource`] dispatches each request to the Yahoo chart API
//!   (equity prices) or FRED (macro series) over blocking HTTP.
//!
//! Conventions
//! -----------
//! - Sources return raw observations at native frequency; month-end
//!   resampling and return derivation happen in the fetcher.
use crate::data::{
    dates::DateRange,
    errors::{DataResult, DataUnavailableError},
    fred::FredClient,
    table::TimeSeries,
    yahoo::YahooClient,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// External data provider serving a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Yahoo Finance chart API (adjusted closes).
    Yahoo,
    /// Federal Reserve Economic Data (St. Louis Fed).
    Fred,
}

/// How a fetched series enters the analysis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Month-end level as observed.
    Level,
    /// Simple return of consecutive month-end levels.
    Returns,
}

/// SeriesSpec — one input series of the pipeline.
///
/// Fields
/// ------
/// - `name`: column name in the aligned table (e.g. `"ndx_ret"`).
/// - `code`: provider symbol (e.g. `"^NDX"`, `"FEDFUNDS"`).
/// - `provider`: which provider serves `code`.
/// - `kind`: level or returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,
    pub code: String,
    pub provider: Provider,
    pub kind: SeriesKind,
}

impl SeriesSpec {
    pub fn new(name: &str, code: &str, provider: Provider, kind: SeriesKind) -> Self {
        SeriesSpec { name: name.to_string(), code: code.to_string(), provider, kind }
    }

    /// The five series of the default report: Nasdaq-100 returns plus the
    /// effective fed funds rate, 10-year Treasury yield, CPI, and VIX.
    pub fn defaults() -> Vec<SeriesSpec> {
        vec![
            SeriesSpec::new("ndx_ret", "^NDX", Provider::Yahoo, SeriesKind::Returns),
            SeriesSpec::new("ffr", "FEDFUNDS", Provider::Fred, SeriesKind::Level),
            SeriesSpec::new("gs10", "GS10", Provider::Fred, SeriesKind::Level),
            SeriesSpec::new("cpi", "CPIAUCSL", Provider::Fred, SeriesKind::Level),
            SeriesSpec::new("vix", "VIXCLS", Provider::Fred, SeriesKind::Level),
        ]
    }
}

/// A single retrieval request handed to a [`SeriesSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest<'a> {
    pub spec: &'a SeriesSpec,
    pub range: DateRange,
}

/// SeriesSource — retrieves one raw date-indexed series.
///
/// Implementations return observations at the provider's native frequency,
/// restricted to (at least) `request.range`, or a
/// [`DataUnavailableError`] when the provider cannot serve the request.
pub trait SeriesSource {
    fn fetch(&self, request: &SeriesRequest<'_>) -> DataResult<TimeSeries>;
}

/// MarketDataSource — blocking HTTP source backed by Yahoo and FRED.
#[derive(Debug, Clone)]
pub struct MarketDataSource {
    yahoo: YahooClient,
    fred: FredClient,
}

impl MarketDataSource {
    /// Build both clients with a shared request timeout.
    pub fn new(timeout: Duration) -> DataResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) macro-report")
            .timeout(timeout)
            .build()
            .map_err(|e| DataUnavailableError::Provider {
                series: "http-client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(MarketDataSource { yahoo: YahooClient::new(http.clone()), fred: FredClient::new(http) })
    }
}

impl SeriesSource for MarketDataSource {
    fn fetch(&self, request: &SeriesRequest<'_>) -> DataResult<TimeSeries> {
        let spec = request.spec;
        let series = match spec.provider {
            Provider::Yahoo => self.yahoo.fetch_adjusted_close(&spec.code, &request.range),
            Provider::Fred => self.fred.fetch_series(&spec.code, &request.range),
        }
        .map_err(|e| e.for_series(&spec.name))?;
        Ok(series.with_name(spec.name.clone()))
    }
}
