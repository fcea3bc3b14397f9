//! data::yahoo — Yahoo Finance chart API client for equity index prices.
//!
//! Queries `v8/finance/chart/{symbol}` at daily interval and returns the
//! adjusted close (falling back to the raw close when Yahoo omits the
//! adjusted series). Rows with missing prices are skipped.
use crate::data::{
    dates::DateRange,
    errors::{ProviderError, ProviderResult},
    table::TimeSeries,
};
use chrono::{DateTime, Days, NaiveDate};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// YahooClient — blocking client for the chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(http: reqwest::blocking::Client) -> Self {
        YahooClient { http, base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Daily adjusted closes of `symbol` over `range` (end inclusive).
    pub fn fetch_adjusted_close(
        &self, symbol: &str, range: &DateRange,
    ) -> ProviderResult<TimeSeries> {
        let url = self.build_url(symbol, range);
        let response = self
            .http
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let body = response.text().map_err(|e| ProviderError::Request(e.to_string()))?;
        let series = parse_chart_response(symbol, &body)?;
        Ok(series.restrict(range))
    }

    fn build_url(&self, symbol: &str, range: &DateRange) -> String {
        let period1 = unix_seconds(range.start());
        // period2 is exclusive on Yahoo's side.
        let period2 =
            unix_seconds(range.end().checked_add_days(Days::new(1)).unwrap_or(range.end()));
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url,
            encode_symbol(symbol),
            period1,
            period2
        )
    }
}

/// Decode a chart payload into a date-indexed close series.
///
/// Errors
/// ------
/// - `ProviderError::Parse` for malformed JSON.
/// - `ProviderError::Api` when the payload carries a chart error.
/// - `ProviderError::NoData` when no row has a price.
pub fn parse_chart_response(symbol: &str, json: &str) -> ProviderResult<TimeSeries> {
    let response: ChartResponse =
        serde_json::from_str(json).map_err(|e| ProviderError::Parse(e.to_string()))?;
    if let Some(error) = response.chart.error {
        return Err(ProviderError::Api { code: error.code, description: error.description });
    }
    let results = response.chart.result.ok_or(ProviderError::NoData)?;
    let data = results.first().ok_or(ProviderError::NoData)?;
    let quote = data.indicators.quote.first().ok_or(ProviderError::NoData)?;
    let adjusted = data.indicators.adjclose.as_ref().and_then(|a| a.first());

    let mut points = Vec::with_capacity(data.timestamp.len());
    for (i, ts) in data.timestamp.iter().enumerate() {
        let price = adjusted
            .and_then(|a| a.adjclose.get(i).copied().flatten())
            .or_else(|| quote.close.get(i).copied().flatten());
        let date = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive());
        if let (Some(date), Some(price)) = (date, price) {
            if price.is_finite() {
                points.push((date, price));
            }
        }
    }
    if points.is_empty() {
        return Err(ProviderError::NoData);
    }
    Ok(TimeSeries::from_pairs(symbol, points))
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp()).unwrap_or(0)
}

/// Percent-encode the characters index tickers use (`^`, `=`).
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E").replace('=', "%3D")
}
