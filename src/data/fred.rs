//! data::fred — FRED (St. Louis Fed) client for macro series.
//!
//! Uses the public `fredgraph.csv` export, which needs no API key. The CSV
//! has a header row (`observation_date,<CODE>` or `DATE,<CODE>`) followed by
//! one row per observation; missing observations are written as `"."`.
use crate::data::{
    dates::DateRange,
    errors::{ProviderError, ProviderResult},
    table::TimeSeries,
};
use chrono::NaiveDate;

const DEFAULT_BASE_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

/// FredClient — blocking client for the CSV export.
#[derive(Debug, Clone)]
pub struct FredClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl FredClient {
    pub fn new(http: reqwest::blocking::Client) -> Self {
        FredClient { http, base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Observations of `code` over `range` (both ends inclusive).
    pub fn fetch_series(&self, code: &str, range: &DateRange) -> ProviderResult<TimeSeries> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("id", code.to_string()),
                ("cosd", range.start().format("%Y-%m-%d").to_string()),
                ("coed", range.end().format("%Y-%m-%d").to_string()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let body = response.text().map_err(|e| ProviderError::Request(e.to_string()))?;
        let series = parse_fred_csv(code, &body)?;
        Ok(series.restrict(range))
    }
}

/// Decode a `fredgraph.csv` body.
///
/// Errors
/// ------
/// - `ProviderError::Parse` on malformed rows or dates.
/// - `ProviderError::NoData` when every row is missing.
pub fn parse_fred_csv(code: &str, body: &str) -> ProviderResult<TimeSeries> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(body.as_bytes());
    let mut points = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ProviderError::Parse(e.to_string()))?;
        let (Some(raw_date), Some(raw_value)) = (record.get(0), record.get(1)) else {
            return Err(ProviderError::Parse(format!("expected 2 fields, got {}", record.len())));
        };
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|e| ProviderError::Parse(format!("date '{raw_date}': {e}")))?;
        let raw_value = raw_value.trim();
        if raw_value == "." || raw_value.is_empty() {
            continue;
        }
        let value: f64 = raw_value
            .parse()
            .map_err(|_| ProviderError::Parse(format!("value '{raw_value}' on {date}")))?;
        points.push((date, value));
    }
    if points.is_empty() {
        return Err(ProviderError::NoData);
    }
    Ok(TimeSeries::from_pairs(code, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that FRED CSV exports decode and that "." placeholders are
    // skipped rather than treated as errors.
    //
    // Given
    // -----
    // - A VIXCLS export with one missing day.
    //
    // Expect
    // ------
    // - Two observations with the expected dates and values.
    fn parse_fred_csv_skips_missing_placeholders() {
        // Arrange
        let body = "observation_date,VIXCLS\n2024-01-02,13.20\n2024-01-03,.\n2024-01-04,14.04\n";

        // Act
        let series = parse_fred_csv("VIXCLS", body).unwrap();

        // Assert
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(&NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()), Some(14.04));
    }

    #[test]
    // Purpose
    // -------
    // Ensure empty and malformed exports are reported distinctly.
    //
    // Given
    // -----
    // - A header-only body, an all-missing body, and a row with a bad value.
    //
    // Expect
    // ------
    // - `NoData`, `NoData`, `Parse`.
    fn parse_fred_csv_distinguishes_empty_from_malformed() {
        // Arrange
        let header_only = "DATE,GS10\n";
        let all_missing = "DATE,GS10\n2024-01-01,.\n";
        let malformed = "DATE,GS10\n2024-01-01,abc\n";

        // Act / Assert
        assert_eq!(parse_fred_csv("GS10", header_only), Err(ProviderError::NoData));
        assert_eq!(parse_fred_csv("GS10", all_missing), Err(ProviderError::NoData));
        assert!(matches!(parse_fred_csv("GS10", malformed), Err(ProviderError::Parse(_))));
    }
}
