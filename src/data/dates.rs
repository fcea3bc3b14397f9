//! data::dates — date-window validation and month-end arithmetic.
use crate::data::errors::{ValidationError, ValidationResult};
use chrono::{Datelike, NaiveDate};

/// DateRange — a validated, inclusive `[start, end]` window with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from parsed dates.
    ///
    /// Errors
    /// ------
    /// - `ValidationError::InvertedRange` if `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ValidationResult<Self> {
        if start >= end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// Parse both bounds with a `chrono` format string and validate ordering.
    ///
    /// Parameters
    /// ----------
    /// - `start`, `end`: `&str`
    ///   Raw date strings, e.g. `"2020-01-01"`.
    /// - `format`: `&str`
    ///   `chrono::format` pattern, e.g. `"%Y-%m-%d"`.
    ///
    /// Errors
    /// ------
    /// - `ValidationError::MalformedDate` for the first bound that fails to
    ///   parse.
    /// - `ValidationError::InvertedRange` if the parsed `start >= end`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use macro_timeseries::data::dates::DateRange;
    /// let range = DateRange::parse("2020-01-01", "2024-04-30", "%Y-%m-%d").unwrap();
    /// assert!(range.start() < range.end());
    /// assert!(DateRange::parse("2024-04-30", "2020-01-01", "%Y-%m-%d").is_err());
    /// ```
    pub fn parse(start: &str, end: &str, format: &str) -> ValidationResult<Self> {
        let start = parse_date(start, format)?;
        let end = parse_date(end, format)?;
        DateRange::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive membership test.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parse one date under `format`, mapping failures to `MalformedDate`.
pub fn parse_date(value: &str, format: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|_| ValidationError::MalformedDate {
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) =
        if date.month() == 12 { (date.year() + 1, 1) } else { (date.year(), date.month() + 1) };
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.pred_opt()).unwrap_or(date)
}

/// `true` when `next` falls in the calendar month right after `prev`.
pub fn is_next_month(prev: NaiveDate, next: NaiveDate) -> bool {
    let prev_index = prev.year() * 12 + prev.month() as i32;
    let next_index = next.year() * 12 + next.month() as i32;
    next_index - prev_index == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a well-ordered window parses and that inverted or equal
    // bounds are rejected.
    //
    // Given
    // -----
    // - ("2020-01-01", "2024-04-30"), the reversed pair, and an equal pair.
    //
    // Expect
    // ------
    // - Ok for the first; `InvertedRange` for the other two.
    fn date_range_parse_enforces_strict_ordering() {
        // Act
        let ok = DateRange::parse("2020-01-01", "2024-04-30", "%Y-%m-%d");
        let inverted = DateRange::parse("2024-04-30", "2020-01-01", "%Y-%m-%d");
        let equal = DateRange::parse("2021-06-01", "2021-06-01", "%Y-%m-%d");

        // Assert
        let range = ok.expect("ordered range should parse");
        assert_eq!(range.start(), ymd(2020, 1, 1));
        assert_eq!(range.end(), ymd(2024, 4, 30));
        assert!(matches!(inverted, Err(ValidationError::InvertedRange { .. })));
        assert!(matches!(equal, Err(ValidationError::InvertedRange { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure strings that do not match the format are reported verbatim.
    //
    // Given
    // -----
    // - "01/02/2020" and "2020-13-01" under "%Y-%m-%d".
    //
    // Expect
    // ------
    // - `MalformedDate` carrying the offending string.
    fn date_range_parse_rejects_malformed_dates() {
        // Act
        let slashed = DateRange::parse("01/02/2020", "2024-04-30", "%Y-%m-%d");
        let bad_month = DateRange::parse("2020-01-01", "2020-13-01", "%Y-%m-%d");

        // Assert
        match slashed {
            Err(ValidationError::MalformedDate { value, .. }) => assert_eq!(value, "01/02/2020"),
            other => panic!("expected MalformedDate, got {other:?}"),
        }
        assert!(matches!(bad_month, Err(ValidationError::MalformedDate { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check month-end arithmetic across February, leap years, and December.
    //
    // Given
    // -----
    // - Mid-month dates in Feb 2024, Feb 2023, and Dec 2021.
    //
    // Expect
    // ------
    // - 2024-02-29, 2023-02-28, and 2021-12-31.
    fn month_end_handles_leap_years_and_december() {
        assert_eq!(month_end(ymd(2024, 2, 10)), ymd(2024, 2, 29));
        assert_eq!(month_end(ymd(2023, 2, 1)), ymd(2023, 2, 28));
        assert_eq!(month_end(ymd(2021, 12, 15)), ymd(2021, 12, 31));
    }

    #[test]
    fn is_next_month_crosses_year_boundary() {
        assert!(is_next_month(ymd(2021, 12, 31), ymd(2022, 1, 31)));
        assert!(!is_next_month(ymd(2021, 11, 30), ymd(2022, 1, 31)));
    }
}
