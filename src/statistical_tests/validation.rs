//! statistical_tests::validation — shared input guards for test statistics.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the test routines in this subtree,
//! so that length, finiteness, and tuning-constant checks are written once.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions before any regression or moment is
//!   computed.
//! - Map invalid inputs into structured [`TestError`] values.
//!
//! Conventions
//! -----------
//! - Pure validation: no I/O and no allocation beyond error construction.
//! - Callers layer test-specific checks (e.g. lag bounds) on top.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and a success path.
use crate::statistical_tests::errors::{TestError, TestResult};

/// Validate that `data` holds at least `min_len` finite observations.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Input series (raw observations or residuals).
/// - `min_len`: `usize`
///   Minimum length the calling test needs.
///
/// Errors
/// ------
/// - `TestError::InsufficientData` when `data.len() < min_len`.
/// - `TestError::InvalidData(value)` for the first non-finite element.
///
/// Examples
/// --------
/// ```rust
/// # use macro_timeseries::statistical_tests::validation::validate_series;
/// # use macro_timeseries::statistical_tests::errors::TestError;
/// let data = vec![0.1_f64, -0.2, 0.3];
/// assert!(validate_series(&data, 3).is_ok());
/// assert_eq!(
///     validate_series(&data, 4),
///     Err(TestError::InsufficientData { len: 3, required: 4 })
/// );
/// ```
pub fn validate_series(data: &[f64], min_len: usize) -> TestResult<()> {
    if data.len() < min_len {
        return Err(TestError::InsufficientData { len: data.len(), required: min_len });
    }

    for &value in data {
        if !value.is_finite() {
            return Err(TestError::InvalidData(value));
        }
    }

    Ok(())
}

/// Validate a significance level `alpha ∈ (0, 1)`.
pub fn validate_significance(alpha: f64) -> TestResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(TestError::InvalidSignificance(alpha));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful validation of well-formed inputs.
    // - Each error branch of `validate_series` and `validate_significance`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `validate_series` succeeds on a finite series of
    // sufficient length.
    //
    // Given
    // -----
    // - A finite series of length 3 and `min_len = 2`.
    //
    // Expect
    // ------
    // - `Ok(())`.
    fn validate_series_valid_arguments_succeeds() {
        // Arrange
        let data = vec![0.1_f64, -0.2, 0.3];

        // Act
        let result = validate_series(&data, 2);

        // Assert
        assert!(result.is_ok(), "Expected Ok(()) for valid inputs, got {result:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a short series is rejected with `InsufficientData`.
    //
    // Given
    // -----
    // - A single-element series and `min_len = 2`.
    //
    // Expect
    // ------
    // - `Err(TestError::InsufficientData { len: 1, required: 2 })`.
    fn validate_series_too_short_returns_insufficient_data() {
        // Arrange
        let data = vec![0.1_f64];

        // Act
        let result = validate_series(&data, 2);

        // Assert
        assert_eq!(result, Err(TestError::InsufficientData { len: 1, required: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a non-finite element triggers `InvalidData` with the
    // offending payload.
    //
    // Given
    // -----
    // - A series containing `+∞`.
    //
    // Expect
    // ------
    // - `Err(TestError::InvalidData(v))` with `v` non-finite.
    fn validate_series_non_finite_value_returns_invalid_data() {
        // Arrange
        let data = vec![0.1_f64, f64::INFINITY, 0.3];

        // Act
        let result = validate_series(&data, 2);

        // Assert
        match result {
            Err(TestError::InvalidData(v)) => {
                assert!(!v.is_finite(), "InvalidData payload should be non-finite. Got: {v}");
            }
            other => panic!("expected InvalidData error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check both boundaries and NaN for the significance guard.
    //
    // Given
    // -----
    // - alpha ∈ {0.05, 0.0, 1.0, NaN}.
    //
    // Expect
    // ------
    // - Only 0.05 passes.
    fn validate_significance_rejects_boundaries_and_nan() {
        assert!(validate_significance(0.05).is_ok());
        assert_eq!(validate_significance(0.0), Err(TestError::InvalidSignificance(0.0)));
        assert_eq!(validate_significance(1.0), Err(TestError::InvalidSignificance(1.0)));
        assert!(matches!(validate_significance(f64::NAN), Err(TestError::InvalidSignificance(_))));
    }
}
