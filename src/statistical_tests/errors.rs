//! statistical_tests::errors — shared error type for test statistics.
//!
//! Purpose
//! -------
//! Provide one error enum and result alias for every routine in
//! `statistical_tests` (unit-root, autocorrelation, heteroskedasticity,
//! normality, and stability tests) and their validation helpers.
//!
//! Key behaviors
//! -------------
//! - Define [`TestResult`] and [`TestError`] as the canonical result and
//!   error types for this subtree.
//! - Attach human-readable messages that embed the offending value.
//! - Absorb least-squares failures from auxiliary regressions via
//!   `From<LinalgError>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Test routines validate their inputs (lengths, finiteness, tuning
//!   constants) and return [`TestResult<T>`] instead of panicking.
//! - `TestError` values are small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.
//!   "0 < alpha < 1", "nlags < n") rather than low-level details.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads and that
//!   regression failures convert transparently.
use crate::linalg::LinalgError;
use thiserror::Error;

pub type TestResult<T> = Result<T, TestError>;

/// TestError — error conditions shared by the statistical tests.
///
/// Variants
/// --------
/// - `InsufficientData { len, required }`
///   The series is shorter than the test needs.
/// - `InvalidData(value)`
///   A non-finite element (NaN or ±∞).
/// - `InvalidSignificance(alpha)`
///   A significance level outside `(0, 1)`.
/// - `InvalidLag { lags, nobs }`
///   A lag order that leaves no usable observations.
/// - `DegenerateVariance`
///   The series (or residual vector) has zero variance.
/// - `Regression(LinalgError)`
///   An auxiliary least-squares fit failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TestError {
    //------ Input validation errors ------
    #[error("Need at least {required} observations, got {len}.")]
    InsufficientData { len: usize, required: usize },

    #[error("Invalid data value: {0}. Must be a finite number.")]
    InvalidData(f64),

    #[error("Invalid significance level: {0}. Must satisfy 0 < alpha < 1.")]
    InvalidSignificance(f64),

    #[error("Invalid lag order {lags} for {nobs} observations. Must satisfy nlags < n.")]
    InvalidLag { lags: usize, nobs: usize },

    //------ Computation errors ------
    #[error("Series has zero variance.")]
    DegenerateVariance,

    #[error("Auxiliary regression failed: {0}")]
    Regression(#[from] LinalgError),
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Embedding of payload values into error messages.
    // - Conversion from `LinalgError`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `TestError::InsufficientData` reports both the actual and
    // required lengths.
    //
    // Given
    // -----
    // - `InsufficientData { len: 3, required: 10 }`.
    //
    // Expect
    // ------
    // - The message contains "3" and "10".
    fn test_error_insufficient_data_includes_lengths() {
        // Arrange
        let err = TestError::InsufficientData { len: 3, required: 10 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('3') && msg.contains("10"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that the significance guard embeds the offending alpha.
    //
    // Given
    // -----
    // - `InvalidSignificance(1.5)`.
    //
    // Expect
    // ------
    // - The message contains "1.5".
    fn test_error_invalid_significance_includes_payload() {
        let msg = TestError::InvalidSignificance(1.5).to_string();
        assert!(msg.contains("1.5"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure least-squares failures convert via `?`.
    //
    // Given
    // -----
    // - A `LinalgError::RankDeficient`.
    //
    // Expect
    // ------
    // - `TestError::Regression` wrapping the same value.
    fn test_error_from_linalg_error_wraps_value() {
        // Arrange
        let inner = LinalgError::RankDeficient { rank: 1, cols: 2 };

        // Act
        let err: TestError = inner.clone().into();

        // Assert
        assert_eq!(err, TestError::Regression(inner));
    }
}
