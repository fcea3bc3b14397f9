//! statistical_tests::durbin_watson — first-order residual autocorrelation.
use crate::statistical_tests::{
    errors::{TestError, TestResult},
    validation::validate_series,
};

/// Durbin–Watson statistic `Σ(e_t − e_{t−1})² / Σe_t²`.
///
/// Values near 2 indicate no first-order autocorrelation; values toward 0
/// (4) indicate positive (negative) autocorrelation.
///
/// Errors
/// ------
/// - `TestError::InsufficientData` for fewer than 2 residuals.
/// - `TestError::InvalidData` for non-finite residuals.
/// - `TestError::DegenerateVariance` when all residuals are zero.
pub fn durbin_watson(resid: &[f64]) -> TestResult<f64> {
    validate_series(resid, 2)?;
    let ssr: f64 = resid.iter().map(|e| e * e).sum();
    if ssr <= 0.0 {
        return Err(TestError::DegenerateVariance);
    }
    let diff_ss: f64 = resid.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    Ok(diff_ss / ssr)
}
