//! statistical_tests::jarque_bera — residual normality via skewness and
//! kurtosis.
//!
//! Uses biased (population) central moments, so that for normal data
//! `S ≈ 0` and `K ≈ 3`. The statistic
//!
//! ```text
//! JB = n/6 · (S² + (K − 3)²/4)
//! ```
//!
//! is asymptotically χ²(2) under normality.
use crate::statistical_tests::{
    distributions::chi2_sf,
    errors::{TestError, TestResult},
    validation::validate_series,
};
use serde::Serialize;

/// JarqueBera — statistic, p-value, and the moments it is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JarqueBera {
    pub stat: f64,
    pub p_value: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

impl JarqueBera {
    /// Compute the test on `resid`.
    ///
    /// Errors
    /// ------
    /// - `TestError::InsufficientData` for fewer than 3 observations.
    /// - `TestError::InvalidData` for non-finite values.
    /// - `TestError::DegenerateVariance` for a constant series.
    pub fn jarque_bera(resid: &[f64]) -> TestResult<Self> {
        validate_series(resid, 3)?;
        let n = resid.len() as f64;
        let mean = resid.iter().sum::<f64>() / n;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for &e in resid {
            let d = e - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        m2 /= n;
        m3 /= n;
        m4 /= n;
        if m2 <= 0.0 {
            return Err(TestError::DegenerateVariance);
        }
        let skew = m3 / m2.powf(1.5);
        let kurtosis = m4 / (m2 * m2);
        let stat = n / 6.0 * (skew * skew + (kurtosis - 3.0).powi(2) / 4.0);
        Ok(JarqueBera { stat, p_value: chi2_sf(stat, 2.0), skew, kurtosis })
    }
}
