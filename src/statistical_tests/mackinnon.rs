//! statistical_tests::mackinnon — response-surface tables for the ADF test.
//!
//! Purpose
//! -------
//! Map a Dickey–Fuller τ statistic to an approximate p-value and to
//! finite-sample critical values, for a single integrated series (N = 1).
//!
//! Key behaviors
//! -------------
//! - [`mackinnon_p_value`] uses the MacKinnon (1994) polynomial
//!   approximations of the asymptotic distribution, switching between a
//!   small-p and a large-p fit at `τ*`.
//! - [`mackinnon_crit_values`] uses the MacKinnon (2010) finite-sample
//!   response surface `β∞ + β₁/T + β₂/T² + β₃/T³` for 1%, 5%, and 10%.
//!
//! Conventions
//! -----------
//! - Polynomial coefficients are stored in ascending powers of τ.
//! - Small-p coefficients carry the published 1e-2 (degree 2) scaling
//!   already applied.
use crate::statistical_tests::distributions::normal_cdf;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic terms included in the ADF test regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdfRegression {
    /// No constant, no trend ("n").
    NoConstant,
    /// Constant only ("c").
    #[default]
    Constant,
    /// Constant and linear trend ("ct").
    ConstantTrend,
}

impl AdfRegression {
    /// Number of deterministic regressors.
    pub fn n_trend(self) -> usize {
        match self {
            AdfRegression::NoConstant => 0,
            AdfRegression::Constant => 1,
            AdfRegression::ConstantTrend => 2,
        }
    }

    fn index(self) -> usize {
        self.n_trend()
    }
}

impl fmt::Display for AdfRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdfRegression::NoConstant => "n",
            AdfRegression::Constant => "c",
            AdfRegression::ConstantTrend => "ct",
        };
        f.write_str(label)
    }
}

/// Critical values at the 1%, 5%, and 10% levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    pub one: f64,
    pub five: f64,
    pub ten: f64,
}

// Rows: NoConstant, Constant, ConstantTrend.
const TAU_MAX: [f64; 3] = [f64::INFINITY, 2.74, 0.7];
const TAU_MIN: [f64; 3] = [-19.04, -18.83, -16.18];
const TAU_STAR: [f64; 3] = [-1.04, -1.61, -2.89];

const SMALL_P: [[f64; 3]; 3] = [
    [0.6344, 1.2378, 3.2496e-2],
    [2.1659, 1.4412, 3.8269e-2],
    [3.2512, 1.6047, 4.9588e-2],
];

const LARGE_P: [[f64; 4]; 3] = [
    [0.4797, 0.93557, -0.06999, 0.033066],
    [1.7339, 0.93202, -0.12745, -0.010368],
    [2.5261, 0.61654, -0.37956, -0.060285],
];

// [level][β∞, β₁, β₂, β₃] for 1%, 5%, 10%.
const CRIT_2010: [[[f64; 4]; 3]; 3] = [
    [
        [-2.56574, -2.2358, -3.627, 0.0],
        [-1.94100, -0.2686, -3.365, 31.223],
        [-1.61682, 0.2656, -2.714, 25.364],
    ],
    [
        [-3.43035, -6.5393, -16.786, -79.433],
        [-2.86154, -2.8903, -4.234, -40.040],
        [-2.56677, -1.5384, -2.809, 0.0],
    ],
    [
        [-3.95877, -9.0531, -28.428, -134.155],
        [-3.41049, -4.3904, -9.036, -45.374],
        [-3.12705, -2.5856, -3.925, -22.380],
    ],
];

/// Approximate p-value of a Dickey–Fuller τ statistic.
///
/// Parameters
/// ----------
/// - `tau`: `f64`
///   t-ratio of the lagged level coefficient.
/// - `regression`: `AdfRegression`
///   Deterministic terms of the test regression.
///
/// Returns
/// -------
/// `f64` in `[0, 1]`: `1` above `τ_max`, `0` below `τ_min`, otherwise
/// `Φ(poly(τ))` with the small-p or large-p polynomial.
pub fn mackinnon_p_value(tau: f64, regression: AdfRegression) -> f64 {
    let row = regression.index();
    if tau > TAU_MAX[row] {
        return 1.0;
    }
    if tau < TAU_MIN[row] {
        return 0.0;
    }
    let poly = if tau <= TAU_STAR[row] {
        polyval_ascending(&SMALL_P[row], tau)
    } else {
        polyval_ascending(&LARGE_P[row], tau)
    };
    normal_cdf(poly)
}

/// Finite-sample critical values for a regression with `nobs` observations.
pub fn mackinnon_crit_values(nobs: usize, regression: AdfRegression) -> CriticalValues {
    let table = &CRIT_2010[regression.index()];
    let t = nobs as f64;
    let eval = |b: &[f64; 4]| b[0] + b[1] / t + b[2] / (t * t) + b[3] / (t * t * t);
    CriticalValues { one: eval(&table[0]), five: eval(&table[1]), ten: eval(&table[2]) }
}

fn polyval_ascending(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Saturation of the p-value outside [τ_min, τ_max].
    // - Monotonicity of the p-value in τ.
    // - Agreement of critical values with the published asymptotic values.
    // - Consistency between the 5% critical value and a 5% p-value.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that extreme statistics saturate at 0 and 1.
    //
    // Given
    // -----
    // - τ = −25 and τ = 3 for the constant-only regression.
    //
    // Expect
    // ------
    // - p = 0 and p = 1.
    fn p_value_saturates_outside_support() {
        assert_eq!(mackinnon_p_value(-25.0, AdfRegression::Constant), 0.0);
        assert_eq!(mackinnon_p_value(3.0, AdfRegression::Constant), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Check that the p-value is non-decreasing in τ across the small-p /
    // large-p switch.
    //
    // Given
    // -----
    // - A grid of τ from −6 to 2 for each regression type.
    //
    // Expect
    // ------
    // - p(τ) is monotone and within [0, 1].
    fn p_value_is_monotone_in_tau() {
        for reg in
            [AdfRegression::NoConstant, AdfRegression::Constant, AdfRegression::ConstantTrend]
        {
            let mut prev = 0.0;
            for i in 0..=80 {
                let tau = -6.0 + 0.1 * i as f64;
                let p = mackinnon_p_value(tau, reg);
                assert!((0.0..=1.0).contains(&p));
                assert!(p + 1e-3 >= prev, "p not monotone at τ={tau} ({reg}): {p} < {prev}");
                prev = p;
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that critical values converge to the asymptotic β∞ and that
    // the 5% critical value maps to a p-value near 0.05.
    //
    // Given
    // -----
    // - A very large sample and the constant-only regression.
    //
    // Expect
    // ------
    // - crit ≈ (−3.430, −2.862, −2.567); p(crit5) ≈ 0.05.
    fn crit_values_converge_and_match_p_value() {
        // Act
        let cv = mackinnon_crit_values(1_000_000, AdfRegression::Constant);

        // Assert
        assert_relative_eq!(cv.one, -3.43035, epsilon = 1e-4);
        assert_relative_eq!(cv.five, -2.86154, epsilon = 1e-4);
        assert_relative_eq!(cv.ten, -2.56677, epsilon = 1e-4);
        let p5 = mackinnon_p_value(cv.five, AdfRegression::Constant);
        assert!((p5 - 0.05).abs() < 0.01, "p at 5% critical value: {p5}");
        assert!(cv.one < cv.five && cv.five < cv.ten);
    }

    #[test]
    fn crit_values_widen_in_small_samples() {
        let small = mackinnon_crit_values(40, AdfRegression::Constant);
        let large = mackinnon_crit_values(400, AdfRegression::Constant);
        assert!(small.one < large.one);
    }
}
