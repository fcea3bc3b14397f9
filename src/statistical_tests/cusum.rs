//! statistical_tests::cusum — parameter-stability tests based on cumulative
//! sums of residuals.
//!
//! Purpose
//! -------
//! Provide the two CUSUM constructions used by the report:
//! - [`CusumOls`]: the OLS-residual CUSUM of Ploberger and Krämer, whose
//!   supremum is compared with the Kolmogorov (Brownian-bridge) law. This
//!   produces the logged statistic and p-value.
//! - [`RecursiveCusum`]: the Brown–Durbin–Evans path of cumulated
//!   standardized recursive residuals with its linear significance bounds.
//!   This produces the data for the stability plot.
//!
//! Key behaviors
//! -------------
//! - OLS-residual CUSUM: `B_j = Σ_{t≤j} e_t / √(n·σ̂²)` with
//!   `σ̂² = Σe²/(n − ddof)`; statistic `sup_j |B_j|`.
//! - Recursive residuals `w_t = (y_t − x_t'β̂_{t−1}) / √(1 + x_t'(X_{t−1}'X_{t−1})⁻¹x_t)`
//!   are obtained with rank-one updates of `(X'X)⁻¹` and `β̂`.
//! - Bounds are `±(a√m + 2a·j/√m)`, `j = 0..m−1`, where `m` is the number
//!   of recursive residuals and `a` depends on the significance level.
//!
//! Invariants & assumptions
//! ------------------------
//! - The first recursive residual is computed after the smallest leading
//!   block of observations whose design has full column rank.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the Kolmogorov survival function at known quantiles,
//!   verify recursive residuals against a brute-force refit, and check that
//!   a structural break pushes the path outside its bounds.
use crate::{
    linalg::{least_squares, LinalgError},
    statistical_tests::{
        errors::{TestError, TestResult},
        validation::validate_series,
    },
};
use ndarray::{s, Array1, Array2, ArrayView1};
use serde::Serialize;

/// Asymptotic critical values of `sup|B|` at 1%, 5%, and 10%.
pub const CUSUM_OLS_CRIT: [(u8, f64); 3] = [(1, 1.63), (5, 1.36), (10, 1.22)];

/// CusumOls — OLS-residual CUSUM test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CusumOls {
    pub stat: f64,
    pub p_value: f64,
    pub path: Vec<f64>,
}

impl CusumOls {
    /// Compute the test from OLS residuals.
    ///
    /// Parameters
    /// ----------
    /// - `resid`: `&[f64]`
    ///   Residuals of a regression that includes a constant.
    /// - `ddof`: `usize`
    ///   Degrees of freedom used in the variance estimate (the number of
    ///   regressors including the constant).
    ///
    /// Errors
    /// ------
    /// - `TestError::InsufficientData` unless `n > ddof` and `n ≥ 2`.
    /// - `TestError::DegenerateVariance` for all-zero residuals.
    pub fn cusum_ols(resid: &[f64], ddof: usize) -> TestResult<Self> {
        validate_series(resid, (ddof + 1).max(2))?;
        let n = resid.len() as f64;
        let mut nobs_sigma2: f64 = resid.iter().map(|e| e * e).sum();
        if nobs_sigma2 <= 0.0 {
            return Err(TestError::DegenerateVariance);
        }
        if ddof > 0 {
            nobs_sigma2 = nobs_sigma2 / (n - ddof as f64) * n;
        }
        let scale = nobs_sigma2.sqrt();
        let mut acc = 0.0;
        let path: Vec<f64> = resid
            .iter()
            .map(|e| {
                acc += e;
                acc / scale
            })
            .collect();
        let stat = path.iter().fold(0.0_f64, |m, b| m.max(b.abs()));
        Ok(CusumOls { stat, p_value: kolmogorov_sf(stat), path })
    }
}

/// Survival function of the Kolmogorov distribution,
/// `P(sup|B| > x)` for a Brownian bridge `B`.
///
/// Uses `2Σ(−1)^{k−1}e^{−2k²x²}` for `x ≥ 1` and the theta-function form
/// `1 − (√(2π)/x)·Σe^{−(2k−1)²π²/(8x²)}` below.
pub fn kolmogorov_sf(x: f64) -> f64 {
    if !(x > 0.0) {
        return 1.0;
    }
    if x >= 1.0 {
        let mut sum = 0.0;
        for k in 1..=100 {
            let kf = k as f64;
            let term = (-2.0 * kf * kf * x * x).exp();
            sum += if k % 2 == 1 { term } else { -term };
            if term < 1e-16 {
                break;
            }
        }
        (2.0 * sum).clamp(0.0, 1.0)
    } else {
        let pi2 = std::f64::consts::PI * std::f64::consts::PI;
        let mut sum = 0.0;
        for k in 1..=100 {
            let odd = (2 * k - 1) as f64;
            let term = (-odd * odd * pi2 / (8.0 * x * x)).exp();
            sum += term;
            if term < 1e-16 {
                break;
            }
        }
        let cdf = (2.0 * std::f64::consts::PI).sqrt() / x * sum;
        (1.0 - cdf).clamp(0.0, 1.0)
    }
}

/// Boundary constant `a` of the recursive CUSUM bounds.
///
/// Returns `None` for levels other than 1%, 5%, 10%.
pub fn cusum_bound_constant(alpha: f64) -> Option<f64> {
    const TABLE: [(f64, f64); 3] = [(0.01, 1.143), (0.05, 0.948), (0.10, 0.850)];
    TABLE.iter().find(|(level, _)| (level - alpha).abs() < 1e-9).map(|(_, a)| *a)
}

/// RecursiveCusum — Brown–Durbin–Evans CUSUM path and bounds.
///
/// Fields
/// ------
/// - `recursive_resid`: scaled recursive residuals `w_t`, one per
///   observation after the initial block.
/// - `start`: index of the first observation with a recursive residual.
/// - `path`: cumulated standardized residuals, same length as
///   `recursive_resid`.
/// - `lower`, `upper`: significance bounds at each point of `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecursiveCusum {
    pub recursive_resid: Vec<f64>,
    pub start: usize,
    pub path: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub alpha: f64,
}

impl RecursiveCusum {
    /// Compute recursive residuals of `y` on `x` and their CUSUM path.
    ///
    /// Errors
    /// ------
    /// - `TestError::InvalidSignificance` for `alpha ∉ {0.01, 0.05, 0.10}`.
    /// - `TestError::InsufficientData` when fewer than 3 recursive residuals
    ///   remain.
    /// - `TestError::DegenerateVariance` if the recursive residuals are all
    ///   equal.
    /// - `TestError::Regression` on shape mismatch or a design that never
    ///   reaches full rank.
    pub fn recursive_cusum(
        y: ArrayView1<f64>, x: &Array2<f64>, alpha: f64,
    ) -> TestResult<Self> {
        let a = cusum_bound_constant(alpha).ok_or(TestError::InvalidSignificance(alpha))?;
        let (n, k) = x.dim();
        if y.len() != n {
            return Err(LinalgError::DimensionMismatch { rows: n, len: y.len() }.into());
        }
        let y_vec = y.to_vec();
        validate_series(&y_vec, k + 3)?;

        let (start, mut beta, mut xtx_inv) = initial_block(y, x)?;
        if n - start < 3 {
            return Err(TestError::InsufficientData { len: n, required: start + 3 });
        }

        let mut w = Vec::with_capacity(n - start);
        for t in start..n {
            let xt = x.row(t);
            let pred = xt.dot(&beta);
            let resid = y[t] - pred;
            let tmp = xtx_inv.dot(&xt);
            let f = 1.0 + xt.dot(&tmp);
            w.push(resid / f.sqrt());
            // Sherman–Morrison updates of (X'X)⁻¹ and β̂.
            for i in 0..k {
                for j in 0..k {
                    xtx_inv[[i, j]] -= tmp[i] * tmp[j] / f;
                }
            }
            beta = &beta + &(&tmp * (resid / f));
        }

        let m = w.len();
        let mean = w.iter().sum::<f64>() / m as f64;
        let var = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (m - 1) as f64;
        if var <= 0.0 {
            return Err(TestError::DegenerateVariance);
        }
        let sd = var.sqrt();
        let mut acc = 0.0;
        let path: Vec<f64> = w
            .iter()
            .map(|v| {
                acc += v / sd;
                acc
            })
            .collect();
        let root_m = (m as f64).sqrt();
        let upper: Vec<f64> = (0..m).map(|j| a * root_m + 2.0 * a * j as f64 / root_m).collect();
        let lower = upper.iter().map(|u| -u).collect();

        Ok(RecursiveCusum { recursive_resid: w, start, path, lower, upper, alpha })
    }

    /// `true` when the path crosses either bound.
    pub fn crosses_bounds(&self) -> bool {
        self.path.iter().zip(self.upper.iter()).any(|(p, u)| p.abs() > *u)
    }
}

/// Smallest leading block `x[..s]` with full column rank, and its fit.
fn initial_block(
    y: ArrayView1<f64>, x: &Array2<f64>,
) -> TestResult<(usize, Array1<f64>, Array2<f64>)> {
    let (n, k) = x.dim();
    let mut last_err = LinalgError::InsufficientObservations { nobs: n, cols: k };
    for s in k..n {
        let xs = x.slice(s![..s, ..]).to_owned();
        match least_squares(&xs, y.slice(s![..s])) {
            Ok(fit) => return Ok((s, fit.params, fit.xtx_inv)),
            Err(e @ LinalgError::RankDeficient { .. }) => last_err = e,
            Err(e) => return Err(e.into()),
        }
    }
    Err(last_err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_distr::{Distribution, StandardNormal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The Kolmogorov survival function at tabulated critical values and
    //   continuity across its two series.
    // - OLS-residual CUSUM on a hand-sized example.
    // - Recursive residuals against brute-force expanding-window refits.
    // - Bound crossing under a structural break.
    // -------------------------------------------------------------------------

    fn regression_fixture(
        seed: u64, n: usize, break_at: Option<usize>,
    ) -> (Array1<f64>, Array2<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = Array2::<f64>::ones((n, 2));
        let mut y = Array1::<f64>::zeros(n);
        for t in 0..n {
            let xt: f64 = StandardNormal.sample(&mut rng);
            let e: f64 = StandardNormal.sample(&mut rng);
            x[[t, 1]] = xt;
            let shift = match break_at {
                Some(b) if t >= b => 3.0,
                _ => 0.0,
            };
            y[t] = 1.0 + shift + 0.5 * xt + 0.5 * e;
        }
        (y, x)
    }

    #[test]
    // Purpose
    // -------
    // Pin the Kolmogorov survival function at its tabulated quantiles.
    //
    // Given
    // -----
    // - x ∈ {1.22, 1.36, 1.63} and points on both sides of x = 1.
    //
    // Expect
    // ------
    // - sf ≈ 0.10, 0.05, 0.01; sf(1) ≈ 0.27 with both branches agreeing to
    //   within the density times the step; sf(0) = 1.
    fn kolmogorov_sf_matches_critical_values() {
        assert_relative_eq!(kolmogorov_sf(1.2238), 0.10, epsilon = 1e-3);
        assert_relative_eq!(kolmogorov_sf(1.3581), 0.05, epsilon = 1e-3);
        assert_relative_eq!(kolmogorov_sf(1.6276), 0.01, epsilon = 1e-3);
        // The two series expansions meet at x = 1, where the density is ≈ 1.07.
        let h = 1e-6;
        assert!((kolmogorov_sf(1.0 - h) - kolmogorov_sf(1.0)).abs() < 2.0 * h);
        assert_relative_eq!(kolmogorov_sf(1.0), 0.27, epsilon = 1e-5);
        assert_eq!(kolmogorov_sf(0.0), 1.0);
        assert!(kolmogorov_sf(0.2) > 0.999);
    }

    #[test]
    // Purpose
    // -------
    // Verify the OLS-residual CUSUM path and statistic on a small example.
    //
    // Given
    // -----
    // - Residuals [1, 1, −1, −1], ddof = 0 ⇒ n·σ̂² = 4.
    //
    // Expect
    // ------
    // - Path [0.5, 1, 0.5, 0]; stat = 1.
    fn cusum_ols_path_matches_hand_computation() {
        // Act
        let out = CusumOls::cusum_ols(&[1.0, 1.0, -1.0, -1.0], 0).unwrap();

        // Assert
        assert_eq!(out.path, vec![0.5, 1.0, 0.5, 0.0]);
        assert_relative_eq!(out.stat, 1.0);
        assert_relative_eq!(out.p_value, kolmogorov_sf(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Check the rank-one recursion against brute-force refits.
    //
    // Given
    // -----
    // - A 30-point regression with intercept and one regressor.
    //
    // Expect
    // ------
    // - For each t, w_t equals the standardized one-step prediction error
    //   from an OLS fit on the first t observations.
    fn recursive_residuals_match_expanding_window_refits() {
        // Arrange
        let (y, x) = regression_fixture(4, 30, None);

        // Act
        let out = RecursiveCusum::recursive_cusum(y.view(), &x, 0.05).unwrap();

        // Assert
        assert_eq!(out.start, 2);
        for (i, t) in (out.start..30).enumerate() {
            let xs = x.slice(s![..t, ..]).to_owned();
            let fit = least_squares(&xs, y.slice(s![..t])).unwrap();
            let xt = x.row(t);
            let f = 1.0 + xt.dot(&fit.xtx_inv.dot(&xt));
            let expected = (y[t] - xt.dot(&fit.params)) / f.sqrt();
            assert_relative_eq!(out.recursive_resid[i], expected, epsilon = 1e-8);
        }
        assert_eq!(out.path.len(), 28);
        assert_relative_eq!(out.upper[0], 0.948 * 28f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a large intercept shift drives the path outside its 5%
    // bounds, while a stable relation stays inside its 1% bounds.
    //
    // Given
    // -----
    // - 120 observations, intercept shifting by 3 at t = 60, and a stable
    //   counterpart.
    //
    // Expect
    // ------
    // - Break: 5% bounds crossed. Stable: 1% bounds not crossed.
    fn recursive_cusum_detects_structural_break() {
        // Arrange
        let (yb, xb) = regression_fixture(8, 120, Some(60));
        let (ys, xs) = regression_fixture(8, 120, None);

        // Act
        let broken = RecursiveCusum::recursive_cusum(yb.view(), &xb, 0.05).unwrap();
        let stable = RecursiveCusum::recursive_cusum(ys.view(), &xs, 0.01).unwrap();

        // Assert
        assert!(broken.crosses_bounds());
        assert!(!stable.crosses_bounds());
    }

    #[test]
    fn recursive_cusum_rejects_unknown_alpha() {
        let (y, x) = regression_fixture(1, 20, None);
        assert_eq!(
            RecursiveCusum::recursive_cusum(y.view(), &x, 0.2),
            Err(TestError::InvalidSignificance(0.2))
        );
    }
}
