//! statistical_tests::breusch_godfrey — higher-order residual autocorrelation.
//!
//! Purpose
//! -------
//! Test the null of no serial correlation up to order `p` in regression
//! residuals through the auxiliary regression
//!
//! ```text
//! e_t = x_t'α + Σ_{j=1..p} ρ_j·e_{t−j} + u_t
//! ```
//!
//! with pre-sample residuals set to zero, so the auxiliary sample keeps all
//! `n` observations.
//!
//! Key behaviors
//! -------------
//! - LM form: `n·R²` of the auxiliary regression, χ²(p).
//! - F form: joint significance of the `ρ_j`, comparing the auxiliary fit to
//!   the restricted fit on the original regressors, F(p, n − rank).
//! - A constant is appended to the auxiliary design when the original
//!   regressors do not contain one; linearly dependent columns are dropped.
use crate::{
    linalg::{independent_columns, least_squares, LinalgError},
    statistical_tests::{
        distributions::{chi2_sf, f_sf},
        errors::{TestError, TestResult},
        validation::validate_series,
    },
};
use ndarray::{s, Array1, Array2, Axis};
use serde::Serialize;

/// BreuschGodfrey — LM and F forms of the test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreuschGodfrey {
    pub lm: f64,
    pub lm_p_value: f64,
    pub f_stat: f64,
    pub f_p_value: f64,
    pub nlags: usize,
}

impl BreuschGodfrey {
    /// Run the test on residuals `resid` of a regression on `exog`.
    ///
    /// Parameters
    /// ----------
    /// - `resid`: `&[f64]`
    ///   OLS residuals, length `n`.
    /// - `exog`: `&Array2<f64>`
    ///   `n×k` design of the original regression.
    /// - `nlags`: `usize`
    ///   Autocorrelation order `p ≥ 1`.
    ///
    /// Errors
    /// ------
    /// - `TestError::InvalidLag` unless `1 ≤ nlags < n`.
    /// - `TestError::Regression` on shape mismatch or a degenerate auxiliary
    ///   regression.
    pub fn breusch_godfrey(resid: &[f64], exog: &Array2<f64>, nlags: usize) -> TestResult<Self> {
        validate_series(resid, 3)?;
        let n = resid.len();
        if exog.nrows() != n {
            return Err(LinalgError::DimensionMismatch { rows: exog.nrows(), len: n }.into());
        }
        if nlags == 0 || nlags >= n {
            return Err(TestError::InvalidLag { lags: nlags, nobs: n });
        }

        let base = with_constant(exog);
        let k_base = base.ncols();
        let mut aux = Array2::<f64>::zeros((n, k_base + nlags));
        aux.slice_mut(s![.., ..k_base]).assign(&base);
        for j in 1..=nlags {
            for t in j..n {
                aux[[t, k_base + j - 1]] = resid[t - j];
            }
        }

        let y = Array1::from(resid.to_vec());
        let kept = independent_columns(&aux);
        let aux = aux.select(Axis(1), &kept);
        let restricted_cols: Vec<usize> =
            (0..kept.len()).filter(|&i| kept[i] < k_base).collect();
        let restricted = aux.select(Axis(1), &restricted_cols);

        let unrestricted_fit = least_squares(&aux, y.view())?;
        let restricted_fit = least_squares(&restricted, y.view())?;

        let r2 = unrestricted_fit.centered_r_squared(y.view());
        let lm = n as f64 * r2;
        let df_num = (aux.ncols() - restricted.ncols()).max(1) as f64;
        let df_den = unrestricted_fit.df_resid() as f64;
        let f_stat = if unrestricted_fit.ssr > 0.0 && df_den > 0.0 {
            ((restricted_fit.ssr - unrestricted_fit.ssr) / df_num) / (unrestricted_fit.ssr / df_den)
        } else {
            f64::INFINITY
        };

        Ok(BreuschGodfrey {
            lm,
            lm_p_value: chi2_sf(lm, nlags as f64),
            f_stat,
            f_p_value: f_sf(f_stat, df_num, df_den),
            nlags,
        })
    }
}

/// Return `exog` with a leading constant column unless one is present.
pub(crate) fn with_constant(exog: &Array2<f64>) -> Array2<f64> {
    let has_constant = exog.axis_iter(Axis(1)).any(|col| {
        let first = col.first().copied().unwrap_or(0.0);
        first != 0.0 && col.iter().all(|v| *v == first)
    });
    if has_constant {
        return exog.clone();
    }
    let mut out = Array2::<f64>::ones((exog.nrows(), exog.ncols() + 1));
    out.slice_mut(s![.., 1..]).assign(exog);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_distr::{Distribution, StandardNormal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Argument guards (lag bounds, shape mismatch).
    // - Power against AR(1) residuals and size under white noise.
    // - Constant augmentation of the auxiliary design.
    // -------------------------------------------------------------------------

    fn design_and_resid(seed: u64, n: usize, phi: f64) -> (Array2<f64>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let x = Array2::from_shape_fn((n, 2), |(_, j)| {
            if j == 0 {
                1.0
            } else {
                StandardNormal.sample(&mut rng)
            }
        });
        let mut u = 0.0;
        let noise: Vec<f64> = (0..n)
            .map(|_| {
                let e: f64 = StandardNormal.sample(&mut rng);
                u = phi * u + e;
                u
            })
            .collect();
        // Residuals of regressing the noise on x.
        let fit = least_squares(&x, Array1::from(noise).view()).unwrap();
        (x, fit.residuals.to_vec())
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid lag orders and mismatched shapes are rejected.
    //
    // Given
    // -----
    // - nlags = 0, nlags = n, and a design with one row too few.
    //
    // Expect
    // ------
    // - `InvalidLag` twice and a wrapped `DimensionMismatch`.
    fn breusch_godfrey_invalid_arguments_return_error() {
        // Arrange
        let (x, e) = design_and_resid(1, 50, 0.0);
        let short_x = x.slice(s![..49, ..]).to_owned();

        // Act / Assert
        assert!(matches!(
            BreuschGodfrey::breusch_godfrey(&e, &x, 0),
            Err(TestError::InvalidLag { .. })
        ));
        assert!(matches!(
            BreuschGodfrey::breusch_godfrey(&e, &x, 50),
            Err(TestError::InvalidLag { .. })
        ));
        assert!(matches!(
            BreuschGodfrey::breusch_godfrey(&e, &short_x, 1),
            Err(TestError::Regression(LinalgError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the test detects strong AR(1) residual correlation and that
    // both forms agree in direction.
    //
    // Given
    // -----
    // - 300 residuals with φ = 0.6, and 300 white-noise residuals.
    //
    // Expect
    // ------
    // - AR(1): LM p < 1e-6 and F p < 1e-6.
    // - White noise: LM p > 0.001.
    fn breusch_godfrey_detects_autocorrelation() {
        // Arrange
        let (x_ar, e_ar) = design_and_resid(2, 300, 0.6);
        let (x_wn, e_wn) = design_and_resid(3, 300, 0.0);

        // Act
        let ar = BreuschGodfrey::breusch_godfrey(&e_ar, &x_ar, 1).unwrap();
        let wn = BreuschGodfrey::breusch_godfrey(&e_wn, &x_wn, 2).unwrap();

        // Assert
        assert!(ar.lm_p_value < 1e-6 && ar.f_p_value < 1e-6, "{ar:?}");
        assert!(wn.lm_p_value > 0.001, "{wn:?}");
        assert!(wn.lm >= 0.0 && wn.f_stat >= 0.0);
        assert_eq!(wn.nlags, 2);
    }

    #[test]
    fn with_constant_prepends_only_when_missing() {
        let x = ndarray::array![[1.0, 2.0], [1.0, 3.0]];
        let z = ndarray::array![[2.0], [3.0]];
        assert_eq!(with_constant(&x), x);
        assert_eq!(with_constant(&z), ndarray::array![[1.0, 2.0], [1.0, 3.0]]);
    }
}
