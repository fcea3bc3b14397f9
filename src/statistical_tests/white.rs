//! statistical_tests::white — White's general heteroskedasticity test.
//!
//! Regress the squared residuals on all levels, squares, and cross-products
//! of the original regressors (`x_i·x_j` for `i ≤ j`, which includes the
//! levels through the constant). Under homoskedasticity `n·R²` is χ² with
//! `rank − 1` degrees of freedom, where `rank` counts the linearly
//! independent auxiliary columns.
use crate::{
    linalg::{independent_columns, least_squares, LinalgError},
    statistical_tests::{
        breusch_godfrey::with_constant,
        distributions::{chi2_sf, f_sf},
        errors::{TestError, TestResult},
        validation::validate_series,
    },
};
use ndarray::{Array1, Array2, Axis};
use serde::Serialize;

/// WhiteTest — LM and F forms of White's test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WhiteTest {
    pub lm: f64,
    pub lm_p_value: f64,
    pub f_stat: f64,
    pub f_p_value: f64,
    pub df: usize,
}

impl WhiteTest {
    /// Run White's test on `resid` from a regression on `exog`.
    ///
    /// A constant is prepended to `exog` when absent.
    ///
    /// Errors
    /// ------
    /// - `TestError::InsufficientData` when `n` does not exceed the number
    ///   of independent auxiliary columns.
    /// - `TestError::DegenerateVariance` if the auxiliary design reduces to
    ///   the constant alone.
    /// - `TestError::Regression` on shape mismatch.
    pub fn white(resid: &[f64], exog: &Array2<f64>) -> TestResult<Self> {
        validate_series(resid, 3)?;
        let n = resid.len();
        if exog.nrows() != n {
            return Err(LinalgError::DimensionMismatch { rows: exog.nrows(), len: n }.into());
        }

        let base = with_constant(exog);
        let k = base.ncols();
        let pairs: Vec<(usize, usize)> =
            (0..k).flat_map(|i| (i..k).map(move |j| (i, j))).collect();
        let mut products = Array2::<f64>::zeros((n, pairs.len()));
        for (c, &(i, j)) in pairs.iter().enumerate() {
            let col = &base.column(i) * &base.column(j);
            products.column_mut(c).assign(&col);
        }
        let kept = independent_columns(&products);
        let aux = products.select(Axis(1), &kept);
        let rank = aux.ncols();
        if rank < 2 {
            return Err(TestError::DegenerateVariance);
        }
        if n <= rank {
            return Err(TestError::InsufficientData { len: n, required: rank + 1 });
        }

        let y: Array1<f64> = resid.iter().map(|e| e * e).collect();
        let fit = least_squares(&aux, y.view())?;
        let r2 = fit.centered_r_squared(y.view());
        let df = rank - 1;
        let df_resid = (n - rank) as f64;
        let lm = n as f64 * r2;
        let f_stat =
            if r2 < 1.0 { (r2 / df as f64) / ((1.0 - r2) / df_resid) } else { f64::INFINITY };

        Ok(WhiteTest {
            lm,
            lm_p_value: chi2_sf(lm, df as f64),
            f_stat,
            f_p_value: f_sf(f_stat, df as f64, df_resid),
            df,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_distr::{Distribution, StandardNormal};

    fn fixture(seed: u64, n: usize, heteroskedastic: bool) -> (Array2<f64>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut x = Array2::<f64>::ones((n, 3));
        let mut e = Vec::with_capacity(n);
        for t in 0..n {
            let x1: f64 = StandardNormal.sample(&mut rng);
            let x2: f64 = StandardNormal.sample(&mut rng);
            x[[t, 1]] = x1;
            x[[t, 2]] = x2;
            let z: f64 = StandardNormal.sample(&mut rng);
            let scale = if heteroskedastic { 0.2 + 2.0 * x1.abs() } else { 1.0 };
            e.push(scale * z);
        }
        (x, e)
    }

    #[test]
    // Purpose
    // -------
    // Verify the degrees of freedom and power of the test.
    //
    // Given
    // -----
    // - A design [1, x1, x2] (6 distinct products, df = 5).
    // - Errors whose scale grows with |x1|, and homoskedastic errors.
    //
    // Expect
    // ------
    // - df = 5 in both cases.
    // - Heteroskedastic: LM p < 1e-6. Homoskedastic: LM p > 0.001.
    fn white_detects_variance_depending_on_regressor() {
        // Arrange
        let (xh, eh) = fixture(9, 400, true);
        let (x0, e0) = fixture(10, 400, false);

        // Act
        let het = WhiteTest::white(&eh, &xh).unwrap();
        let hom = WhiteTest::white(&e0, &x0).unwrap();

        // Assert
        assert_eq!(het.df, 5);
        assert_eq!(hom.df, 5);
        assert!(het.lm_p_value < 1e-6, "{het:?}");
        assert!(hom.lm_p_value > 0.001, "{hom:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure collinear products (a dummy squared equals itself) reduce the
    // degrees of freedom instead of failing.
    //
    // Given
    // -----
    // - A design [1, d] with d ∈ {0, 1}: products {1, d, d²} have rank 2.
    //
    // Expect
    // ------
    // - df = 1.
    fn white_drops_collinear_products() {
        // Arrange
        let n = 40;
        let x = Array2::from_shape_fn((n, 2), |(t, j)| if j == 0 { 1.0 } else { (t % 2) as f64 });
        let e: Vec<f64> = (0..n).map(|t| ((t * 7 % 11) as f64 - 5.0) / 3.0).collect();

        // Act
        let out = WhiteTest::white(&e, &x).unwrap();

        // Assert
        assert_eq!(out.df, 1);
    }
}
