//! linalg — least-squares kernels shared by estimators and test regressions.
//!
//! Purpose
//! -------
//! Provide a single, numerically careful least-squares routine used by the
//! final OLS estimator, the ADF test regressions, the Breusch–Godfrey and
//! White auxiliary regressions, the recursive-residual CUSUM, and lag-order
//! selection. Data live in `ndarray` containers; decompositions are delegated
//! to `nalgebra`.
//!
//! Key behaviors
//! -------------
//! - Bridge `ndarray` matrices into `nalgebra::DMatrix` (and back) with
//!   column-major writes.
//! - Solve `min ‖y − Xβ‖²` through a thin SVD of `X`, reporting the numerical
//!   rank and refusing rank-deficient designs.
//! - Expose `(XᵀX)⁻¹` computed from the same SVD (`V Σ⁻² Vᵀ`) so that
//!   classical and sandwich covariances share one factorization.
//! - Select a maximal set of linearly independent columns for auxiliary
//!   regressions whose regressors may be collinear by construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Designs are `n×k` with rows indexing time and `n ≥ k`.
//! - All entries of `X` and `y` are finite; non-finite input is rejected
//!   before any decomposition.
//! - Rank is determined with the LAPACK-style tolerance
//!   `σ_max · max(n, k) · ε`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact recovery on noiseless data, orthogonality of
//!   residuals to the design, rank-deficiency detection, and the greedy
//!   independent-column selector.
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

pub type LinalgResult<T> = Result<T, LinalgError>;

/// Failure modes of the least-squares kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// Fewer observations than regressors.
    #[error("Insufficient observations: {nobs} rows for {cols} regressors.")]
    InsufficientObservations { nobs: usize, cols: usize },

    /// Design matrix does not have full column rank.
    #[error("Design matrix is rank deficient: rank {rank} < {cols} columns.")]
    RankDeficient { rank: usize, cols: usize },

    /// Response length does not match the number of design rows.
    #[error("Dimension mismatch: design has {rows} rows, response has {len} entries.")]
    DimensionMismatch { rows: usize, len: usize },

    /// NaN or ±∞ present in the design or response.
    #[error("Non-finite value in least-squares input.")]
    NonFinite,
}

/// LeastSquares — solution of an unweighted least-squares problem.
///
/// Fields
/// ------
/// - `params`: coefficient vector `β̂` (length `k`).
/// - `fitted`: `Xβ̂` (length `n`).
/// - `residuals`: `y − Xβ̂` (length `n`).
/// - `xtx_inv`: `(XᵀX)⁻¹`, `k×k`.
/// - `ssr`: residual sum of squares.
/// - `nobs`, `rank`: sample size and numerical rank (`rank == k`).
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    pub params: Array1<f64>,
    pub fitted: Array1<f64>,
    pub residuals: Array1<f64>,
    pub xtx_inv: Array2<f64>,
    pub ssr: f64,
    pub nobs: usize,
    pub rank: usize,
}

impl LeastSquares {
    /// Number of estimated coefficients.
    pub fn k(&self) -> usize {
        self.params.len()
    }

    /// Residual degrees of freedom `n − k`.
    pub fn df_resid(&self) -> usize {
        self.nobs.saturating_sub(self.k())
    }

    /// Gaussian log-likelihood at the MLE variance `ssr / n`.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    /// `−2ℓ + 2k`.
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.k() as f64
    }

    /// `−2ℓ + ln(n)·k`.
    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood() + (self.nobs as f64).ln() * self.k() as f64
    }

    /// Classical standard errors `sqrt(s² · diag((XᵀX)⁻¹))` with
    /// `s² = ssr / (n − k)`.
    pub fn standard_errors(&self) -> Array1<f64> {
        let s2 = self.ssr / self.df_resid().max(1) as f64;
        self.xtx_inv.diag().mapv(|v| (s2 * v).sqrt())
    }

    /// t-ratio of coefficient `j` under classical standard errors.
    pub fn t_value(&self, j: usize) -> f64 {
        self.params[j] / self.standard_errors()[j]
    }

    /// Centered R² (`1 − ssr / Σ(y − ȳ)²`), given the response.
    pub fn centered_r_squared(&self, y: ArrayView1<f64>) -> f64 {
        let mean = y.mean().unwrap_or(0.0);
        let tss: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
        if tss <= 0.0 {
            return 0.0;
        }
        1.0 - self.ssr / tss
    }
}

/// Solve the least-squares problem `min ‖y − Xβ‖²` for a full-rank design.
///
/// Parameters
/// ----------
/// - `x`: `&Array2<f64>`
///   `n×k` design matrix (rows = observations).
/// - `y`: `ArrayView1<f64>`
///   Response vector of length `n`.
///
/// Returns
/// -------
/// `LinalgResult<LeastSquares>`
///   Coefficients, fitted values, residuals, `(XᵀX)⁻¹`, and SSR.
///
/// Errors
/// ------
/// - `LinalgError::DimensionMismatch` if `y.len() != n`.
/// - `LinalgError::InsufficientObservations` if `n < k` or `k == 0`.
/// - `LinalgError::NonFinite` on NaN/±∞ input.
/// - `LinalgError::RankDeficient` if the numerical rank is below `k`.
pub fn least_squares(x: &Array2<f64>, y: ArrayView1<f64>) -> LinalgResult<LeastSquares> {
    let (n, k) = x.dim();
    if y.len() != n {
        return Err(LinalgError::DimensionMismatch { rows: n, len: y.len() });
    }
    if k == 0 || n < k {
        return Err(LinalgError::InsufficientObservations { nobs: n, cols: k });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite);
    }

    let x_nalg = to_dmatrix(x);
    let svd = x_nalg.svd(true, true);
    let rank = numerical_rank(svd.singular_values.as_slice(), n, k);
    if rank < k {
        return Err(LinalgError::RankDeficient { rank, cols: k });
    }

    let (u, v_t) = match (svd.u.as_ref(), svd.v_t.as_ref()) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(LinalgError::RankDeficient { rank: 0, cols: k }),
    };
    let y_nalg = DVector::from_iterator(n, y.iter().copied());
    let uty = u.transpose() * &y_nalg;

    let mut params = Array1::<f64>::zeros(k);
    let mut xtx_inv = Array2::<f64>::zeros((k, k));
    for l in 0..k {
        let sv = svd.singular_values[l];
        let coef = uty[l] / sv;
        let inv_sq = 1.0 / (sv * sv);
        for i in 0..k {
            params[i] += v_t[(l, i)] * coef;
            for j in i..k {
                xtx_inv[[i, j]] += v_t[(l, i)] * v_t[(l, j)] * inv_sq;
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx_inv[[i, j]] = xtx_inv[[j, i]];
        }
    }

    let fitted = x.dot(&params);
    let residuals = &y - &fitted;
    let ssr = residuals.dot(&residuals);
    Ok(LeastSquares { params, fitted, residuals, xtx_inv, ssr, nobs: n, rank })
}

/// Numerical column rank of `x` (0 for empty matrices or non-finite input).
pub fn matrix_rank(x: &Array2<f64>) -> usize {
    let (n, k) = x.dim();
    if n == 0 || k == 0 || x.iter().any(|v| !v.is_finite()) {
        return 0;
    }
    let svd = to_dmatrix(x).svd(false, false);
    numerical_rank(svd.singular_values.as_slice(), n, k)
}

/// Indices of a maximal linearly independent subset of columns, scanning
/// left to right and keeping a column only if it raises the rank.
pub fn independent_columns(x: &Array2<f64>) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(x.ncols());
    for j in 0..x.ncols() {
        let mut candidate = kept.clone();
        candidate.push(j);
        let sub = x.select(ndarray::Axis(1), &candidate);
        if matrix_rank(&sub) == candidate.len() {
            kept = candidate;
        }
    }
    kept
}

/// Copy an `ndarray` matrix into a column-major `nalgebra::DMatrix`.
pub fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = a.dim();
    DMatrix::from_fn(rows, cols, |i, j| a[[i, j]])
}

/// Copy a `nalgebra::DMatrix` back into an `ndarray` matrix.
pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Inverse of a symmetric positive-definite matrix via Cholesky.
///
/// Returns `None` when the matrix is not numerically positive definite.
pub fn invert_spd(a: &Array2<f64>) -> Option<Array2<f64>> {
    let chol = to_dmatrix(a).cholesky()?;
    Some(from_dmatrix(&chol.inverse()))
}

/// Log-determinant of a symmetric positive-definite matrix via Cholesky.
pub fn log_det_spd(a: &Array2<f64>) -> Option<f64> {
    let chol = to_dmatrix(a).cholesky()?;
    let l = chol.l();
    Some(2.0 * (0..l.nrows()).map(|i| l[(i, i)].ln()).sum::<f64>())
}

fn numerical_rank(singular_values: &[f64], n: usize, k: usize) -> usize {
    let sv_max = singular_values.iter().copied().fold(0.0_f64, f64::max);
    if sv_max <= 0.0 {
        return 0;
    }
    let tol = sv_max * (n.max(k) as f64) * f64::EPSILON;
    singular_values.iter().filter(|&&s| s > tol).count()
}
