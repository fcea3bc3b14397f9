//! regression::design — named design matrices.
//!
//! Purpose
//! -------
//! Assemble regressor matrices with column names for the estimator and the
//! lag selector: a contemporaneous design with an intercept, and a
//! distributed-lag design whose rows start after the largest shift.
//!
//! Conventions
//! -----------
//! - The intercept column is named `const` and always comes first.
//! - Lagged columns are named `{name}.L{l}` and grouped by lag, so that
//!   `[const, x1.L1, x2.L1, x1.L2, x2.L2, …]`.
use crate::regression::errors::{EstimationError, EstimationResult};
use ndarray::{s, Array1, Array2, ArrayView1};

/// Name of the intercept column.
pub const CONST_NAME: &str = "const";

/// Design — an `n×k` regressor matrix and one name per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    names: Vec<String>,
    matrix: Array2<f64>,
    has_constant: bool,
}

impl Design {
    /// Stack `columns` into a design, prepending a `const` column of ones.
    ///
    /// Errors
    /// ------
    /// - `EstimationError::DimensionMismatch` if the columns differ in length.
    /// - `EstimationError::NonFiniteInput` on NaN/±∞.
    pub fn with_constant(columns: &[(String, ArrayView1<'_, f64>)]) -> EstimationResult<Self> {
        let n = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut matrix = Array2::<f64>::ones((n, columns.len() + 1));
        let mut names = Vec::with_capacity(columns.len() + 1);
        names.push(CONST_NAME.to_string());
        for (j, (name, column)) in columns.iter().enumerate() {
            if column.len() != n {
                return Err(EstimationError::DimensionMismatch { rows: n, len: column.len() });
            }
            if column.iter().any(|v| !v.is_finite()) {
                return Err(EstimationError::NonFiniteInput);
            }
            matrix.column_mut(j + 1).assign(column);
            names.push(name.clone());
        }
        Ok(Design { names, matrix, has_constant: true })
    }

    /// Wrap an existing matrix; `has_constant` marks column 0 as the
    /// intercept.
    pub fn from_matrix(
        names: Vec<String>, matrix: Array2<f64>, has_constant: bool,
    ) -> EstimationResult<Self> {
        if names.len() != matrix.ncols() {
            return Err(EstimationError::DimensionMismatch {
                rows: matrix.ncols(),
                len: names.len(),
            });
        }
        Ok(Design { names, matrix, has_constant })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn has_constant(&self) -> bool {
        self.has_constant
    }

    pub fn nobs(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Distributed-lag design: `const` plus every column lagged `1..=lags`.
///
/// Row `t` of the result corresponds to observation `t + lags` of the
/// inputs; the first `lags` observations are dropped because their shifts
/// are undefined. Pair with [`trim_leading`] on the response.
///
/// Errors
/// ------
/// - `EstimationError::ZeroMaxLag` if `lags == 0`.
/// - `EstimationError::InsufficientObservations` if no row survives.
/// - `EstimationError::DimensionMismatch` if the columns differ in length.
pub fn lagged_design(
    columns: &[(String, ArrayView1<'_, f64>)], lags: usize,
) -> EstimationResult<Design> {
    if lags == 0 {
        return Err(EstimationError::ZeroMaxLag);
    }
    let n = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
    if n <= lags {
        return Err(EstimationError::InsufficientObservations { nobs: n, required: lags + 1 });
    }
    let rows = n - lags;
    let p = columns.len();
    let mut matrix = Array2::<f64>::ones((rows, 1 + p * lags));
    let mut names = Vec::with_capacity(1 + p * lags);
    names.push(CONST_NAME.to_string());
    for lag in 1..=lags {
        for (j, (name, column)) in columns.iter().enumerate() {
            if column.len() != n {
                return Err(EstimationError::DimensionMismatch { rows: n, len: column.len() });
            }
            let c = 1 + (lag - 1) * p + j;
            matrix.column_mut(c).assign(&column.slice(s![lags - lag..n - lag]));
            names.push(format!("{name}.L{lag}"));
        }
    }
    Ok(Design { names, matrix, has_constant: true })
}

/// Drop the first `skip` observations of `y`.
pub fn trim_leading(y: ArrayView1<'_, f64>, skip: usize) -> Array1<f64> {
    y.slice(s![skip.min(y.len())..]).to_owned()
}
