//! regression::lag_selection — lag-order choice by information criteria.
//!
//! Purpose
//! -------
//! Evaluate candidate lag orders `1..=max_lag` and report, independently,
//! the order minimizing AIC, BIC, and FPE. The result is informational: the
//! final regression keeps contemporaneous regressors whatever is selected.
//!
//! Key behaviors
//! -------------
//! - [`LagModel::DistributedLag`]: regress the dependent series on a
//!   constant plus every regressor lagged `1..=lag`. Each candidate uses all
//!   rows its own shifts leave defined, so sample sizes shrink with `lag`.
//!   AIC/BIC are the OLS log-likelihood criteria and FPE is
//!   `(ssr/n)·(n+k)/(n−k)`.
//! - [`LagModel::Var`]: fit a VAR(p) over the dependent series and the
//!   regressors on a common sample starting at `max_lag`, and score it with
//!   `ln|Σ̂| + c·(p·K² + K)/T` (`c = 2` for AIC, `ln T` for BIC) and the VAR
//!   FPE `((T + Kp + 1)/(T − Kp − 1))^K·|Σ̂|`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Criteria that evaluate to NaN never win, so a criterion can be absent
//!   in the result; AIC and BIC are present on any non-degenerate input.
//! - Ties keep the smaller lag.
use crate::{
    linalg::{least_squares, log_det_spd},
    regression::{
        design::{lagged_design, trim_leading},
        errors::{EstimationError, EstimationResult},
    },
};
use ndarray::{s, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Model family scored at each candidate lag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LagModel {
    #[default]
    DistributedLag,
    Var,
}

/// Information criteria of one candidate lag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LagCriteria {
    pub lag: usize,
    pub nobs: usize,
    pub aic: f64,
    pub bic: f64,
    pub fpe: f64,
}

/// LagSelection — the minimizing lag per criterion and the full table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagSelection {
    pub aic: Option<usize>,
    pub bic: Option<usize>,
    pub fpe: Option<usize>,
    pub table: Vec<LagCriteria>,
}

impl LagSelection {
    fn from_table(table: Vec<LagCriteria>) -> Self {
        LagSelection {
            aic: argmin(&table, |c| c.aic),
            bic: argmin(&table, |c| c.bic),
            fpe: argmin(&table, |c| c.fpe),
            table,
        }
    }
}

impl fmt::Display for LagSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{aic: {:?}, bic: {:?}, fpe: {:?}}}", self.aic, self.bic, self.fpe)
    }
}

/// Select the lag order of `endog` given `exog` over `1..=max_lag`.
///
/// Parameters
/// ----------
/// - `endog`: dependent series, aligned with every `exog` column.
/// - `exog`: named regressor columns.
/// - `max_lag`: largest lag order to evaluate (`≥ 1`).
/// - `model`: distributed-lag regression or VAR.
///
/// Errors
/// ------
/// - `EstimationError::ZeroMaxLag` if `max_lag == 0`.
/// - `EstimationError::DimensionMismatch` on misaligned inputs.
/// - `EstimationError::InsufficientObservations` / `RankDeficient` when a
///   candidate fit is impossible.
pub fn select_lag_length(
    endog: ArrayView1<'_, f64>, exog: &[(String, ArrayView1<'_, f64>)], max_lag: usize,
    model: LagModel,
) -> EstimationResult<LagSelection> {
    if max_lag == 0 {
        return Err(EstimationError::ZeroMaxLag);
    }
    if let Some((_, col)) = exog.iter().find(|(_, c)| c.len() != endog.len()) {
        return Err(EstimationError::DimensionMismatch { rows: endog.len(), len: col.len() });
    }
    let table = match model {
        LagModel::DistributedLag => distributed_lag_table(endog, exog, max_lag)?,
        LagModel::Var => var_table(endog, exog, max_lag)?,
    };
    for row in &table {
        debug!(
            "lag {}: nobs={}, aic={:.4}, bic={:.4}, fpe={:.4e}",
            row.lag, row.nobs, row.aic, row.bic, row.fpe
        );
    }
    Ok(LagSelection::from_table(table))
}

fn distributed_lag_table(
    endog: ArrayView1<'_, f64>, exog: &[(String, ArrayView1<'_, f64>)], max_lag: usize,
) -> EstimationResult<Vec<LagCriteria>> {
    (1..=max_lag)
        .map(|lag| {
            let design = lagged_design(exog, lag)?;
            let y = trim_leading(endog, lag);
            let (n, k) = (design.nobs(), design.ncols());
            if n <= k {
                return Err(EstimationError::InsufficientObservations {
                    nobs: n,
                    required: k + 1,
                });
            }
            let fit = least_squares(design.matrix(), y.view())?;
            let (nf, kf) = (n as f64, k as f64);
            Ok(LagCriteria {
                lag,
                nobs: n,
                aic: fit.aic(),
                bic: fit.bic(),
                fpe: (fit.ssr / nf) * (nf + kf) / (nf - kf),
            })
        })
        .collect()
}

fn var_table(
    endog: ArrayView1<'_, f64>, exog: &[(String, ArrayView1<'_, f64>)], max_lag: usize,
) -> EstimationResult<Vec<LagCriteria>> {
    let n = endog.len();
    let neqs = exog.len() + 1;
    let mut data = Array2::<f64>::zeros((n, neqs));
    data.column_mut(0).assign(&endog);
    for (j, (_, col)) in exog.iter().enumerate() {
        data.column_mut(j + 1).assign(col);
    }
    if n <= max_lag {
        return Err(EstimationError::InsufficientObservations { nobs: n, required: max_lag + 1 });
    }
    let t_obs = n - max_lag;
    let endog_block = data.slice(s![max_lag.., ..]);

    (1..=max_lag)
        .map(|lag| {
            let k = 1 + neqs * lag;
            if t_obs <= k {
                return Err(EstimationError::InsufficientObservations {
                    nobs: t_obs,
                    required: k + 1,
                });
            }
            let mut x = Array2::<f64>::ones((t_obs, k));
            for l in 1..=lag {
                let shifted = data.slice(s![max_lag - l..n - l, ..]);
                x.slice_mut(s![.., 1 + (l - 1) * neqs..1 + l * neqs]).assign(&shifted);
            }
            let mut resid = Array2::<f64>::zeros((t_obs, neqs));
            for (eq, y) in endog_block.axis_iter(Axis(1)).enumerate() {
                let fit = least_squares(&x, y)?;
                resid.column_mut(eq).assign(&fit.residuals);
            }
            let tf = t_obs as f64;
            let sigma = resid.t().dot(&resid) / tf;
            let ld = log_det_spd(&sigma).unwrap_or(f64::NAN);
            let free = (lag * neqs * neqs + neqs) as f64;
            let df_model = k as f64;
            Ok(LagCriteria {
                lag,
                nobs: t_obs,
                aic: ld + 2.0 * free / tf,
                bic: ld + tf.ln() * free / tf,
                fpe: ((tf + df_model) / (tf - df_model)).powi(neqs as i32) * ld.exp(),
            })
        })
        .collect()
}

fn argmin(table: &[LagCriteria], key: impl Fn(&LagCriteria) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for row in table {
        let value = key(row);
        if value.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| value < b) {
            best = Some((row.lag, value));
        }
    }
    best.map(|(lag, _)| lag)
}
