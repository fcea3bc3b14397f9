//! regression::ols — ordinary least squares with classical or HAC covariance.
//!
//! Purpose
//! -------
//! Fit `y = Xβ + e` by least squares and attach everything a regression
//! report needs: standard errors under the chosen covariance estimator,
//! test statistics and p-values, 95% confidence intervals, R² and adjusted
//! R², the overall F-test, log-likelihood, AIC, and BIC.
//!
//! Key behaviors
//! -------------
//! - Point estimates come from [`least_squares`]; rank deficiency and short
//!   samples surface as [`EstimationError`].
//! - `CovarianceType::NonRobust` uses `s²(X'X)⁻¹` with Student-t inference.
//! - `CovarianceType::Hac` forms the OLS scores `x_t·e_t`, aggregates them
//!   with [`calculate_avg_scores_cov`], and returns the sandwich
//!   `n·(X'X)⁻¹ S (X'X)⁻¹`, optionally scaled by `n/(n−k)`. Inference is
//!   then asymptotic normal, and the overall F-test is the robust Wald F
//!   on the slope coefficients with `(k−1, n−k)` degrees of freedom.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n > k`, so residual degrees of freedom are positive.
//! - With an intercept the residuals sum to zero up to rounding, and R² is
//!   the centered R²; without one R² is uncentered.
//!
//! Conventions
//! -----------
//! - Coefficient order, names, and covariance rows follow the [`Design`]
//!   columns.
//! - AIC/BIC count every coefficient including the intercept.
use crate::{
    inference::{calculate_avg_scores_cov, HACOptions},
    linalg::{invert_spd, least_squares},
    regression::{
        design::Design,
        errors::{EstimationError, EstimationResult},
    },
    statistical_tests::distributions::{
        f_sf, normal_ppf, normal_two_sided, t_ppf, t_two_sided,
    },
};
use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Covariance estimator for the coefficient standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceType {
    NonRobust,
    Hac(HACOptions),
}

impl Default for CovarianceType {
    fn default() -> Self {
        CovarianceType::Hac(HACOptions::default())
    }
}

/// OlsOptions — estimator configuration.
///
/// - `cov_type`: classical or HAC covariance.
/// - `df_correction`: scale a HAC covariance by `n/(n−k)`.
/// - `confidence`: coverage of the reported intervals (default 0.95).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsOptions {
    pub cov_type: CovarianceType,
    pub df_correction: bool,
    pub confidence: f64,
}

impl Default for OlsOptions {
    fn default() -> Self {
        OlsOptions { cov_type: CovarianceType::default(), df_correction: true, confidence: 0.95 }
    }
}

/// One row of the coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientRow {
    pub name: String,
    pub coef: f64,
    pub std_err: f64,
    pub stat: f64,
    pub p_value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// FittedModel — an estimated linear regression and its fit statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    pub dep_name: String,
    pub names: Vec<String>,
    pub params: Array1<f64>,
    pub bse: Array1<f64>,
    /// t-ratios, or z-ratios when `use_t` is false.
    pub tvalues: Array1<f64>,
    pub pvalues: Array1<f64>,
    /// `k×2` matrix of lower and upper interval bounds.
    pub conf_int: Array2<f64>,
    pub confidence: f64,
    pub cov_params: Array2<f64>,
    pub resid: Array1<f64>,
    pub fitted: Array1<f64>,
    pub nobs: usize,
    pub df_model: usize,
    pub df_resid: usize,
    pub ssr: f64,
    pub rsquared: f64,
    pub rsquared_adj: f64,
    pub f_stat: f64,
    pub f_p_value: f64,
    pub llf: f64,
    pub aic: f64,
    pub bic: f64,
    pub has_constant: bool,
    pub cov_type: CovarianceType,
    /// Effective HAC bandwidth, when HAC was used.
    pub hac_lags: Option<usize>,
    pub use_t: bool,
}

impl FittedModel {
    pub fn k(&self) -> usize {
        self.params.len()
    }

    /// Final prediction error `(ssr/n)·(n+k)/(n−k)`.
    pub fn fpe(&self) -> f64 {
        let n = self.nobs as f64;
        let k = self.k() as f64;
        (self.ssr / n) * (n + k) / (n - k)
    }

    /// Coefficient table rows in design order.
    pub fn coefficients(&self) -> Vec<CoefficientRow> {
        self.names
            .iter()
            .enumerate()
            .map(|(j, name)| CoefficientRow {
                name: name.clone(),
                coef: self.params[j],
                std_err: self.bse[j],
                stat: self.tvalues[j],
                p_value: self.pvalues[j],
                lower: self.conf_int[[j, 0]],
                upper: self.conf_int[[j, 1]],
            })
            .collect()
    }

    /// Human-readable covariance label, e.g. `HAC (Bartlett, 1 lags)`.
    pub fn cov_label(&self) -> String {
        match (&self.cov_type, self.hac_lags) {
            (CovarianceType::Hac(opts), Some(lags)) => {
                format!("HAC ({:?}, {lags} lags)", opts.kernel)
            }
            _ => "nonrobust".to_string(),
        }
    }
}

/// Fit OLS of `y` on `design`.
///
/// Errors
/// ------
/// - `EstimationError::DimensionMismatch` if `y` and the design differ in
///   length.
/// - `EstimationError::InsufficientObservations` if `n ≤ k`.
/// - `EstimationError::NonFiniteInput` on NaN/±∞.
/// - `EstimationError::RankDeficient` for collinear regressors.
/// - `EstimationError::Inference` if HAC aggregation fails.
pub fn fit_ols(
    dep_name: &str, y: ArrayView1<'_, f64>, design: &Design, options: &OlsOptions,
) -> EstimationResult<FittedModel> {
    let x = design.matrix();
    let (n, k) = x.dim();
    if y.len() != n {
        return Err(EstimationError::DimensionMismatch { rows: n, len: y.len() });
    }
    if n <= k {
        return Err(EstimationError::InsufficientObservations { nobs: n, required: k + 1 });
    }
    let ls = least_squares(x, y)?;
    let df_resid = n - k;
    let df_model = if design.has_constant() { k - 1 } else { k };

    let (cov_params, hac_lags, use_t) = match options.cov_type {
        CovarianceType::NonRobust => {
            let s2 = ls.ssr / df_resid as f64;
            (&ls.xtx_inv * s2, None, true)
        }
        CovarianceType::Hac(hac) => {
            let scores = x * &ls.residuals.view().insert_axis(Axis(1));
            let (meat, lags) = calculate_avg_scores_cov(&hac, &scores)?;
            let mut cov = ls.xtx_inv.dot(&meat).dot(&ls.xtx_inv) * n as f64;
            if options.df_correction {
                cov *= n as f64 / df_resid as f64;
            }
            (cov, Some(lags), false)
        }
    };

    let bse = cov_params.diag().mapv(|v| v.max(0.0).sqrt());
    let tvalues = &ls.params / &bse;
    let df = df_resid as f64;
    let pvalues = tvalues.mapv(|t| if use_t { t_two_sided(t, df) } else { normal_two_sided(t) });
    let upper_q = 0.5 + options.confidence / 2.0;
    let q = if use_t { t_ppf(upper_q, df) } else { normal_ppf(upper_q) };
    let mut conf_int = Array2::<f64>::zeros((k, 2));
    for j in 0..k {
        conf_int[[j, 0]] = ls.params[j] - q * bse[j];
        conf_int[[j, 1]] = ls.params[j] + q * bse[j];
    }

    let rsquared = if design.has_constant() {
        ls.centered_r_squared(y)
    } else {
        let tss = y.dot(&y);
        if tss > 0.0 {
            1.0 - ls.ssr / tss
        } else {
            0.0
        }
    };
    let rsquared_adj = if design.has_constant() {
        1.0 - (n - 1) as f64 / df * (1.0 - rsquared)
    } else {
        1.0 - n as f64 / df * (1.0 - rsquared)
    };

    let (f_stat, f_p_value) = match options.cov_type {
        CovarianceType::NonRobust if df_model > 0 => {
            let f = (rsquared / df_model as f64) / ((1.0 - rsquared) / df);
            (f, f_sf(f, df_model as f64, df))
        }
        _ if df_model > 0 => {
            let offset = k - df_model;
            let f = wald_f(&ls.params, &cov_params, offset);
            (f, f_sf(f, df_model as f64, df))
        }
        _ => (f64::NAN, f64::NAN),
    };

    Ok(FittedModel {
        dep_name: dep_name.to_string(),
        names: design.names().to_vec(),
        bse,
        tvalues,
        pvalues,
        conf_int,
        confidence: options.confidence,
        cov_params,
        resid: ls.residuals.clone(),
        fitted: ls.fitted.clone(),
        nobs: n,
        df_model,
        df_resid,
        ssr: ls.ssr,
        rsquared,
        rsquared_adj,
        f_stat,
        f_p_value,
        llf: ls.log_likelihood(),
        aic: ls.aic(),
        bic: ls.bic(),
        has_constant: design.has_constant(),
        cov_type: options.cov_type,
        hac_lags,
        use_t,
        params: ls.params,
    })
}

/// Wald F for `β[offset..] = 0`: `b'(V_bb)⁻¹b / q`. NaN if `V_bb` is singular.
fn wald_f(params: &Array1<f64>, cov: &Array2<f64>, offset: usize) -> f64 {
    let b = params.slice(s![offset..]);
    let v = cov.slice(s![offset.., offset..]).to_owned();
    match invert_spd(&v) {
        Some(v_inv) => b.dot(&v_inv.dot(&b)) / b.len() as f64,
        None => f64::NAN,
    }
}
