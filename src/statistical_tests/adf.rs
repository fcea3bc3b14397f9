//! statistical_tests::adf — Augmented Dickey–Fuller unit-root test.
//!
//! Purpose
//! -------
//! Test the null hypothesis that a series has a unit root against the
//! alternative that it is (trend-)stationary, using the regression
//!
//! ```text
//! Δy_t = d_t'δ + ρ·y_{t−1} + Σ_{j=1..p} γ_j·Δy_{t−j} + ε_t
//! ```
//!
//! where `d_t` holds the deterministic terms of [`AdfRegression`]. The test
//! statistic is the t-ratio of `ρ̂`.
//!
//! Key behaviors
//! -------------
//! - The augmentation order `p` is either fixed or chosen automatically by
//!   AIC, BIC, or a sequential t-stop rule ([`AutoLag`]).
//! - The default maximum order is `⌈12·(n/100)^{1/4}⌉`, capped at
//!   `n/2 − ntrend − 1`.
//! - All candidate orders are compared on one common sample (the one implied
//!   by the maximum order); the selected order is then refitted on the
//!   largest sample it allows.
//! - p-values and critical values come from
//!   [`mackinnon`](crate::statistical_tests::mackinnon).
//!
//! Invariants & assumptions
//! ------------------------
//! - Input is a finite series of at least `2·(ntrend + 2)` observations.
//! - The test is a pure function of `(data, options)`: no randomness.
//!
//! Downstream usage
//! ----------------
//! - The stationarity stage calls [`AdfOutcome::augmented_dickey_fuller`]
//!   on each raw and transformed series and reads the verdict via
//!   [`AdfOutcome::is_stationary`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover input guards, lag-order bounds, the t-stop rule, and
//!   opposite verdicts on a seeded random walk and a seeded AR(1).
use crate::{
    linalg::{least_squares, LeastSquares},
    statistical_tests::{
        errors::{TestError, TestResult},
        mackinnon::{mackinnon_crit_values, mackinnon_p_value, AdfRegression, CriticalValues},
        validation::{validate_series, validate_significance},
    },
};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

const T_STOP: f64 = 1.644_853_626_951_472_2;

/// Rule for choosing the augmentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AutoLag {
    /// Minimize the Akaike information criterion.
    #[default]
    Aic,
    /// Minimize the Bayesian information criterion.
    Bic,
    /// Start from the maximum order and drop lags until the last one is
    /// significant at 5% (two-sided normal).
    TStat,
    /// Use the maximum order as given.
    Fixed,
}

/// AdfOptions — configuration of the ADF test.
///
/// Fields
/// ------
/// - `regression`: deterministic terms (default: constant only).
/// - `autolag`: order-selection rule (default: AIC).
/// - `max_lag`: maximum augmentation order; `None` uses
///   `⌈12·(n/100)^{1/4}⌉` capped at `n/2 − ntrend − 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdfOptions {
    pub regression: AdfRegression,
    pub autolag: AutoLag,
    pub max_lag: Option<usize>,
}

/// AdfOutcome — result of an Augmented Dickey–Fuller test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdfOutcome {
    stat: f64,
    p_value: f64,
    used_lag: usize,
    nobs: usize,
    crit: CriticalValues,
    ic_best: Option<f64>,
    regression: AdfRegression,
}

impl AdfOutcome {
    /// Run the ADF test on `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Series in levels, oldest first.
    /// - `options`: `&AdfOptions`
    ///   Deterministic terms and order-selection rule.
    ///
    /// Returns
    /// -------
    /// `TestResult<AdfOutcome>` with the τ statistic, MacKinnon p-value,
    /// selected order, effective sample size, critical values, and the best
    /// information criterion (for `Aic`/`Bic`) or last |t| (for `TStat`).
    ///
    /// Errors
    /// ------
    /// - `TestError::InsufficientData` / `TestError::InvalidData` from input
    ///   validation.
    /// - `TestError::InvalidLag` if an explicit `max_lag` exceeds
    ///   `n/2 − ntrend − 1`.
    /// - `TestError::Regression` if a test regression is degenerate
    ///   (e.g. a constant series).
    pub fn augmented_dickey_fuller(data: &[f64], options: &AdfOptions) -> TestResult<Self> {
        let ntrend = options.regression.n_trend();
        validate_series(data, 2 * (ntrend + 2))?;
        let n = data.len();
        let cap = n / 2 - ntrend - 1;
        let max_lag = match options.max_lag {
            Some(m) if m > cap => return Err(TestError::InvalidLag { lags: m, nobs: n }),
            Some(m) => m,
            None => default_max_lag(n).min(cap),
        };

        let diff: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

        let (used_lag, ic_best) = match options.autolag {
            AutoLag::Fixed => (max_lag, None),
            rule => {
                let (lag, ic) = select_order(data, &diff, max_lag, options.regression, rule)?;
                (lag, Some(ic))
            }
        };

        let fit = adf_regression(data, &diff, used_lag, used_lag, options.regression)?;
        let stat = fit.t_value(ntrend);
        let nobs = fit.nobs;
        Ok(AdfOutcome {
            stat,
            p_value: mackinnon_p_value(stat, options.regression),
            used_lag,
            nobs,
            crit: mackinnon_crit_values(nobs, options.regression),
            ic_best,
            regression: options.regression,
        })
    }

    pub fn stat(&self) -> f64 {
        self.stat
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn used_lag(&self) -> usize {
        self.used_lag
    }

    pub fn nobs(&self) -> usize {
        self.nobs
    }

    pub fn crit(&self) -> CriticalValues {
        self.crit
    }

    pub fn ic_best(&self) -> Option<f64> {
        self.ic_best
    }

    pub fn regression(&self) -> AdfRegression {
        self.regression
    }

    /// Reject the unit-root null at level `alpha` (`p < alpha`).
    ///
    /// Errors
    /// ------
    /// - `TestError::InvalidSignificance` unless `0 < alpha < 1`.
    pub fn is_stationary(&self, alpha: f64) -> TestResult<bool> {
        validate_significance(alpha)?;
        Ok(self.p_value < alpha)
    }
}

/// `⌈12·(n/100)^{1/4}⌉` (Schwert's rule).
pub fn default_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize
}

/// Compare orders `0..=max_lag` on the common sample implied by `max_lag`.
fn select_order(
    level: &[f64], diff: &[f64], max_lag: usize, regression: AdfRegression, rule: AutoLag,
) -> TestResult<(usize, f64)> {
    let mut fits: Vec<LeastSquares> = Vec::with_capacity(max_lag + 1);
    for lag in 0..=max_lag {
        fits.push(adf_regression(level, diff, lag, max_lag, regression)?);
    }

    match rule {
        AutoLag::TStat => {
            let last_col = |lag: usize| regression.n_trend() + lag;
            let mut best = (0, 0.0);
            for lag in (0..=max_lag).rev() {
                let t = fits[lag].t_value(last_col(lag)).abs();
                best = (lag, t);
                if t >= T_STOP {
                    break;
                }
            }
            Ok(best)
        }
        _ => {
            let ic = |fit: &LeastSquares| match rule {
                AutoLag::Bic => fit.bic(),
                _ => fit.aic(),
            };
            let mut best = (0, ic(&fits[0]));
            for (lag, fit) in fits.iter().enumerate().skip(1) {
                let value = ic(fit);
                if value < best.1 {
                    best = (lag, value);
                }
            }
            Ok(best)
        }
    }
}

/// Fit the ADF regression with `lag` augmentation terms on the sample that
/// starts after `sample_lag` initial differences.
///
/// Column order: deterministic terms, lagged level, lagged differences.
fn adf_regression(
    level: &[f64], diff: &[f64], lag: usize, sample_lag: usize, regression: AdfRegression,
) -> TestResult<LeastSquares> {
    let ntrend = regression.n_trend();
    let rows: Vec<usize> = (sample_lag..diff.len()).collect();
    let nobs = rows.len();
    let ncols = ntrend + 1 + lag;
    if nobs <= ncols {
        return Err(TestError::InsufficientData {
            len: level.len(),
            required: ncols + sample_lag + 2,
        });
    }

    let mut x = Array2::<f64>::zeros((nobs, ncols));
    let mut y = Array1::<f64>::zeros(nobs);
    for (r, &t) in rows.iter().enumerate() {
        y[r] = diff[t];
        let mut c = 0;
        if ntrend >= 1 {
            x[[r, c]] = 1.0;
            c += 1;
        }
        if ntrend == 2 {
            x[[r, c]] = (r + 1) as f64;
            c += 1;
        }
        x[[r, c]] = level[t];
        c += 1;
        for j in 1..=lag {
            x[[r, c]] = diff[t - j];
            c += 1;
        }
    }
    Ok(least_squares(&x, y.view())?)
}
