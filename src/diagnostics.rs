//! diagnostics — residual analysis of a fitted regression.
//!
//! Purpose
//! -------
//! Run every read-only check the report prints after the regression table:
//! SSR and FPE, Durbin–Watson, Breusch–Godfrey, White, Jarque–Bera, and the
//! OLS-residual CUSUM test. The recursive-residual CUSUM path used by the
//! stability plot is computed here as well.
//!
//! Key behaviors
//! -------------
//! - Auxiliary regressions reuse the model's own design matrix.
//! - A failing numeric test is an [`EstimationError`]; a failing recursive
//!   CUSUM only removes the plot data and is logged at WARN.
//! - Nothing here modifies the fitted model.
use crate::{
    regression::{Design, EstimationError, EstimationResult, FittedModel},
    statistical_tests::{
        durbin_watson, BreuschGodfrey, CusumOls, JarqueBera, RecursiveCusum, WhiteTest,
    },
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// DiagnosticOptions — tuning of the residual tests.
///
/// - `bg_lags`: Breusch–Godfrey order (default 1).
/// - `cusum_alpha`: significance of the recursive CUSUM bounds (0.01, 0.05,
///   or 0.10; default 0.05).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticOptions {
    pub bg_lags: usize,
    pub cusum_alpha: f64,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        DiagnosticOptions { bg_lags: 1, cusum_alpha: 0.05 }
    }
}

/// DiagnosticReport — statistics of every residual test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub ssr: f64,
    pub fpe: f64,
    pub durbin_watson: f64,
    pub breusch_godfrey: BreuschGodfrey,
    pub white: WhiteTest,
    pub jarque_bera: JarqueBera,
    pub cusum: CusumOls,
    /// Recursive-residual CUSUM path and bounds, when computable.
    pub recursive_cusum: Option<RecursiveCusum>,
}

/// Run all diagnostics on `model`, which was fitted on `design`.
///
/// Errors
/// ------
/// - `EstimationError::DimensionMismatch` if `design` does not match the
///   model's sample.
/// - `EstimationError::Test` if any numeric test cannot be computed.
pub fn run_diagnostics(
    model: &FittedModel, design: &Design, options: &DiagnosticOptions,
) -> EstimationResult<DiagnosticReport> {
    if design.nobs() != model.nobs {
        return Err(EstimationError::DimensionMismatch { rows: design.nobs(), len: model.nobs });
    }
    let resid = model.resid.to_vec();
    let exog = design.matrix();

    let durbin_watson = durbin_watson(&resid)?;
    let breusch_godfrey = BreuschGodfrey::breusch_godfrey(&resid, exog, options.bg_lags)?;
    let white = WhiteTest::white(&resid, exog)?;
    let jarque_bera = JarqueBera::jarque_bera(&resid)?;
    let cusum = CusumOls::cusum_ols(&resid, model.k())?;

    let y = &model.fitted + &model.resid;
    let recursive_cusum = match RecursiveCusum::recursive_cusum(y.view(), exog, options.cusum_alpha)
    {
        Ok(path) => Some(path),
        Err(err) => {
            warn!("Recursive CUSUM unavailable: {err}");
            None
        }
    };

    Ok(DiagnosticReport {
        ssr: model.ssr,
        fpe: model.fpe(),
        durbin_watson,
        breusch_godfrey,
        white,
        jarque_bera,
        cusum,
        recursive_cusum,
    })
}
