//! pipeline — the end-to-end report run.
//!
//! Purpose
//! -------
//! Drive the linear chain fetch → stationarity → lag selection → OLS with
//! HAC → diagnostics → plots, logging every intermediate statistic at INFO.
//!
//! Key behaviors
//! -------------
//! - The date window is validated before the source is touched.
//! - Any failure up to and including diagnostics aborts the run; lines already
//!   logged stay visible. ADF outcomes are logged one series at a time as
//!   they are computed.
//! - Plot failures are logged at WARN and never fail the run.
//! - Lag selection is informational: the final regression always uses the
//!   current-period regressors.
//!
//! Conventions
//! -----------
//! - Log lines are emitted in this order: row count, raw ADF tests,
//!   transformed ADF tests, lag selection, regression summary, SSR/FPE,
//!   autocorrelation and heteroskedasticity tests, normality test, CUSUM.
use crate::{
    config::{ConfigError, PipelineConfig},
    data::{build_table, DataUnavailableError, DateRange, SeriesSource, ValidationError},
    diagnostics::{run_diagnostics, DiagnosticReport},
    regression::{
        fit_ols, select_lag_length, Design, EstimationError, FittedModel, LagSelection,
        OlsSummary,
    },
    report::{CusumPlot, ForestPlot, ReportSink},
    stationarity::{SeriesAssessment, StationarityError, StationarityPass},
    statistical_tests::AdfOutcome,
};
use ndarray::ArrayView1;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal failures of a report run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Data(#[from] DataUnavailableError),

    /// Unit-root testing or transforming failed.
    #[error(transparent)]
    Stationarity(#[from] StationarityError),

    #[error(transparent)]
    Estimation(#[from] EstimationError),
}

/// PipelineReport — everything a run computed.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub range: DateRange,
    /// Rows of the aligned raw table.
    pub rows: usize,
    /// Rows of the stationary regression sample.
    pub sample_rows: usize,
    pub assessments: Vec<SeriesAssessment>,
    pub lag_selection: LagSelection,
    pub model: FittedModel,
    pub diagnostics: DiagnosticReport,
    /// Figures the sink accepted, in the order forest, CUSUM.
    pub plots: Vec<PathBuf>,
}

impl PipelineReport {
    /// Machine-readable digest of the run.
    pub fn to_json(&self) -> serde_json::Value {
        let m = &self.model;
        serde_json::json!({
            "start": self.range.start().to_string(),
            "end": self.range.end().to_string(),
            "rows": self.rows,
            "sample_rows": self.sample_rows,
            "stationarity": self.assessments,
            "lag_selection": self.lag_selection,
            "model": {
                "dep_variable": m.dep_name,
                "nobs": m.nobs,
                "cov_type": m.cov_label(),
                "rsquared": m.rsquared,
                "rsquared_adj": m.rsquared_adj,
                "f_stat": m.f_stat,
                "f_p_value": m.f_p_value,
                "llf": m.llf,
                "aic": m.aic,
                "bic": m.bic,
                "coefficients": m.coefficients(),
            },
            "diagnostics": self.diagnostics,
            "plots": self.plots,
        })
    }
}

/// Run the full report.
///
/// Parameters
/// ----------
/// - `config`: run configuration.
/// - `start`, `end`: window bounds in `config.date_format`; the configured
///   defaults are used when `None`.
/// - `source`: series retrieval capability.
/// - `sink`: figure output capability.
///
/// Errors
/// ------
/// - `PipelineError::Config` for an inconsistent configuration.
/// - `PipelineError::Validation` for a malformed or inverted window, before
///   `source` is invoked.
/// - `PipelineError::Data` when a series is unavailable.
/// - `PipelineError::Stationarity` or `PipelineError::Estimation` for
///   degenerate statistical input.
pub fn run_pipeline(
    config: &PipelineConfig, start: Option<&str>, end: Option<&str>, source: &dyn SeriesSource,
    sink: &mut dyn ReportSink,
) -> PipelineResult<PipelineReport> {
    config.validate()?;
    let range = DateRange::parse(
        start.unwrap_or(&config.default_start),
        end.unwrap_or(&config.default_end),
        &config.date_format,
    )?;
    debug!("Report window {} to {}", range.start(), range.end());

    let table = build_table(source, &range, &config.series)?;
    info!("Combined table columns: {:?}", table.names());
    info!("Downloaded data with {} rows.", table.nrows());

    let pass = StationarityPass::new(
        &table,
        &config.dependent,
        &config.transforms,
        &config.adf,
        config.significance,
    )?;
    let mut raw = Vec::with_capacity(table.ncols());
    for name in pass.names() {
        let outcome = pass.raw_test(name)?;
        log_adf(name, &outcome);
        raw.push((name, outcome));
    }
    let mut assessed = Vec::with_capacity(raw.len());
    for (name, outcome) in raw {
        let (a, series) = pass.assess(name, outcome)?;
        debug!("{}: {:?}, applied {}", a.raw_name, a.verdict, a.applied);
        log_adf(&a.output_name, &a.transformed_test);
        assessed.push((a, series));
    }
    let panel = pass.finish(assessed)?;

    let y = panel.table.require(&panel.dependent).map_err(StationarityError::from)?;
    let regressors = panel.regressors();
    let mut columns: Vec<(String, ArrayView1<'_, f64>)> = Vec::with_capacity(regressors.len());
    for name in regressors {
        let column = panel.table.require(&name).map_err(StationarityError::from)?;
        columns.push((name, column));
    }

    let lag_selection = select_lag_length(y, &columns, config.max_lag, config.lag_selection)?;
    info!("Optimal lags by AIC/BIC/FPE: {lag_selection}");

    let design = Design::with_constant(&columns)?;
    let model = fit_ols(&panel.dependent, y, &design, &config.ols_options())?;
    info!("\n{}", OlsSummary::new(&model));

    let diagnostics = run_diagnostics(&model, &design, &config.diagnostics)?;
    info!("SSR={:.6}, FPE={:.6e}", diagnostics.ssr, diagnostics.fpe);
    info!(
        "Durbin–Watson={:.4}, BG p={:.4}, White p={:.10e}",
        diagnostics.durbin_watson,
        diagnostics.breusch_godfrey.lm_p_value,
        diagnostics.white.lm_p_value
    );
    info!(
        "Jarque–Bera stat={:.4}, p={:.4}",
        diagnostics.jarque_bera.stat, diagnostics.jarque_bera.p_value
    );
    info!("CUSUM test stat={:.4}, p={:.4}", diagnostics.cusum.stat, diagnostics.cusum.p_value);

    let plots = render_plots(sink, &model, &diagnostics, panel.table.dates());

    Ok(PipelineReport {
        range,
        rows: table.nrows(),
        sample_rows: panel.table.nrows(),
        assessments: panel.assessments,
        lag_selection,
        model,
        diagnostics,
        plots,
    })
}

fn log_adf(name: &str, outcome: &AdfOutcome) {
    let crit = outcome.crit();
    info!(
        "ADF test {name}: stat={:.4}, p={:.4e}, crit(1%)={:.4}, crit(5%)={:.4}, crit(10%)={:.4}",
        outcome.stat(),
        outcome.p_value(),
        crit.one,
        crit.five,
        crit.ten
    );
}

fn render_plots(
    sink: &mut dyn ReportSink, model: &FittedModel, diagnostics: &DiagnosticReport,
    dates: &[chrono::NaiveDate],
) -> Vec<PathBuf> {
    let mut written = Vec::with_capacity(2);
    match sink.forest_plot(&ForestPlot::from_model(model)) {
        Ok(path) => {
            info!("Coefficient plot written to {}", path.display());
            written.push(path);
        }
        Err(err) => warn!("Coefficient plot skipped: {err}"),
    }
    match &diagnostics.recursive_cusum {
        Some(rc) => match sink.cusum_plot(&CusumPlot::from_recursive(rc, dates)) {
            Ok(path) => {
                info!("CUSUM plot written to {}", path.display());
                written.push(path);
            }
            Err(err) => warn!("CUSUM plot skipped: {err}"),
        },
        None => warn!("CUSUM plot skipped: no recursive residuals"),
    }
    written
}
