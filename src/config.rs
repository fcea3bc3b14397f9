//! config — the explicit configuration object of a report run.
//!
//! Purpose
//! -------
//! Gather every tunable constant of the pipeline (date format and default
//! window, lag grid, significance level, ADF and HAC settings, the series to
//! fetch and how to transform them, provider timeout, plot output) into one
//! value that is passed into [`run_pipeline`](crate::pipeline::run_pipeline).
//! Constants are set here or in TOML, never by command-line flags.
//!
//! Key behaviors
//! -------------
//! - [`PipelineConfig::default`] reproduces the standard five-series report.
//! - TOML files overlay the defaults: any omitted key keeps its default.
//! - [`PipelineConfig::validate`] rejects inconsistent settings before any
//!   data is fetched.
use crate::{
    data::SeriesSpec,
    diagnostics::DiagnosticOptions,
    inference::HACOptions,
    regression::{CovarianceType, LagModel, OlsOptions},
    report::PlotFormat,
    statistical_tests::{cusum_bound_constant, AdfOptions},
    stationarity::TransformPolicy,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// PipelineConfig — every constant of a report run.
///
/// Fields
/// ------
/// - `date_format`: `chrono` format of the window arguments.
/// - `default_start`, `default_end`: window used when no dates are given.
/// - `max_lag`: largest order of the lag-selection grid.
/// - `significance`: level of the stationarity verdicts.
/// - `adf`: unit-root test settings.
/// - `lag_selection`: model form used for lag selection.
/// - `hac`: kernel and bandwidth of the robust covariance.
/// - `hac_df_correction`: scale the HAC covariance by `n/(n−k)`.
/// - `diagnostics`: Breusch–Godfrey order and CUSUM bound level.
/// - `series`: series to fetch, in table order.
/// - `dependent`: name of the dependent series.
/// - `transforms`: per-series stationarity transforms.
/// - `timeout_secs`: HTTP timeout of the data providers.
/// - `output_dir`, `plot_format`: where and how figures are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub date_format: String,
    pub default_start: String,
    pub default_end: String,
    pub max_lag: usize,
    pub significance: f64,
    pub adf: AdfOptions,
    pub lag_selection: LagModel,
    pub hac: HACOptions,
    pub hac_df_correction: bool,
    pub diagnostics: DiagnosticOptions,
    pub series: Vec<SeriesSpec>,
    pub dependent: String,
    pub transforms: TransformPolicy,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
    pub plot_format: PlotFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            date_format: "%Y-%m-%d".to_string(),
            default_start: "2020-01-01".to_string(),
            default_end: "2024-04-30".to_string(),
            max_lag: 6,
            significance: 0.05,
            adf: AdfOptions::default(),
            lag_selection: LagModel::default(),
            hac: HACOptions::default(),
            hac_df_correction: true,
            diagnostics: DiagnosticOptions::default(),
            series: SeriesSpec::defaults(),
            dependent: "ndx_ret".to_string(),
            transforms: TransformPolicy::default(),
            timeout_secs: 30,
            output_dir: PathBuf::from("plots"),
            plot_format: PlotFormat::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a TOML document over the defaults and validate the result.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check cross-field consistency.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::Validation` when `max_lag` or `timeout_secs` is zero,
    ///   a probability lies outside `(0, 1)`, the CUSUM level is not 1%, 5%,
    ///   or 10%, series names repeat, or `dependent` is not among `series`.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_lag == 0 {
            return Err(invalid("max_lag must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs must be at least 1"));
        }
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(invalid(format!("significance {} must lie in (0, 1)", self.significance)));
        }
        if cusum_bound_constant(self.diagnostics.cusum_alpha).is_none() {
            return Err(invalid(format!(
                "cusum_alpha {} must be one of 0.01, 0.05, 0.10",
                self.diagnostics.cusum_alpha
            )));
        }
        if self.series.is_empty() {
            return Err(invalid("at least one series is required"));
        }
        for (i, spec) in self.series.iter().enumerate() {
            if self.series[..i].iter().any(|s| s.name == spec.name) {
                return Err(invalid(format!("series '{}' is listed twice", spec.name)));
            }
        }
        if !self.series.iter().any(|s| s.name == self.dependent) {
            let msg = format!("dependent '{}' is not a configured series", self.dependent);
            return Err(invalid(msg));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Estimator settings for the final regression.
    pub fn ols_options(&self) -> OlsOptions {
        OlsOptions {
            cov_type: CovarianceType::Hac(self.hac),
            df_correction: self.hac_df_correction,
            ..OlsOptions::default()
        }
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Validation(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{inference::Bandwidth, stationarity::Transform};
    use std::io::Write;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults of the standard report.
    // - Partial TOML overlays and file loading.
    // - Validation failures.
    // -------------------------------------------------------------------------

    #[test]
    fn default_config_describes_standard_report() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.series.len(), 5);
        assert_eq!(config.dependent, "ndx_ret");
        assert_eq!(config.max_lag, 6);
        assert_eq!(config.hac.bandwidth, Bandwidth::Fixed(1));
        assert_eq!(config.diagnostics.bg_lags, 1);
        assert!(config.ols_options().df_correction);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("plots"));
    }

    #[test]
    // Purpose
    // -------
    // A TOML file that names only a few keys keeps every other default.
    //
    // Given
    // -----
    // - TOML overriding `max_lag`, the HAC bandwidth, the plot output, the
    //   provider timeout, and the transform policy flag.
    //
    // Expect
    // ------
    // - Overridden keys take the new values; the series list and transform
    //   rules stay at their defaults.
    fn toml_overlay_keeps_unspecified_defaults() {
        // Arrange
        let text = r#"
            max_lag = 3
            plot_format = "png"
            output_dir = "figures"
            timeout_secs = 5

            [hac]
            bandwidth = "newey_west_rule"

            [transforms]
            always_transform = true
        "#;

        // Act
        let config = PipelineConfig::from_toml_str(text).unwrap();

        // Assert
        assert_eq!(config.max_lag, 3);
        assert_eq!(config.plot_format, PlotFormat::Png);
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.hac.bandwidth, Bandwidth::NeweyWestRule);
        assert!(config.transforms.always_transform);
        assert!(!PipelineConfig::default().transforms.always_transform);
        assert_eq!(config.transforms.rules.len(), 4);
        assert_eq!(
            config.transforms.rule_for("cpi").map(|r| r.transform),
            Some(Transform::PercentChange { scale: 100.0 })
        );
        assert_eq!(config.series, SeriesSpec::defaults());
    }

    #[test]
    fn from_toml_file_reads_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "significance = 0.10\ndefault_start = \"2018-01-01\"").unwrap();
        let config = PipelineConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.significance, 0.10);
        assert_eq!(config.default_start, "2018-01-01");
    }

    #[test]
    fn validate_rejects_inconsistent_settings() {
        let cases = [
            "max_lag = 0",
            "timeout_secs = 0",
            "significance = 1.5",
            "dependent = \"spx_ret\"",
            "[diagnostics]\ncusum_alpha = 0.2",
        ];
        for text in cases {
            let err = PipelineConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "{text}: {err}");
        }
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = PipelineConfig::from_toml_str("max_lag = \"six\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
