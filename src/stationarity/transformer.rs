//! stationarity::transformer — test, transform, and re-test every series.
//!
//! Purpose
//! -------
//! Turn the aligned raw table into a stationary analysis panel. Each series
//! is tested with the ADF test, its verdict is recorded, the fixed policy
//! transform is applied, and the transformed series is tested again. The
//! transformed columns are then re-aligned on date so the panel has no
//! missing values.
//!
//! Key behaviors
//! -------------
//! - Raw tests for every column run before any transform, mirroring the
//!   order in which the report lists them. [`StationarityPass`] exposes the
//!   individual steps so a caller can report each outcome as it lands.
//! - The dependent series is passed through unchanged after its own
//!   confirmatory test.
//! - A regressor is transformed only when its verdict is `NonStationary`.
//!   Setting `always_transform` applies the policy transform regardless.
//!
//! Invariants & assumptions
//! ------------------------
//! - The output panel is inner-joined: dates strictly increasing, no NaN.
//! - Regressors without a rule keep their raw name and values.
use crate::{
    data::{SeriesTable, TimeSeries},
    stationarity::{
        errors::{StationarityError, StationarityResult},
        transform::Transform,
        verdict::StationarityVerdict,
    },
    statistical_tests::{AdfOptions, AdfOutcome},
};
use serde::{Deserialize, Serialize};

/// TransformRule — policy entry for one raw series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    /// Raw column name, e.g. `"cpi"`.
    pub series: String,
    /// Column name after the transform, e.g. `"inflation"`.
    pub output: String,
    pub transform: Transform,
}

impl TransformRule {
    pub fn new(series: &str, output: &str, transform: Transform) -> Self {
        TransformRule { series: series.to_string(), output: output.to_string(), transform }
    }
}

/// TransformPolicy — fixed per-series transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPolicy {
    pub rules: Vec<TransformRule>,
    pub always_transform: bool,
}

impl Default for TransformPolicy {
    /// Rates and the volatility index are differenced; CPI becomes percent
    /// inflation.
    fn default() -> Self {
        TransformPolicy {
            rules: vec![
                TransformRule::new("ffr", "d_ffr", Transform::FirstDifference),
                TransformRule::new("gs10", "d_gs10", Transform::FirstDifference),
                TransformRule::new("cpi", "inflation", Transform::PercentChange { scale: 100.0 }),
                TransformRule::new("vix", "d_vix", Transform::FirstDifference),
            ],
            always_transform: false,
        }
    }
}

impl TransformPolicy {
    pub fn rule_for(&self, series: &str) -> Option<&TransformRule> {
        self.rules.iter().find(|r| r.series == series)
    }
}

/// SeriesAssessment — test history of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesAssessment {
    pub raw_name: String,
    pub output_name: String,
    pub raw_test: AdfOutcome,
    pub verdict: StationarityVerdict,
    /// Transform actually applied; equals the verdict's unless
    /// `always_transform` is set.
    pub applied: Transform,
    pub transformed_test: AdfOutcome,
    pub transformed_len: usize,
}

/// StationaryPanel — the aligned stationary table plus per-series history.
#[derive(Debug, Clone, PartialEq)]
pub struct StationaryPanel {
    pub table: SeriesTable,
    pub dependent: String,
    pub assessments: Vec<SeriesAssessment>,
}

impl StationaryPanel {
    /// Output names of the regressors, in table order.
    pub fn regressors(&self) -> Vec<String> {
        self.table.names().iter().filter(|n| **n != self.dependent).cloned().collect()
    }
}

/// StationarityPass — per-series steps of [`make_stationary`].
///
/// Callers that report progress drive the two phases themselves: call
/// [`raw_test`](Self::raw_test) for every column, then
/// [`assess`](Self::assess) for every raw outcome, then
/// [`finish`](Self::finish). Each step fails independently, so outcomes
/// produced before a failure can be surfaced.
#[derive(Debug, Clone, Copy)]
pub struct StationarityPass<'a> {
    table: &'a SeriesTable,
    dependent: &'a str,
    policy: &'a TransformPolicy,
    adf: &'a AdfOptions,
    alpha: f64,
}

impl<'a> StationarityPass<'a> {
    /// Errors
    /// ------
    /// - `StationarityError::MissingDependent` if `dependent` is absent.
    pub fn new(
        table: &'a SeriesTable, dependent: &'a str, policy: &'a TransformPolicy,
        adf: &'a AdfOptions, alpha: f64,
    ) -> StationarityResult<Self> {
        if table.column(dependent).is_none() {
            return Err(StationarityError::MissingDependent(dependent.to_string()));
        }
        Ok(StationarityPass { table, dependent, policy, adf, alpha })
    }

    /// Column names in table order.
    pub fn names(&self) -> &'a [String] {
        self.table.names()
    }

    /// ADF test of the raw column `name`.
    pub fn raw_test(&self, name: &str) -> StationarityResult<AdfOutcome> {
        let values = self.table.require(name)?;
        AdfOutcome::augmented_dickey_fuller(&values.to_vec(), self.adf)
            .map_err(StationarityError::test(name))
    }

    /// Decide the verdict for `name`, transform it, and re-test.
    ///
    /// The policy transform is applied only when the verdict is
    /// `NonStationary`, unless `always_transform` is set. The dependent
    /// series is never transformed.
    pub fn assess(
        &self, name: &str, raw_test: AdfOutcome,
    ) -> StationarityResult<(SeriesAssessment, TimeSeries)> {
        let rule = if name == self.dependent { None } else { self.policy.rule_for(name) };
        let prescribed = rule.map(|r| r.transform).unwrap_or_default();
        let verdict = StationarityVerdict::decide(&raw_test, self.alpha, prescribed)
            .map_err(StationarityError::test(name))?;
        let applied = if self.policy.always_transform { prescribed } else { verdict.transform() };
        let output_name = match rule {
            Some(r) if applied != Transform::None => r.output.clone(),
            _ => name.to_string(),
        };

        let values = self.table.require(name)?;
        let out = applied.apply(values);
        let dates = &self.table.dates()[applied.dropped_rows()..];
        let finite: Vec<f64> = out.iter().copied().filter(|v| v.is_finite()).collect();
        let transformed_test = AdfOutcome::augmented_dickey_fuller(&finite, self.adf)
            .map_err(StationarityError::test(&output_name))?;

        let series = TimeSeries::from_pairs(
            output_name.clone(),
            dates.iter().copied().zip(out.iter().copied()),
        );
        let assessment = SeriesAssessment {
            raw_name: name.to_string(),
            output_name,
            raw_test,
            verdict,
            applied,
            transformed_test,
            transformed_len: out.len(),
        };
        Ok((assessment, series))
    }

    /// Inner-join the assessed series into the panel, dependent first.
    ///
    /// Errors
    /// ------
    /// - `StationarityError::EmptyPanel` if alignment leaves no rows.
    pub fn finish(
        self, assessed: Vec<(SeriesAssessment, TimeSeries)>,
    ) -> StationarityResult<StationaryPanel> {
        let (assessments, mut transformed): (Vec<_>, Vec<_>) = assessed.into_iter().unzip();
        if let Some(pos) = assessments.iter().position(|a| a.raw_name == self.dependent) {
            let dep = transformed.remove(pos);
            transformed.insert(0, dep);
        }
        let panel = SeriesTable::inner_join(&transformed)?;
        if panel.is_empty() {
            return Err(StationarityError::EmptyPanel);
        }
        Ok(StationaryPanel { table: panel, dependent: self.dependent.to_string(), assessments })
    }
}

/// Test and transform every column of `table`.
///
/// Parameters
/// ----------
/// - `table`: aligned raw series.
/// - `dependent`: name of the dependent column, passed through untransformed.
/// - `policy`: per-series transforms.
/// - `adf`: ADF configuration.
/// - `alpha`: significance level of the verdict.
///
/// Errors
/// ------
/// - `StationarityError::MissingDependent` if `dependent` is absent.
/// - `StationarityError::Test` if an ADF test cannot run, or `alpha` is
///   outside `(0, 1)`.
/// - `StationarityError::EmptyPanel` if alignment leaves no rows.
pub fn make_stationary(
    table: &SeriesTable, dependent: &str, policy: &TransformPolicy, adf: &AdfOptions, alpha: f64,
) -> StationarityResult<StationaryPanel> {
    let pass = StationarityPass::new(table, dependent, policy, adf, alpha)?;

    // Raw pass over every column first.
    let raw = pass
        .names()
        .iter()
        .map(|name| pass.raw_test(name).map(|outcome| (name, outcome)))
        .collect::<StationarityResult<Vec<_>>>()?;
    let assessed = raw
        .into_iter()
        .map(|(name, raw_test)| pass.assess(name, raw_test))
        .collect::<StationarityResult<Vec<_>>>()?;
    pass.finish(assessed)
}
