//! stationarity::verdict — the two-branch stationarity decision.
use crate::{
    stationarity::transform::Transform,
    statistical_tests::{AdfOutcome, TestResult},
};
use serde::Serialize;

/// StationarityVerdict — outcome of testing a raw series.
///
/// `NonStationary` carries the transform the policy prescribes for the
/// series, so each branch is explicit at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum StationarityVerdict {
    Stationary,
    NonStationary { transform: Transform },
}

impl StationarityVerdict {
    /// Stationary iff the ADF p-value is below `alpha`.
    ///
    /// Errors
    /// ------
    /// - `TestError::InvalidSignificance` unless `0 < alpha < 1`.
    pub fn decide(outcome: &AdfOutcome, alpha: f64, transform: Transform) -> TestResult<Self> {
        Ok(if outcome.is_stationary(alpha)? {
            StationarityVerdict::Stationary
        } else {
            StationarityVerdict::NonStationary { transform }
        })
    }

    pub fn is_stationary(&self) -> bool {
        matches!(self, StationarityVerdict::Stationary)
    }

    /// Transform implied by the verdict alone.
    pub fn transform(&self) -> Transform {
        match self {
            StationarityVerdict::Stationary => Transform::None,
            StationarityVerdict::NonStationary { transform } => *transform,
        }
    }
}
