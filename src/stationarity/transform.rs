//! stationarity::transform — fixed per-series stationarity transforms.
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transform — how a non-stationary series is made stationary.
///
/// - `None`: identity.
/// - `FirstDifference`: `x_t − x_{t−1}`.
/// - `PercentChange { scale }`: `scale · (x_t / x_{t−1} − 1)`; a zero base
///   yields NaN, which alignment later drops.
///
/// Both non-trivial transforms drop exactly one leading observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    #[default]
    None,
    FirstDifference,
    PercentChange { scale: f64 },
}

impl Transform {
    /// Apply to `values` (oldest first). The output has
    /// `values.len() − dropped_rows()` entries, aligned with the input tail.
    pub fn apply(&self, values: ArrayView1<'_, f64>) -> Array1<f64> {
        match self {
            Transform::None => values.to_owned(),
            Transform::FirstDifference => {
                values.windows(2).into_iter().map(|w| w[1] - w[0]).collect()
            }
            Transform::PercentChange { scale } => values
                .windows(2)
                .into_iter()
                .map(|w| if w[0] == 0.0 { f64::NAN } else { scale * (w[1] / w[0] - 1.0) })
                .collect(),
        }
    }

    /// Leading observations lost to the transform.
    pub fn dropped_rows(&self) -> usize {
        match self {
            Transform::None => 0,
            Transform::FirstDifference | Transform::PercentChange { .. } => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transform::None => "none",
            Transform::FirstDifference => "first-difference",
            Transform::PercentChange { .. } => "percent-change",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
