//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the error type used by HAC
//! bandwidth selection and score-covariance estimation. It groups together
//! domain-specific failures (nonstationary plug-in fits, numerical
//! underflow, empty inputs). An alias `InferenceResult<T>` standardizes the
//! return type across inference code.

/// Unified error type for inference routines.
///
/// Covers plug-in bandwidth calculation failures, unsupported settings, and
/// degenerate score matrices, with readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Bandwidth selection ----
    /// Stationarity is violated in an AR(1) process.
    StationarityViolated { phi: f64 },

    /// Denominator is too close to zero in bandwidth calculation.
    DenominatorTooSmall { denominator: f64 },

    /// Order not supported for bandwidth calculation.
    OrderNotSupported { ord: usize },

    /// Too few observations to fit the AR(1) plug-in regression.
    TooFewObservations { n: usize },

    // ---- Score covariance ----
    /// Score matrix has no rows or no columns.
    EmptyScores { rows: usize, cols: usize },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Bandwidth selection ----
            InferenceError::StationarityViolated { phi } => {
                write!(f, "Inference Error: Stationarity violated (phi = {})", phi)
            }
            InferenceError::DenominatorTooSmall { denominator } => write!(
                f,
                "Inference Error: Denominator too small ({}) in bandwidth calculation",
                denominator
            ),
            InferenceError::OrderNotSupported { ord } => {
                write!(f, "Inference Error: Order {} not supported for bandwidth calculation", ord)
            }
            InferenceError::TooFewObservations { n } => {
                write!(f, "Inference Error: {} observations are too few for an AR(1) fit", n)
            }

            // ---- Score covariance ----
            InferenceError::EmptyScores { rows, cols } => {
                write!(f, "Inference Error: Score matrix is empty ({}×{})", rows, cols)
            }
        }
    }
}
