//! regression::errors — failures of model fitting and lag selection.
//!
//! `EstimationError` is the fatal error kind raised when a regression cannot
//! be fitted: too few observations for the requested specification, a
//! rank-deficient design, mismatched shapes, or non-finite input. Failures
//! from the HAC layer and from residual tests are wrapped so the pipeline can
//! report them under one kind.
use crate::{inference::InferenceError, linalg::LinalgError, statistical_tests::TestError};
use thiserror::Error;

pub type EstimationResult<T> = Result<T, EstimationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("Insufficient observations: {nobs} available, at least {required} required.")]
    InsufficientObservations { nobs: usize, required: usize },

    #[error("Regressor matrix is rank deficient: rank {rank} < {cols} columns.")]
    RankDeficient { rank: usize, cols: usize },

    #[error("Dimension mismatch: design has {rows} rows, response has {len} entries.")]
    DimensionMismatch { rows: usize, len: usize },

    #[error("Non-finite value in regression input.")]
    NonFiniteInput,

    #[error("Maximum lag must be at least 1.")]
    ZeroMaxLag,

    #[error(transparent)]
    Test(#[from] TestError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl From<LinalgError> for EstimationError {
    fn from(err: LinalgError) -> Self {
        match err {
            LinalgError::InsufficientObservations { nobs, cols } => {
                EstimationError::InsufficientObservations { nobs, required: cols + 1 }
            }
            LinalgError::RankDeficient { rank, cols } => {
                EstimationError::RankDeficient { rank, cols }
            }
            LinalgError::DimensionMismatch { rows, len } => {
                EstimationError::DimensionMismatch { rows, len }
            }
            LinalgError::NonFinite => EstimationError::NonFiniteInput,
        }
    }
}
