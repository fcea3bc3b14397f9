//! inference — HAC score covariance, kernels, and bandwidth rules.
//!
//! Purpose
//! -------
//! Provide the robust-covariance building blocks the regression layer uses
//! for Newey–West standard errors: kernel tapers, bandwidth regimes, and the
//! HAC aggregation of per-observation scores.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for inference-specific failures (plug-in
//!   stationarity, tiny denominators, empty inputs).
//! - Configure HAC behavior via [`HACOptions`], including kernel choice,
//!   [`Bandwidth`] regime (fixed, plug-in, or Newey–West rule), centering,
//!   and small-sample corrections.
//! - Enumerate HAC kernel families with [`KernelType`] and expose the
//!   Andrews plug-in rule via [`KernelType::optimal_bandwidth`].
//! - Build IID / HAC covariance matrices of average per-observation scores
//!   via [`calculate_avg_scores_cov`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Score matrices are `n × p` with rows as observations.
//! - Plug-in bandwidth selection enforces a stationarity margin on the
//!   AR(1) fits and falls back to `⌊n^{1/4}⌉` when the plug-in is unstable.
//! - All routines return [`InferenceError`] on failure rather than
//!   panicking.
//!
//! Conventions
//! -----------
//! - Bandwidths are in lag units of the original monthly index.
//! - Functions are pure: no logging and no global state.
//!
//! Downstream usage
//! ----------------
//! - `regression::ols` forms OLS scores `x_t·e_t`, calls
//!   [`calculate_avg_scores_cov`], and wraps the result in the sandwich
//!   `n·(X'X)⁻¹ S (X'X)⁻¹`.

pub mod errors;
pub mod hac;
pub mod kernel;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hac::{calculate_avg_scores_cov, Bandwidth, HACOptions};
pub use self::kernel::{newey_west_rule, KernelType};

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use macro_timeseries::inference::prelude::*;` to
// import the primary inference surface in a single line.

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hac::{calculate_avg_scores_cov, Bandwidth, HACOptions};
    pub use super::kernel::KernelType;
}
