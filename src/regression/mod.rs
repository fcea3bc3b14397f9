//! regression — least-squares estimation, summaries, and lag selection.
//!
//! Purpose
//! -------
//! Fit the report's linear regression and choose lag orders. This module
//! owns the named design matrices, the OLS estimator with classical or HAC
//! covariance, the plain-text summary table, and the information-criterion
//! lag selector.
//!
//! Key behaviors
//! -------------
//! - [`Design`] pairs a regressor matrix with column names; `const` first.
//! - [`fit_ols`] returns a [`FittedModel`] with coefficients, standard
//!   errors, intervals, and fit statistics under [`CovarianceType`].
//! - [`OlsSummary`] renders a fitted model as a fixed-width table.
//! - [`select_lag_length`] scores lag orders `1..=max_lag` by AIC, BIC, and
//!   FPE under a [`LagModel`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite and aligned; violations surface as
//!   [`EstimationError`], never as panics.
//! - Lag selection does not alter the final regression specification.
//!
//! Downstream usage
//! ----------------
//! - `pipeline` builds a contemporaneous [`Design`], calls [`fit_ols`] with
//!   the configured HAC options, logs [`OlsSummary`], and hands the model
//!   to `diagnostics` and `report`.

pub mod design;
pub mod errors;
pub mod lag_selection;
pub mod ols;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::design::{lagged_design, Design, CONST_NAME};
pub use self::errors::{EstimationError, EstimationResult};
pub use self::lag_selection::{select_lag_length, LagCriteria, LagModel, LagSelection};
pub use self::ols::{fit_ols, CoefficientRow, CovarianceType, FittedModel, OlsOptions};
pub use self::summary::OlsSummary;

pub mod prelude {
    pub use super::design::Design;
    pub use super::errors::{EstimationError, EstimationResult};
    pub use super::lag_selection::{select_lag_length, LagModel, LagSelection};
    pub use super::ols::{fit_ols, CovarianceType, FittedModel, OlsOptions};
    pub use super::summary::OlsSummary;
}
