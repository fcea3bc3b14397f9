//! statistical_tests — unit-root and residual diagnostics.
//!
//! Purpose
//! -------
//! Collect the statistical tests the report runs, together with their
//! shared input validation, reference distributions, and error type. Every
//! routine is a pure function of its inputs.
//!
//! Key behaviors
//! -------------
//! - Stationarity: [`AdfOutcome::augmented_dickey_fuller`] with automatic
//!   order selection and MacKinnon p-values / critical values
//!   ([`mackinnon`]).
//! - Residual autocorrelation: [`durbin_watson`] and
//!   [`BreuschGodfrey::breusch_godfrey`].
//! - Heteroskedasticity: [`WhiteTest::white`].
//! - Normality: [`JarqueBera::jarque_bera`].
//! - Parameter stability: [`CusumOls::cusum_ols`] (statistic and p-value)
//!   and [`RecursiveCusum::recursive_cusum`] (path and bounds for plotting).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated once via [`validate_series`]; tests report
//!   failures via [`TestResult`] and never panic on invalid user input.
//! - Auxiliary regressions go through
//!   [`least_squares`](crate::linalg::least_squares); linearly dependent
//!   auxiliary columns are dropped before fitting.
//!
//! Conventions
//! -----------
//! - Outcome types expose the statistic and p-value under the names `stat`
//!   (or `lm` / `f_stat`) and `p_value` (or `lm_p_value` / `f_p_value`).
//! - Error messages are phrased in terms of domain constraints.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use macro_timeseries::statistical_tests::{AdfOptions, AdfOutcome, TestResult};
//!
//!   fn check(series: &[f64]) -> TestResult<bool> {
//!       AdfOutcome::augmented_dickey_fuller(series, &AdfOptions::default())?
//!           .is_stationary(0.05)
//!   }
//!   ```
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests on hand-computed examples and on seeded
//!   synthetic fixtures with known properties (unit root, AR(1),
//!   heteroskedastic noise, structural breaks).

pub mod adf;
pub mod breusch_godfrey;
pub mod cusum;
pub mod distributions;
pub mod durbin_watson;
pub mod errors;
pub mod jarque_bera;
pub mod mackinnon;
pub mod validation;
pub mod white;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adf::{AdfOptions, AdfOutcome, AutoLag};
pub use self::breusch_godfrey::BreuschGodfrey;
pub use self::cusum::{cusum_bound_constant, CusumOls, RecursiveCusum, CUSUM_OLS_CRIT};
pub use self::durbin_watson::durbin_watson;
pub use self::errors::{TestError, TestResult};
pub use self::jarque_bera::JarqueBera;
pub use self::mackinnon::{AdfRegression, CriticalValues};
pub use self::validation::{validate_series, validate_significance};
pub use self::white::WhiteTest;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use macro_timeseries::statistical_tests::prelude::*;
//
// to import the main statistical-testing surface in a single line.

pub mod prelude {
    pub use super::adf::{AdfOptions, AdfOutcome, AutoLag};
    pub use super::breusch_godfrey::BreuschGodfrey;
    pub use super::cusum::{CusumOls, RecursiveCusum};
    pub use super::durbin_watson::durbin_watson;
    pub use super::errors::{TestError, TestResult};
    pub use super::jarque_bera::JarqueBera;
    pub use super::white::WhiteTest;
}
