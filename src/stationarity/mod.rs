//! stationarity — verdicts and transforms that make the panel stationary.
//!
//! Purpose
//! -------
//! Decide, per series, whether the raw level is stationary and apply the
//! fixed transform the policy prescribes, producing the stationary panel
//! that lag selection and estimation consume.
//!
//! Key behaviors
//! -------------
//! - [`StationarityVerdict`] is a tagged two-branch result:
//!   `Stationary` or `NonStationary { transform }`.
//! - [`Transform`] implements identity, first difference, and scaled
//!   percent change; the latter two drop exactly one leading observation.
//! - [`make_stationary`] runs raw tests, applies the [`TransformPolicy`] to
//!   series the verdict flags, re-tests, and inner-joins the result into a
//!   [`StationaryPanel`]. [`StationarityPass`] exposes the same steps one at a
//!   time.
//!
//! Conventions
//! -----------
//! - Transformed columns are renamed by the policy (`ffr` → `d_ffr`,
//!   `cpi` → `inflation`, …) and those names are used downstream.

pub mod errors;
pub mod transform;
pub mod transformer;
pub mod verdict;

pub use self::errors::{StationarityError, StationarityResult};
pub use self::transform::Transform;
pub use self::transformer::{
    make_stationary, SeriesAssessment, StationarityPass, StationaryPanel, TransformPolicy,
    TransformRule,
};
pub use self::verdict::StationarityVerdict;
