//! report — figures produced at the end of a pipeline run.
//!
//! Purpose
//! -------
//! Turn a fitted model and its diagnostics into two figures: a coefficient
//! forest plot with confidence intervals and a CUSUM stability plot.
//!
//! Key behaviors
//! -------------
//! - [`ForestPlot`] and [`CusumPlot`] are backend-independent data.
//! - [`ReportSink`] is the output capability; [`PlotterSink`] renders files
//!   with `plotters`, and tests substitute recording sinks.
//! - Rendering errors are [`ReportError`]s that callers may downgrade to
//!   warnings.

pub mod errors;
pub mod plots;
pub mod plotter;
pub mod sink;

// ---- Re-exports (primary public surface) ----
pub use self::errors::{ReportError, ReportResult};
pub use self::plots::{CusumPlot, ForestPlot, ForestRow};
pub use self::plotter::{draw_cusum, draw_forest, PlotFormat, PlotterSink, CUSUM_STEM, FOREST_STEM};
pub use self::sink::ReportSink;
