//! report::sink — the capability through which figures leave the pipeline.
use crate::report::{
    errors::ReportResult,
    plots::{CusumPlot, ForestPlot},
};
use std::path::PathBuf;

/// ReportSink — destination for the two report figures.
///
/// Implementations decide where and how a figure is materialized and return
/// a location identifying it. The pipeline treats every error as non-fatal.
pub trait ReportSink {
    fn forest_plot(&mut self, plot: &ForestPlot) -> ReportResult<PathBuf>;

    fn cusum_plot(&mut self, plot: &CusumPlot) -> ReportResult<PathBuf>;
}
