//! report::errors — rendering failures.
//!
//! Rendering problems never abort a run: the pipeline logs them at WARN and
//! keeps the numeric results it has already reported.
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The plotting backend failed to draw or encode the figure.
    #[error("Plot rendering failed: {0}")]
    Render(String),

    /// Nothing to draw.
    #[error("Plot '{0}' has no data.")]
    EmptyPlot(&'static str),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
