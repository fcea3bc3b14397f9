//! macro_timeseries — monthly macro-financial regression reports.
//!
//! Purpose
//! -------
//! Serve as the crate root for the `macro-report` binary and for Rust callers
//! that want the individual stages: series retrieval and alignment, unit-root
//! testing and stationarity transforms, lag-order selection, OLS with
//! HAC (Newey–West) inference, residual diagnostics, and report figures.
//!
//! Key behaviors
//! -------------
//! - [`pipeline::run_pipeline`] runs every stage once, in order, and logs
//!   each intermediate statistic through `tracing`.
//! - External I/O is behind two capability traits:
//!   [`data::SeriesSource`] for retrieval and [`report::ReportSink`] for
//!   figures. The statistical core never touches the network or the
//!   filesystem.
//! - Configuration is an explicit [`config::PipelineConfig`] value; nothing
//!   is global.
//!
//! Invariants & assumptions
//! ------------------------
//! - The aligned table is month-end indexed, strictly increasing, and free of
//!   missing values.
//! - Statistical routines are deterministic functions of their inputs.
//!
//! Conventions
//! -----------
//! - Each subtree owns an `errors` module with a `thiserror` enum and a
//!   `…Result<T>` alias.
//! - Test statistics follow the usual econometric conventions: two-sided
//!   p-values, `n` = number of observations, `k` = number of regressors
//!   including the constant.
//!
//! Downstream usage
//! ----------------
//! - The binary wires [`data::MarketDataSource`] and
//!   [`report::PlotterSink`] into [`pipeline::run_pipeline`].
//! - Tests substitute fixture sources and recording sinks.
//!
//! Testing notes
//! -------------
//! - Numerical routines are covered by unit tests on seeded synthetic
//!   fixtures; the pipeline is covered by integration tests in `tests/`.

pub mod config;
pub mod data;
pub mod diagnostics;
pub mod inference;
pub mod linalg;
pub mod pipeline;
pub mod regression;
pub mod report;
pub mod stationarity;
pub mod statistical_tests;
