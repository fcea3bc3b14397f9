//! Shared fixtures for the integration tests.
//!
//! - [`FixtureSource`]: deterministic synthetic monthly series that mimic
//!   the shapes of the real inputs (an index level, two interest rates, a
//!   price index, a volatility index) and count every fetch. One series can
//!   be emptied or flattened to provoke failures.
//! - [`RecordingSink`]: keeps the figures it is handed in memory.
//! - [`FailingSink`]: refuses every figure.
#![allow(dead_code)]

use chrono::NaiveDate;
use macro_timeseries::{
    data::{DataResult, SeriesRequest, SeriesSource, TimeSeries},
    report::{CusumPlot, ForestPlot, ReportError, ReportResult, ReportSink},
};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use std::{cell::Cell, path::PathBuf};

#[derive(Default)]
pub struct FixtureSource {
    calls: Cell<usize>,
    empty: Option<&'static str>,
    flat: Option<&'static str>,
}

impl FixtureSource {
    pub fn new() -> Self {
        FixtureSource::default()
    }

    /// A source whose `name` series has no observations.
    pub fn with_empty(name: &'static str) -> Self {
        FixtureSource { empty: Some(name), ..FixtureSource::default() }
    }

    /// A source whose `name` series is constant, so its unit-root test
    /// cannot run.
    pub fn with_flat(name: &'static str) -> Self {
        FixtureSource { flat: Some(name), ..FixtureSource::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl SeriesSource for FixtureSource {
    fn fetch(&self, request: &SeriesRequest<'_>) -> DataResult<TimeSeries> {
        self.calls.set(self.calls.get() + 1);
        let spec = request.spec;
        if self.empty == Some(spec.name.as_str()) {
            return Ok(TimeSeries::from_pairs(&spec.code, Vec::new()));
        }
        if self.flat == Some(spec.name.as_str()) {
            let flat = synthetic(&spec.name).into_iter().map(|(date, _)| (date, 20.0));
            return Ok(TimeSeries::from_pairs(&spec.code, flat));
        }
        Ok(TimeSeries::from_pairs(&spec.code, synthetic(&spec.name)))
    }
}

/// Monthly observations on the 28th, January 2015 through December 2024.
fn synthetic(name: &str) -> Vec<(NaiveDate, f64)> {
    let seed = name.bytes().fold(17_u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
    let mut rng = StdRng::seed_from_u64(seed);
    let mut draw = move || -> f64 { StandardNormal.sample(&mut rng) };

    let months: Vec<NaiveDate> = (2015..=2024)
        .flat_map(|y| (1..=12).map(move |m| NaiveDate::from_ymd_opt(y, m, 28).unwrap()))
        .collect();
    let mut level = match name {
        "ndx_ret" => 4000.0,
        "ffr" => 1.0,
        "gs10" => 2.5,
        "cpi" => 240.0,
        _ => 0.0,
    };
    months
        .into_iter()
        .map(|date| {
            let e = draw();
            level = match name {
                "ndx_ret" => level * (0.01 + 0.05 * e).exp(),
                "ffr" | "gs10" => level + 0.15 * e,
                "cpi" => level * (0.002 + 0.002 * e).exp(),
                // Volatility index: positive, mean-reverting.
                _ => 0.7 * level + 3.0 * e,
            };
            let value = if name == "vix" { 20.0 + level } else { level };
            (date, value)
        })
        .collect()
}

#[derive(Default)]
pub struct RecordingSink {
    pub forest: Vec<ForestPlot>,
    pub cusum: Vec<CusumPlot>,
}

impl ReportSink for RecordingSink {
    fn forest_plot(&mut self, plot: &ForestPlot) -> ReportResult<PathBuf> {
        self.forest.push(plot.clone());
        Ok(PathBuf::from("memory/coefficients_forest"))
    }

    fn cusum_plot(&mut self, plot: &CusumPlot) -> ReportResult<PathBuf> {
        self.cusum.push(plot.clone());
        Ok(PathBuf::from("memory/cusum_stability"))
    }
}

pub struct FailingSink;

impl ReportSink for FailingSink {
    fn forest_plot(&mut self, _plot: &ForestPlot) -> ReportResult<PathBuf> {
        Err(ReportError::Render("no display".to_string()))
    }

    fn cusum_plot(&mut self, _plot: &CusumPlot) -> ReportResult<PathBuf> {
        Err(ReportError::Render("no display".to_string()))
    }
}
