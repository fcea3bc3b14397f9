//! report::plotter — file-backed figure rendering with `plotters`.
//!
//! Purpose
//! -------
//! Render [`ForestPlot`] and [`CusumPlot`] to SVG or PNG files under an
//! output directory. Drawing is written once against a generic
//! [`DrawingBackend`] and the file format only picks the backend.
//!
//! Key behaviors
//! -------------
//! - Output files are `coefficients_forest.<ext>` and
//!   `cusum_stability.<ext>`; the directory is created on demand.
//! - Backend failures (including missing system fonts) surface as
//!   [`ReportError::Render`].
use crate::report::{
    errors::{ReportError, ReportResult},
    plots::{CusumPlot, ForestPlot},
    sink::ReportSink,
};
use plotters::{coord::Shift, prelude::*};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const FOREST_STEM: &str = "coefficients_forest";
pub const CUSUM_STEM: &str = "cusum_stability";

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);
const PATH_COLOR: RGBColor = POINT_COLOR;
const BOUND_COLOR: RGBColor = RGBColor(214, 39, 40);
const ZERO_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Image encoding of rendered figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    #[default]
    Svg,
    Png,
}

impl PlotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlotFormat::Svg => "svg",
            PlotFormat::Png => "png",
        }
    }
}

/// PlotterSink — writes figures into `output_dir`.
#[derive(Debug, Clone)]
pub struct PlotterSink {
    output_dir: PathBuf,
    format: PlotFormat,
    size: (u32, u32),
}

impl PlotterSink {
    pub fn new(output_dir: impl Into<PathBuf>, format: PlotFormat) -> Self {
        PlotterSink { output_dir: output_dir.into(), format, size: (1000, 600) }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path for a figure stem in the configured format.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.{}", self.format.extension()))
    }

    fn write_figure(&self, stem: &str, figure: Figure<'_>) -> ReportResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(stem);
        match self.format {
            PlotFormat::Svg => {
                let root = SVGBackend::new(&path, self.size).into_drawing_area();
                figure.draw(&root)?;
                root.present().map_err(render_err)?;
            }
            PlotFormat::Png => {
                let root = BitMapBackend::new(&path, self.size).into_drawing_area();
                figure.draw(&root)?;
                root.present().map_err(render_err)?;
            }
        }
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

#[derive(Clone, Copy)]
enum Figure<'a> {
    Forest(&'a ForestPlot),
    Cusum(&'a CusumPlot),
}

impl Figure<'_> {
    fn draw<DB: DrawingBackend>(self, root: &DrawingArea<DB, Shift>) -> ReportResult<()> {
        match self {
            Figure::Forest(plot) => draw_forest(root, plot),
            Figure::Cusum(plot) => draw_cusum(root, plot),
        }
    }
}

impl ReportSink for PlotterSink {
    fn forest_plot(&mut self, plot: &ForestPlot) -> ReportResult<PathBuf> {
        if plot.rows.is_empty() {
            return Err(ReportError::EmptyPlot(FOREST_STEM));
        }
        self.write_figure(FOREST_STEM, Figure::Forest(plot))
    }

    fn cusum_plot(&mut self, plot: &CusumPlot) -> ReportResult<PathBuf> {
        if plot.is_empty() {
            return Err(ReportError::EmptyPlot(CUSUM_STEM));
        }
        self.write_figure(CUSUM_STEM, Figure::Cusum(plot))
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Render(err.to_string())
}

/// Coefficients on the vertical axis, estimates with capped whiskers on the
/// horizontal axis, and a grey reference line at zero.
pub fn draw_forest<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>, plot: &ForestPlot,
) -> ReportResult<()> {
    root.fill(&WHITE).map_err(render_err)?;
    let n = plot.rows.len();
    let y_range = -0.5..(n as f64 - 0.5);
    let names: Vec<&str> = plot.rows.iter().map(|r| r.name.as_str()).collect();
    let label = |y: &f64| {
        let idx = y.round();
        if (y - idx).abs() < 1e-6 && idx >= 0.0 {
            names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
        } else {
            String::new()
        }
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(plot.x_range(), y_range.clone())
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&label)
        .x_desc("Estimate")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, y_range.start), (0.0, y_range.end)],
            ZERO_COLOR.stroke_width(1),
        )))
        .map_err(render_err)?;

    let cap = 0.12;
    let style = POINT_COLOR.stroke_width(2);
    let whiskers = plot.rows.iter().enumerate().flat_map(|(i, r)| {
        let y = i as f64;
        [
            PathElement::new(vec![(r.lower, y), (r.upper, y)], style),
            PathElement::new(vec![(r.lower, y - cap), (r.lower, y + cap)], style),
            PathElement::new(vec![(r.upper, y - cap), (r.upper, y + cap)], style),
        ]
    });
    chart.draw_series(whiskers).map_err(render_err)?;
    chart
        .draw_series(
            plot.rows
                .iter()
                .enumerate()
                .map(|(i, r)| Circle::new((r.estimate, i as f64), 5, POINT_COLOR.filled())),
        )
        .map_err(render_err)?;
    Ok(())
}

/// CUSUM path against observation dates with symmetric significance bounds.
pub fn draw_cusum<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>, plot: &CusumPlot,
) -> ReportResult<()> {
    root.fill(&WHITE).map_err(render_err)?;
    let n = plot.len();
    let date_label = |x: &f64| {
        let idx = x.round();
        if idx < 0.0 {
            return String::new();
        }
        plot.dates.get(idx as usize).map(|d| d.format("%Y-%m").to_string()).unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..(n.saturating_sub(1).max(1) as f64), plot.y_range())
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&date_label)
        .x_desc("Date")
        .y_desc("CUSUM")
        .draw()
        .map_err(render_err)?;

    let indexed = |values: &[f64]| -> Vec<(f64, f64)> {
        values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect()
    };
    chart
        .draw_series(LineSeries::new(indexed(&plot.path), PATH_COLOR.stroke_width(2)))
        .map_err(render_err)?
        .label("CUSUM")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &PATH_COLOR));
    let pct = plot.alpha * 100.0;
    let bound = BOUND_COLOR.stroke_width(1);
    chart
        .draw_series(DashedLineSeries::new(indexed(&plot.lower), 6, 4, bound))
        .map_err(render_err)?
        .label(format!("Lower {pct:.0}%"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BOUND_COLOR));
    chart
        .draw_series(DashedLineSeries::new(indexed(&plot.upper), 6, 4, bound))
        .map_err(render_err)?
        .label(format!("Upper {pct:.0}%"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BOUND_COLOR));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_for_uses_format_extension() {
        let svg = PlotterSink::new("out", PlotFormat::Svg);
        let png = PlotterSink::new("out", PlotFormat::Png);
        assert_eq!(svg.path_for(FOREST_STEM), Path::new("out").join("coefficients_forest.svg"));
        assert_eq!(png.path_for(CUSUM_STEM), Path::new("out").join("cusum_stability.png"));
    }

    #[test]
    fn plot_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: PlotFormat,
        }
        let w: Wrapper = toml::from_str("format = \"png\"").unwrap();
        assert_eq!(w.format, PlotFormat::Png);
        assert_eq!(PlotFormat::default(), PlotFormat::Svg);
    }

    #[test]
    // Purpose
    // -------
    // Empty figures are refused before touching the filesystem.
    //
    // Given
    // -----
    // - A forest plot without rows and a sink pointed at a temp directory.
    //
    // Expect
    // ------
    // - `ReportError::EmptyPlot` and no file written.
    fn empty_forest_plot_is_rejected() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PlotterSink::new(dir.path(), PlotFormat::Svg);
        let plot = ForestPlot { title: "t".into(), rows: Vec::new() };

        // Act
        let err = sink.forest_plot(&plot).unwrap_err();

        // Assert
        assert!(matches!(err, ReportError::EmptyPlot(FOREST_STEM)));
        assert!(!sink.path_for(FOREST_STEM).exists());
    }
}
