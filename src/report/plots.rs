//! report::plots — backend-independent figure data.
//!
//! Figures are described as plain data so a [`ReportSink`](super::ReportSink)
//! can render them, record them in tests, or ignore them.
use crate::{regression::FittedModel, statistical_tests::RecursiveCusum};
use chrono::NaiveDate;
use serde::Serialize;
use std::ops::Range;

/// One coefficient row of the forest plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForestRow {
    pub name: String,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

/// ForestPlot — point estimates with confidence-interval whiskers and a
/// reference line at zero. Row `i` is drawn at height `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForestPlot {
    pub title: String,
    pub rows: Vec<ForestRow>,
}

impl ForestPlot {
    /// One row per coefficient (including `const`), in design order.
    pub fn from_model(model: &FittedModel) -> Self {
        let pct = (model.confidence * 100.0).round();
        ForestPlot {
            title: format!("Coefficient Estimates with {pct}% CI"),
            rows: model
                .coefficients()
                .into_iter()
                .map(|c| ForestRow {
                    name: c.name,
                    estimate: c.coef,
                    lower: c.lower,
                    upper: c.upper,
                })
                .collect(),
        }
    }

    /// Horizontal extent covering every whisker and zero, padded by 5%.
    pub fn x_range(&self) -> Range<f64> {
        let lo = self.rows.iter().map(|r| r.lower).fold(0.0_f64, f64::min);
        let hi = self.rows.iter().map(|r| r.upper).fold(0.0_f64, f64::max);
        pad(lo, hi)
    }
}

/// CusumPlot — cumulative recursive residuals against time with bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CusumPlot {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub path: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub alpha: f64,
}

impl CusumPlot {
    /// Attach the sample dates to a recursive CUSUM. `dates` covers the
    /// full regression sample; the path starts at `cusum.start`.
    pub fn from_recursive(cusum: &RecursiveCusum, dates: &[NaiveDate]) -> Self {
        let dates = dates.iter().skip(cusum.start).take(cusum.path.len()).copied().collect();
        CusumPlot {
            title: "CUSUM Parameter Stability Plot".to_string(),
            dates,
            path: cusum.path.clone(),
            lower: cusum.lower.clone(),
            upper: cusum.upper.clone(),
            alpha: cusum.alpha,
        }
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Vertical extent covering the path and both bounds, padded by 5%.
    pub fn y_range(&self) -> Range<f64> {
        let values = self.path.iter().chain(&self.lower).chain(&self.upper);
        let lo = values.clone().copied().fold(0.0_f64, f64::min);
        let hi = values.copied().fold(0.0_f64, f64::max);
        pad(lo, hi)
    }
}

fn pad(lo: f64, hi: f64) -> Range<f64> {
    let span = (hi - lo).max(1e-9);
    (lo - 0.05 * span)..(hi + 0.05 * span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{fit_ols, Design, OlsOptions};
    use ndarray::Array1;

    #[test]
    // Purpose
    // -------
    // Check that the forest plot carries one row per coefficient and that
    // its range includes zero and every whisker.
    //
    // Given
    // -----
    // - A regression of y on [const, x] with positive coefficients.
    //
    // Expect
    // ------
    // - Rows [const, x]; lower < estimate < upper; range contains 0.
    fn forest_plot_rows_follow_model() {
        // Arrange
        let x: Array1<f64> = (0..40).map(|t| ((t * 5 % 13) as f64) - 6.0).collect();
        let y: Array1<f64> = (0..40).map(|t| 3.0 + 0.5 * x[t] + ((t % 3) as f64 - 1.0)).collect();
        let design = Design::with_constant(&[("x".to_string(), x.view())]).unwrap();
        let model = fit_ols("y", y.view(), &design, &OlsOptions::default()).unwrap();

        // Act
        let plot = ForestPlot::from_model(&model);
        let range = plot.x_range();

        // Assert
        assert_eq!(plot.title, "Coefficient Estimates with 95% CI");
        let names: Vec<&str> = plot.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["const", "x"]);
        for row in &plot.rows {
            assert!(row.lower < row.estimate && row.estimate < row.upper);
            assert!(range.start <= row.lower && row.upper <= range.end);
        }
        assert!(range.start < 0.0);
    }

    #[test]
    fn cusum_plot_aligns_dates_with_path_start() {
        let cusum = RecursiveCusum {
            recursive_resid: vec![0.1, -0.2, 0.3],
            start: 2,
            path: vec![0.5, 0.1, 0.9],
            lower: vec![-1.0, -1.2, -1.4],
            upper: vec![1.0, 1.2, 1.4],
            alpha: 0.05,
        };
        let dates: Vec<NaiveDate> =
            (1..=5).map(|m| NaiveDate::from_ymd_opt(2021, m, 1).unwrap()).collect();
        let plot = CusumPlot::from_recursive(&cusum, &dates);
        assert_eq!(plot.dates, dates[2..].to_vec());
        assert_eq!(plot.len(), 3);
        let range = plot.y_range();
        assert!(range.start < -1.4 && range.end > 1.4);
    }
}
