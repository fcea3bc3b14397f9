//! regression::summary — plain-text regression table.
//!
//! Renders a [`FittedModel`] the way econometrics packages print an OLS
//! result: a two-column header of fit statistics, one row per coefficient,
//! and a footer of residual diagnostics (Durbin–Watson, Jarque–Bera, skew,
//! kurtosis). Diagnostics that cannot be computed print as `nan`.
use crate::{
    regression::ols::FittedModel,
    statistical_tests::{durbin_watson, JarqueBera},
};
use std::fmt;

const WIDTH: usize = 78;

/// OlsSummary — `Display` adapter over a fitted model.
///
/// ```rust,ignore
/// info!("\n{}", OlsSummary::new(&fit));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OlsSummary<'a> {
    model: &'a FittedModel,
}

impl<'a> OlsSummary<'a> {
    pub fn new(model: &'a FittedModel) -> Self {
        OlsSummary { model }
    }
}

impl fmt::Display for OlsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.model;
        let heavy = "=".repeat(WIDTH);
        let light = "-".repeat(WIDTH);
        let cov_type = if m.hac_lags.is_some() { "HAC" } else { "nonrobust" };

        writeln!(f, "{:^WIDTH$}", "OLS Regression Results")?;
        writeln!(f, "{heavy}")?;
        pair(f, "Dep. Variable:", &m.dep_name, "R-squared:", &format!("{:.3}", m.rsquared))?;
        pair(f, "Model:", "OLS", "Adj. R-squared:", &format!("{:.3}", m.rsquared_adj))?;
        pair(f, "Method:", "Least Squares", "F-statistic:", &format!("{:.4}", m.f_stat))?;
        pair(
            f,
            "No. Observations:",
            &m.nobs.to_string(),
            "Prob (F-statistic):",
            &format!("{:.3e}", m.f_p_value),
        )?;
        pair(
            f,
            "Df Residuals:",
            &m.df_resid.to_string(),
            "Log-Likelihood:",
            &format!("{:.2}", m.llf),
        )?;
        pair(f, "Df Model:", &m.df_model.to_string(), "AIC:", &format!("{:.2}", m.aic))?;
        pair(f, "Covariance Type:", cov_type, "BIC:", &format!("{:.2}", m.bic))?;
        if let Some(lags) = m.hac_lags {
            pair(f, "Cov. Kernel:", &m.cov_label(), "Cov. lags:", &lags.to_string())?;
        }
        writeln!(f, "{heavy}")?;

        let (stat, prob) = if m.use_t { ("t", "P>|t|") } else { ("z", "P>|z|") };
        let tail = (1.0 - m.confidence) / 2.0;
        writeln!(
            f,
            "{:<16}{:>10}{:>11}{:>10}{:>10}{:>10}{:>11}",
            "",
            "coef",
            "std err",
            stat,
            prob,
            format!("[{tail:.3}"),
            format!("{:.3}]", 1.0 - tail),
        )?;
        writeln!(f, "{light}")?;
        for row in m.coefficients() {
            writeln!(
                f,
                "{:<16}{:>10.4}{:>11.3}{:>10.3}{:>10.3}{:>10.3}{:>11.3}",
                truncate(&row.name, 15),
                row.coef,
                row.std_err,
                row.stat,
                row.p_value,
                row.lower,
                row.upper,
            )?;
        }
        writeln!(f, "{heavy}")?;

        let resid = m.resid.to_vec();
        let dw = durbin_watson(&resid).unwrap_or(f64::NAN);
        let jb = JarqueBera::jarque_bera(&resid).unwrap_or(JarqueBera {
            stat: f64::NAN,
            p_value: f64::NAN,
            skew: f64::NAN,
            kurtosis: f64::NAN,
        });
        pair(
            f,
            "Durbin-Watson:",
            &format!("{dw:.3}"),
            "Jarque-Bera (JB):",
            &format!("{:.3}", jb.stat),
        )?;
        pair(f, "Skew:", &format!("{:.3}", jb.skew), "Prob(JB):", &format!("{:.3}", jb.p_value))?;
        pair(f, "Kurtosis:", &format!("{:.3}", jb.kurtosis), "", "")?;
        write!(f, "{heavy}")
    }
}

fn pair(f: &mut fmt::Formatter<'_>, l1: &str, v1: &str, l2: &str, v2: &str) -> fmt::Result {
    writeln!(f, "{:<20}{:>18}   {:<22}{:>15}", l1, truncate(v1, 18), l2, truncate(v2, 15))
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{
        design::Design,
        ols::{fit_ols, OlsOptions},
    };
    use ndarray::Array1;

    #[test]
    // Purpose
    // -------
    // Check that the rendered table names the dependent variable, every
    // coefficient, and the covariance type.
    //
    // Given
    // -----
    // - A small HAC fit of `ndx_ret` on `d_ffr`.
    //
    // Expect
    // ------
    // - Lines containing "Dep. Variable:" with "ndx_ret", rows for `const`
    //   and `d_ffr`, "HAC", "P>|z|", and the diagnostics footer.
    fn summary_renders_header_rows_and_footer() {
        // Arrange
        let x: Array1<f64> = (0..30).map(|t| ((t * 7 % 11) as f64) - 5.0).collect();
        let y: Array1<f64> = (0..30).map(|t| 0.2 * x[t] + ((t * 3 % 5) as f64) * 0.1).collect();
        let design = Design::with_constant(&[("d_ffr".to_string(), x.view())]).unwrap();
        let fit = fit_ols("ndx_ret", y.view(), &design, &OlsOptions::default()).unwrap();

        // Act
        let text = OlsSummary::new(&fit).to_string();

        // Assert
        let dep_line = text.lines().find(|l| l.starts_with("Dep. Variable:")).unwrap();
        assert!(dep_line.contains("ndx_ret"));
        assert!(text.lines().any(|l| l.starts_with("const")));
        assert!(text.lines().any(|l| l.starts_with("d_ffr")));
        assert!(text.contains("HAC"));
        assert!(text.contains("P>|z|"));
        assert!(text.contains("[0.025"));
        assert!(text.contains("Durbin-Watson:"));
        assert!(text.contains("Jarque-Bera (JB):"));
    }
}
