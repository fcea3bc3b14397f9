//! statistical_tests::distributions — tail probabilities of reference laws.
//!
//! Thin wrappers over `statrs` that return `NaN` instead of an error when the
//! degrees of freedom are invalid. Upstream tests already guard their
//! dimensions, so a `NaN` p-value here signals a programming error rather
//! than a user-facing failure.
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

/// Upper tail `P(X > x)` of a χ²(df) variable.
pub fn chi2_sf(x: f64, df: f64) -> f64 {
    ChiSquared::new(df).map(|d| d.sf(x)).unwrap_or(f64::NAN)
}

/// Upper tail `P(X > x)` of an F(df1, df2) variable.
pub fn f_sf(x: f64, df1: f64, df2: f64) -> f64 {
    FisherSnedecor::new(df1, df2).map(|d| d.sf(x)).unwrap_or(f64::NAN)
}

/// Standard normal CDF Φ(x).
pub fn normal_cdf(x: f64) -> f64 {
    Normal::new(0.0, 1.0).map(|d| d.cdf(x)).unwrap_or(f64::NAN)
}

/// Standard normal quantile Φ⁻¹(p).
pub fn normal_ppf(p: f64) -> f64 {
    Normal::new(0.0, 1.0).map(|d| d.inverse_cdf(p)).unwrap_or(f64::NAN)
}

/// Two-sided p-value `2·P(Z > |z|)` under the standard normal.
pub fn normal_two_sided(z: f64) -> f64 {
    Normal::new(0.0, 1.0).map(|d| 2.0 * d.sf(z.abs())).unwrap_or(f64::NAN)
}

/// Two-sided p-value `2·P(T > |t|)` under Student's t(df).
pub fn t_two_sided(t: f64, df: f64) -> f64 {
    StudentsT::new(0.0, 1.0, df).map(|d| 2.0 * d.sf(t.abs())).unwrap_or(f64::NAN)
}

/// Quantile of Student's t(df).
pub fn t_ppf(p: f64, df: f64) -> f64 {
    StudentsT::new(0.0, 1.0, df).map(|d| d.inverse_cdf(p)).unwrap_or(f64::NAN)
}
