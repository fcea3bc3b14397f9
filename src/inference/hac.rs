//! inference::hac — HAC score covariance for robust standard errors.
//!
//! Purpose
//! -------
//! Build HAC (Heteroskedasticity & Autocorrelation Consistent) covariance
//! matrices of *average* per-observation scores for use in robust (sandwich)
//! standard errors. The estimator has the form
//!
//! ```text
//! S  =  Γ₀  +  ∑_{k=1}^{L} w_k ( Γ_k + Γ_kᵀ ),
//! Γ₀ = (1/n) S_fullᵀ S_full,
//! Γ_k = c_k · S_{k:}ᵀ S_{:n−k},
//! ```
//!
//! where `S_full` is the `n×p` score matrix (rows=time, cols=parameters),
//! `w_k` are kernel weights, and `L` is the bandwidth. The scaling `c_k` is
//!
//! - small-sample correction **on**:  `c_k = 1/(n − k)`,
//! - small-sample correction **off**: `c_k = 1/n`.
//!
//! Key behaviors
//! -------------
//! - Aggregate per-observation scores into a symmetric `p×p` covariance
//!   matrix on the *average-score* scale.
//! - Support both IID OPG (`L = 0`) and HAC estimators with a configurable
//!   kernel, bandwidth regime, centering, and small-sample correction.
//! - Provide [`HACOptions`] as a compact, deserializable configuration object.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input `raw_scores` must be an `n×p` matrix with `n ≥ 1` and `p ≥ 1`;
//!   empty inputs are rejected with [`InferenceError::EmptyScores`].
//! - The same series matrix that HAC aggregates (centered if `center=true`)
//!   is passed to the plug-in bandwidth selector.
//! - Bandwidth is always truncated to `L ≤ n−1`.
//!
//! Conventions
//! -----------
//! - Rows index time (`t = 1,…,n`); columns index regressors.
//! - For OLS the scores are `x_t · e_t`; the regression layer turns `S` into
//!   the sandwich `n·(X'X)⁻¹ S (X'X)⁻¹`.
//! - The taper argument is `x = k/(L+1)` so that `x ∈ [0,1)` even at the
//!   maximum lag `k = L`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover symmetry, reduction to the OPG at `L = 0`, centering
//!   invariance for mean-zero scores, small-sample scaling, agreement with a
//!   hand-computed Bartlett estimate, and each bandwidth regime.
use crate::inference::{
    errors::{InferenceError, InferenceResult},
    kernel::{newey_west_rule, KernelType},
};
use ndarray::{s, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, cmp::min, fmt};

/// Bandwidth — how the HAC truncation lag `L` is chosen.
///
/// - `Fixed(L)`: user-supplied lag, truncated to `n−1`.
/// - `PlugIn`: Andrews AR(1) plug-in via [`KernelType::optimal_bandwidth`].
/// - `NeweyWestRule`: `⌊4·(n/100)^{2/9}⌋`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    Fixed(usize),
    PlugIn,
    NeweyWestRule,
}

impl Bandwidth {
    /// Effective lag for an `n×p` score matrix, truncated to `n−1`.
    pub fn resolve(&self, kernel: KernelType, scores: &Array2<f64>) -> usize {
        let cap = scores.nrows().saturating_sub(1);
        let lag = match self {
            Bandwidth::Fixed(lag) => *lag,
            Bandwidth::PlugIn => kernel.optimal_bandwidth(scores),
            Bandwidth::NeweyWestRule => newey_west_rule(scores.nrows()),
        };
        min(lag, cap)
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bandwidth::Fixed(lag) => write!(f, "{lag}"),
            Bandwidth::PlugIn => write!(f, "plug-in"),
            Bandwidth::NeweyWestRule => write!(f, "newey-west"),
        }
    }
}

/// HACOptions — configuration for HAC score covariance estimation.
///
/// Purpose
/// -------
/// Represent the kernel, bandwidth, centering, and small-sample policy for
/// constructing HAC score covariance matrices from per-observation scores.
///
/// Fields
/// ------
/// - `kernel`: [`KernelType`]
///   Kernel family for the HAC estimator.
/// - `bandwidth`: [`Bandwidth`]
///   Bandwidth regime; truncated by the available sample size at compute
///   time.
/// - `center`: `bool`
///   Whether to center per-observation scores before aggregation.
/// - `small_sample_correction`: `bool`
///   If `true`, use `c_k = 1/(n−k)`; otherwise `c_k = 1/n`.
///
/// Notes
/// -----
/// - The default is Bartlett with `Fixed(1)`, no centering, and `c_k = 1/n`:
///   the classic Newey–West estimator with one lag.
/// - Missing TOML keys fall back to the defaults field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HACOptions {
    pub kernel: KernelType,
    pub bandwidth: Bandwidth,
    pub center: bool,
    pub small_sample_correction: bool,
}

impl HACOptions {
    /// Construct a `HACOptions` value from explicit settings.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use macro_timeseries::inference::hac::{Bandwidth, HACOptions};
    /// # use macro_timeseries::inference::kernel::KernelType;
    /// let opts = HACOptions::new(Bandwidth::PlugIn, KernelType::Bartlett, false, true);
    /// assert_eq!(opts.center, false);
    /// ```
    pub fn new(
        bandwidth: Bandwidth, kernel: KernelType, center: bool, small_sample_correction: bool,
    ) -> HACOptions {
        HACOptions { bandwidth, kernel, center, small_sample_correction }
    }
}

impl Default for HACOptions {
    fn default() -> Self {
        Self {
            bandwidth: Bandwidth::Fixed(1),
            kernel: KernelType::Bartlett,
            center: false,
            small_sample_correction: false,
        }
    }
}

/// Build a `p×p` HAC covariance matrix of average per-observation scores.
///
/// Parameters
/// ----------
/// - `hac_opts`: `&HACOptions`
///   HAC configuration controlling kernel, bandwidth selection, centering,
///   and small-sample scaling.
/// - `raw_scores`: `&Array2<f64>`
///   `n×p` matrix of per-observation scores (rows=time, columns=parameters).
///
/// Returns
/// -------
/// `InferenceResult<(Array2<f64>, usize)>`
///   The symmetric `p×p` covariance on the average-score scale and the
///   effective bandwidth actually used.
///
/// Errors
/// ------
/// - `InferenceError::EmptyScores` if `raw_scores` has no rows or columns.
///
/// Notes
/// -----
/// - With an effective bandwidth `L = 0`, this reduces to the IID
///   outer-product-of-gradients estimator `(1/n) SᵀS`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use macro_timeseries::inference::hac::{HACOptions, calculate_avg_scores_cov};
/// let scores = array![[1.0, -1.0],
///                     [0.5, -0.5],
///                     [1.5, -1.5]];
/// let (s, lag) = calculate_avg_scores_cov(&HACOptions::default(), &scores).unwrap();
/// assert_eq!(s.shape(), &[2, 2]);
/// assert_eq!(lag, 1);
/// ```
pub fn calculate_avg_scores_cov(
    hac_opts: &HACOptions, raw_scores: &Array2<f64>,
) -> InferenceResult<(Array2<f64>, usize)> {
    let (n, p) = raw_scores.dim();
    if n == 0 || p == 0 {
        return Err(InferenceError::EmptyScores { rows: n, cols: p });
    }

    let scores: Cow<'_, Array2<f64>> = match (hac_opts.center, raw_scores.mean_axis(Axis(0))) {
        (true, Some(col_means)) => Cow::Owned(raw_scores - &col_means),
        _ => Cow::Borrowed(raw_scores),
    };

    let bandwidth = hac_opts.bandwidth.resolve(hac_opts.kernel, scores.as_ref());

    let mut avg_scores = Array2::<f64>::zeros((p, p));
    for lag in 0..=bandwidth {
        add_hac_component(&mut avg_scores, scores.as_ref(), lag, bandwidth, hac_opts);
    }
    Ok((avg_scores, bandwidth))
}

// ---- Helper methods ----

/// Add the lag-`k` term to the accumulator: `(1/n) SᵀS` at `k = 0`, the
/// weighted symmetrized `Γ_k` otherwise. Requires `lag ≤ bandwidth ≤ n−1`.
fn add_hac_component(
    avg_scores: &mut Array2<f64>, scores: &Array2<f64>, lag: usize, bandwidth: usize,
    hac_opts: &HACOptions,
) {
    let n = scores.nrows();
    let weight = hac_opts.kernel.weight(lag as f64 / (bandwidth + 1) as f64);
    match lag {
        0 => {
            let scores_t = scores.t();
            avg_scores.scaled_add(1.0 / (n as f64), &scores_t.dot(scores));
        }
        _ => {
            let small_samp_correction = if hac_opts.small_sample_correction {
                1.0 / ((n - lag) as f64)
            } else {
                1.0 / (n as f64)
            };
            let scores_lagged = scores.slice(s![lag.., ..]);
            let scores_leading = scores.slice(s![..n - lag, ..]);
            let corrected_gamma_k = small_samp_correction * scores_lagged.t().dot(&scores_leading);
            avg_scores.scaled_add(weight, &corrected_gamma_k);
            avg_scores.scaled_add(weight, &corrected_gamma_k.t());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Default and explicit configuration behavior of `HACOptions`.
    // - Basic invariants of `calculate_avg_scores_cov`:
    //   - symmetry of the returned covariance,
    //   - compatibility with the IID OPG when `L = 0`,
    //   - invariance to centering when scores are exactly mean-zero,
    //   - inflation effect from the small-sample correction.
    // - Consistency with the textbook HAC formula for a small
    //   hand-computable example (Bartlett kernel, truncated bandwidth).
    // - Bandwidth regimes and the empty-input error.
    //
    // They intentionally DO NOT cover:
    // - The AR(1) plug-in bandwidth estimator itself; that logic is tested
    //   in the kernel module.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-10;

    fn assert_matrices_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape(), "shape mismatch: {:?} vs {:?}", a.shape(), b.shape());
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert_relative_eq!(a[[i, j]], b[[i, j]], epsilon = tol, max_relative = tol);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `HACOptions::default` is Newey–West with one lag.
    //
    // Given
    // -----
    // - No inputs; call `HACOptions::default()`.
    //
    // Expect
    // ------
    // - `bandwidth=Fixed(1)`, `kernel=Bartlett`, `center=false`,
    //   `small_sample_correction=false`.
    fn hacoptions_default_matches_documented_defaults() {
        // Arrange
        let opts = HACOptions::default();

        // Act / Assert
        assert_eq!(opts.bandwidth, Bandwidth::Fixed(1));
        assert_eq!(opts.kernel, KernelType::Bartlett);
        assert!(!opts.center);
        assert!(!opts.small_sample_correction);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a partial TOML table overlays the defaults.
    //
    // Given
    // -----
    // - `bandwidth = "newey_west_rule"` and `kernel = "parzen"` only.
    //
    // Expect
    // ------
    // - Those two fields are set; the rest keep their defaults.
    fn hacoptions_deserialize_partial_table() {
        // Arrange
        let text = "bandwidth = \"newey_west_rule\"\nkernel = \"parzen\"\n";

        // Act
        let opts: HACOptions = toml::from_str(text).unwrap();

        // Assert
        assert_eq!(opts.bandwidth, Bandwidth::NeweyWestRule);
        assert_eq!(opts.kernel, KernelType::Parzen);
        assert!(!opts.center);
    }

    #[test]
    // Purpose
    // -------
    // Check that with `KernelType::IID` and `L = 0`, the HAC covariance
    // reduces to the IID OPG `(1/n) Sᵀ S`.
    //
    // Given
    // -----
    // - A small `n×p` score matrix.
    // - `HACOptions` with `kernel=IID`, `bandwidth=Fixed(0)`.
    //
    // Expect
    // ------
    // - `calculate_avg_scores_cov` matches `(1/n) Sᵀ S` and reports `L = 0`.
    fn calculate_avg_scores_cov_iid_l0_matches_opg() {
        // Arrange
        let scores = array![[1.0, 2.0], [3.0, 4.0], [-1.0, 0.5]];
        let n = scores.nrows() as f64;
        let opts = HACOptions::new(Bandwidth::Fixed(0), KernelType::IID, false, true);

        // Act
        let (hac_cov, lag) = calculate_avg_scores_cov(&opts, &scores).unwrap();
        let opg: Array2<f64> = scores.t().dot(&scores) * (1.0 / n);

        // Assert
        assert_eq!(lag, 0);
        assert_matrices_close(&hac_cov, &opg, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify that centering has no effect when score columns are already
    // exactly mean-zero.
    //
    // Given
    // -----
    // - An `n×p` score matrix whose columns sum to zero.
    // - Two `HACOptions` values that differ only in `center`.
    //
    // Expect
    // ------
    // - The resulting covariance matrices are equal up to numerical
    //   tolerance.
    fn calculate_avg_scores_cov_center_invariant_for_mean_zero() {
        // Arrange
        let scores = array![[1.0, -1.0], [-1.0, 1.0], [2.0, -2.0], [-2.0, 2.0]];
        let uncentered = HACOptions::new(Bandwidth::PlugIn, KernelType::Bartlett, false, true);
        let centered = HACOptions::new(Bandwidth::PlugIn, KernelType::Bartlett, true, true);

        // Act
        let (cov_uncentered, _) = calculate_avg_scores_cov(&uncentered, &scores).unwrap();
        let (cov_centered, _) = calculate_avg_scores_cov(&centered, &scores).unwrap();

        // Assert
        assert_matrices_close(&cov_uncentered, &cov_centered, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Confirm that the small-sample correction does not reduce the variance
    // for positively autocorrelated scores.
    //
    // Given
    // -----
    // - A univariate trending score series.
    // - Identical settings except `small_sample_correction = true/false`.
    //
    // Expect
    // ------
    // - The [0,0] entry with correction is at least as large as without.
    fn calculate_avg_scores_cov_small_sample_correction_inflates_variance() {
        // Arrange
        let scores = array![[1.0], [2.0], [3.0], [4.0]];
        let on = HACOptions::new(Bandwidth::Fixed(3), KernelType::Bartlett, false, true);
        let off = HACOptions::new(Bandwidth::Fixed(3), KernelType::Bartlett, false, false);

        // Act
        let (cov_on, _) = calculate_avg_scores_cov(&on, &scores).unwrap();
        let (cov_off, _) = calculate_avg_scores_cov(&off, &scores).unwrap();

        // Assert
        assert!(
            cov_on[[0, 0]] + TOL >= cov_off[[0, 0]],
            "correction should not reduce variance: on={} off={}",
            cov_on[[0, 0]],
            cov_off[[0, 0]]
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure that the HAC covariance matrix is symmetric for generic inputs.
    //
    // Given
    // -----
    // - A generic `n×p` score matrix with no special structure.
    //
    // Expect
    // ------
    // - `S[i,j] ≈ S[j,i]` for all i,j.
    fn calculate_avg_scores_cov_returns_symmetric_matrix() {
        // Arrange
        let scores =
            array![[0.5, -1.0, 2.0], [1.0, 0.0, -0.5], [-0.5, 1.5, 0.25], [2.0, -0.5, 1.0]];
        let opts = HACOptions::new(Bandwidth::PlugIn, KernelType::Parzen, true, true);

        // Act
        let (cov, _) = calculate_avg_scores_cov(&opts, &scores).unwrap();

        // Assert
        for i in 0..cov.nrows() {
            for j in 0..cov.ncols() {
                assert_relative_eq!(cov[[i, j]], cov[[j, i]], epsilon = TOL, max_relative = TOL);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Validate against a direct implementation of the HAC formula with the
    // Bartlett kernel and a bandwidth above `n−1`.
    //
    // Given
    // -----
    // - A 4×1 score matrix.
    // - `kernel=Bartlett`, `bandwidth=Fixed(10)`, `c_k = 1/n`.
    //
    // Expect
    // ------
    // - Effective bandwidth 3 and a covariance equal to the hand-computed
    //   estimator.
    fn calculate_avg_scores_cov_matches_manual_bartlett() {
        // Arrange
        let scores = array![[1.0], [0.5], [-0.25], [2.0]];
        let n = scores.nrows();
        let opts = HACOptions::new(Bandwidth::Fixed(10), KernelType::Bartlett, false, false);

        // Act
        let (cov_lib, lag) = calculate_avg_scores_cov(&opts, &scores).unwrap();

        let mut cov_manual = scores.t().dot(&scores) * (1.0 / n as f64);
        for k in 1..=3 {
            let gamma_k =
                scores.slice(s![k.., ..]).t().dot(&scores.slice(s![..n - k, ..])) / n as f64;
            let weight = KernelType::Bartlett.weight(k as f64 / 4.0);
            cov_manual = cov_manual + &gamma_k * weight + gamma_k.t().to_owned() * weight;
        }

        // Assert
        assert_eq!(lag, 3);
        assert_matrices_close(&cov_lib, &cov_manual, 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Check the Newey–West rule regime and the empty-input guard.
    //
    // Given
    // -----
    // - 120 rows of scores with `Bandwidth::NeweyWestRule`.
    // - A 0×2 score matrix.
    //
    // Expect
    // ------
    // - Effective lag ⌊4·1.2^{2/9}⌋ = 4; empty input yields `EmptyScores`.
    fn calculate_avg_scores_cov_rule_bandwidth_and_empty_input() {
        // Arrange
        let scores = Array2::from_shape_fn((120, 1), |(t, _)| ((t * 37 % 17) as f64) - 8.0);
        let opts = HACOptions::new(Bandwidth::NeweyWestRule, KernelType::Bartlett, false, false);
        let empty = Array2::<f64>::zeros((0, 2));

        // Act
        let (_, lag) = calculate_avg_scores_cov(&opts, &scores).unwrap();
        let err = calculate_avg_scores_cov(&opts, &empty).unwrap_err();

        // Assert
        assert_eq!(lag, 4);
        assert_eq!(err, InferenceError::EmptyScores { rows: 0, cols: 2 });
    }
}
