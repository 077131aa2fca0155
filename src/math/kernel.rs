//! Gaussian kernel primitives shared by both smoothing strategies.
//!
//! Two forms are needed:
//!
//! - a **discrete kernel** for grid convolution: weights at integer offsets
//!   `-r..=r`, truncated at 4 standard deviations and normalized to sum 1
//! - the **continuous pdf** for kernel regression, where weights are
//!   renormalized per sample point so the constant factor of the density
//!   cancels anyway
//!
//! Numerical notes:
//! - Truncation radius is `floor(4·sigma + 0.5)`, the common convention for
//!   discrete Gaussian filters. For very small sigma the radius collapses to
//!   0 and the kernel degenerates to the identity `[1.0]`.
//! - Normalization makes the discrete kernel weights sum to exactly 1.0 up to
//!   floating-point rounding, so smoothing of non-negative data stays
//!   non-negative and roughly mass-preserving.

/// Truncation point of the discrete kernel, in standard deviations.
const TRUNCATE_SD: f64 = 4.0;

/// Unnormalized Gaussian density at `x` for mean `mean` and std dev `sigma`.
///
/// The `1/(sigma·sqrt(2π))` factor is dropped: every caller renormalizes.
pub fn gaussian_weight(x: f64, mean: f64, sigma: f64) -> f64 {
    let z = (x - mean) / sigma;
    (-0.5 * z * z).exp()
}

/// Build a normalized discrete Gaussian kernel for integer offsets `-r..=r`.
///
/// Returns `(radius, weights)` with `weights.len() == 2 * radius + 1` and
/// `weights[radius]` the center tap. Sigma must be positive (validated
/// upstream); a tiny sigma yields `(0, vec![1.0])`, i.e. the identity.
pub fn discrete_kernel(sigma: f64) -> (usize, Vec<f64>) {
    let radius = (TRUNCATE_SD * sigma + 0.5).floor() as usize;

    let mut weights = Vec::with_capacity(2 * radius + 1);
    for offset in -(radius as i64)..=(radius as i64) {
        weights.push(gaussian_weight(offset as f64, 0.0, sigma));
    }

    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }

    (radius, weights)
}

/// `n` evenly spaced points over `[start, end]`, inclusive of both endpoints.
///
/// Requires `n >= 2` (validated upstream). The first and last points are set
/// exactly to `start` and `end` so the grid brackets the requested domain
/// without floating-point drift.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    out[0] = start;
    out[n - 1] = end;
    out
}
