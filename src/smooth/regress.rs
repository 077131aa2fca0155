//! Kernel regression: Gaussian-weighted resampling onto a dense grid.
//!
//! For each sample point `s` on an evenly spaced grid over
//! `[min_year - buffer, max_year + buffer]`, the smoothed value of a column is
//!
//! `v(s) = Σ_j w_j(s) · count_j  /  Σ_j w_j(s)`
//!
//! with `w_j(s) = exp(-((s - year_j) / sigma)^2 / 2)`. Normalizing per sample
//! point makes the weights sum to 1 wherever any year has nonzero weight;
//! when the total weight underflows to 0 the output is 0, never NaN. This
//! produces smooth, continuous-looking curves even from sparse yearly counts.

use rayon::prelude::*;

use crate::domain::{CountTable, SmoothedTable};
use crate::math::{gaussian_weight, linspace};

/// Smooth every keyword column onto a dense synthetic sample grid.
///
/// `grid_points >= 2` and `buffer >= 0` are validated upstream. An empty
/// count table has no year domain to span and yields an empty smoothed table.
pub fn smooth_onto_grid(
    table: &CountTable,
    sigma: f64,
    grid_points: usize,
    buffer: f64,
) -> SmoothedTable {
    let Some((&min_year, &max_year)) = table.years.first().zip(table.years.last()) else {
        return SmoothedTable {
            samples: Vec::new(),
            keywords: table.keywords.clone(),
            values: Vec::new(),
        };
    };

    let samples = linspace(min_year as f64 - buffer, max_year as f64 + buffer, grid_points);

    let years: Vec<f64> = table.years.iter().map(|&y| y as f64).collect();

    let values: Vec<Vec<f64>> = samples
        .par_iter()
        .map(|&s| {
            let weights = normalized_weights(&years, s, sigma);
            (0..table.keywords.len())
                .map(|col| {
                    weights
                        .iter()
                        .enumerate()
                        .map(|(row, &w)| w * table.counts[row][col] as f64)
                        .sum()
                })
                .collect()
        })
        .collect();

    SmoothedTable {
        samples,
        keywords: table.keywords.clone(),
        values,
    }
}

/// Per-year Gaussian weights at sample point `s`, normalized to sum 1.
///
/// Returns all zeros when the raw weights underflow to a zero total (sample
/// point extremely far from every year relative to sigma).
fn normalized_weights(years: &[f64], s: f64, sigma: f64) -> Vec<f64> {
    let mut weights: Vec<f64> = years
        .iter()
        .map(|&year| gaussian_weight(s, year, sigma))
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        weights.iter_mut().for_each(|w| *w = 0.0);
        return weights;
    }

    weights.iter_mut().for_each(|w| *w /= total);
    weights
}
