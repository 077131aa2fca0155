//! Grid convolution: discrete Gaussian smoothing on the original year axis.
//!
//! Each keyword column is convolved independently with a normalized discrete
//! Gaussian kernel (truncated at 4 standard deviations, see `math::kernel`).
//! The output sample grid is exactly the input years, so the table keeps one
//! row per distinct input year.
//!
//! Note: the year rows are treated as an ordered sequence, matching the
//! classic array-filter behavior this replaces. Gaps between years are not
//! widened before convolution; callers who want gap-aware smoothing should
//! use kernel regression instead.

use rayon::prelude::*;

use crate::domain::{CountTable, EdgeMode, SmoothedTable};
use crate::math::discrete_kernel;

/// Smooth every keyword column over the input-year grid.
pub fn smooth_on_grid(table: &CountTable, sigma: f64, edge_mode: EdgeMode) -> SmoothedTable {
    let samples: Vec<f64> = table.years.iter().map(|&y| y as f64).collect();

    if table.is_empty() {
        return SmoothedTable {
            samples,
            keywords: table.keywords.clone(),
            values: Vec::new(),
        };
    }

    let (radius, kernel) = discrete_kernel(sigma);

    // Smooth per column, then transpose back into row-major form.
    let columns: Vec<Vec<f64>> = (0..table.keywords.len())
        .into_par_iter()
        .map(|col| convolve(&table.column(col), radius, &kernel, edge_mode))
        .collect();

    let values = (0..samples.len())
        .map(|row| columns.iter().map(|c| c[row]).collect())
        .collect();

    SmoothedTable {
        samples,
        keywords: table.keywords.clone(),
        values,
    }
}

fn convolve(counts: &[u64], radius: usize, kernel: &[f64], edge_mode: EdgeMode) -> Vec<f64> {
    let n = counts.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let mut acc = 0.0;
        for (k, w) in kernel.iter().enumerate() {
            let offset = k as i64 - radius as i64;
            let idx = edge_index(i as i64 + offset, n, edge_mode);
            acc += w * counts[idx] as f64;
        }
        out.push(acc);
    }

    out
}

/// Map a possibly out-of-range index into `0..n` per the edge mode.
///
/// `Reflect` mirrors about the boundary including the edge sample
/// (`d c b a | a b c d | d c b a`); `Extend` clamps to the edge sample.
/// Reflection is applied repeatedly so kernels wider than the sequence still
/// resolve to valid indices.
fn edge_index(idx: i64, n: usize, edge_mode: EdgeMode) -> usize {
    let n = n as i64;
    match edge_mode {
        EdgeMode::Extend => idx.clamp(0, n - 1) as usize,
        EdgeMode::Reflect => {
            let mut i = idx;
            loop {
                if i < 0 {
                    i = -i - 1;
                } else if i >= n {
                    i = 2 * n - i - 1;
                } else {
                    return i as usize;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn table(years: Vec<i32>, keywords: &[&str], counts: Vec<Vec<u64>>) -> CountTable {
        CountTable {
            years,
            keywords: kws(keywords),
            counts,
        }
    }

    #[test]
    fn reflect_edge_indexing() {
        assert_eq!(edge_index(-1, 4, EdgeMode::Reflect), 0);
        assert_eq!(edge_index(-2, 4, EdgeMode::Reflect), 1);
        assert_eq!(edge_index(4, 4, EdgeMode::Reflect), 3);
        assert_eq!(edge_index(5, 4, EdgeMode::Reflect), 2);
        assert_eq!(edge_index(2, 4, EdgeMode::Reflect), 2);
        // Wider than the sequence: -5 reflects to 4, then back to 3.
        assert_eq!(edge_index(-5, 4, EdgeMode::Reflect), 3);
    }

    #[test]
    fn extend_edge_indexing() {
        assert_eq!(edge_index(-3, 4, EdgeMode::Extend), 0);
        assert_eq!(edge_index(9, 4, EdgeMode::Extend), 3);
        assert_eq!(edge_index(1, 4, EdgeMode::Extend), 1);
    }

    #[test]
    fn near_zero_sigma_is_near_identity() {
        let t = table(
            vec![2020, 2021],
            &["data", "cloud"],
            vec![vec![2, 0], vec![1, 1]],
        );
        let smoothed = smooth_on_grid(&t, 1e-9, EdgeMode::Reflect);

        assert_eq!(smoothed.samples, vec![2020.0, 2021.0]);
        for (row, expected) in smoothed.values.iter().zip([[2.0, 0.0], [1.0, 1.0]]) {
            for (v, e) in row.iter().zip(expected) {
                assert!((v - e).abs() < 1e-9, "got {v}, expected {e}");
            }
        }
    }

    #[test]
    fn preserves_sample_grid_and_column_count() {
        let t = table(
            vec![2005, 2006, 2009, 2010],
            &["a", "b", "c"],
            vec![
                vec![1, 0, 0],
                vec![0, 2, 0],
                vec![0, 0, 3],
                vec![4, 0, 0],
            ],
        );
        let smoothed = smooth_on_grid(&t, 0.6, EdgeMode::Reflect);
        assert_eq!(smoothed.samples.len(), 4);
        assert_eq!(smoothed.keywords, t.keywords);
        assert!(smoothed.values.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn output_is_non_negative() {
        let t = table(
            vec![2000, 2001, 2002, 2003, 2004],
            &["w"],
            vec![vec![0], vec![10], vec![0], vec![0], vec![7]],
        );
        for mode in [EdgeMode::Reflect, EdgeMode::Extend] {
            let smoothed = smooth_on_grid(&t, 1.2, mode);
            assert!(smoothed.values.iter().flatten().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn all_zero_column_stays_zero() {
        let t = table(
            vec![2000, 2001, 2002],
            &["seen", "unseen"],
            vec![vec![3, 0], vec![1, 0], vec![2, 0]],
        );
        let smoothed = smooth_on_grid(&t, 0.6, EdgeMode::Reflect);
        for row in &smoothed.values {
            assert_eq!(row[1], 0.0);
        }
    }

    #[test]
    fn deterministic_across_runs() {
        let t = table(
            vec![2000, 2001, 2002, 2003],
            &["a", "b"],
            vec![vec![5, 1], vec![0, 2], vec![3, 3], vec![1, 0]],
        );
        let a = smooth_on_grid(&t, 0.55, EdgeMode::Reflect);
        let b = smooth_on_grid(&t, 0.55, EdgeMode::Reflect);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_table_smooths_to_empty() {
        let t = table(vec![], &["a"], vec![]);
        let smoothed = smooth_on_grid(&t, 0.6, EdgeMode::Reflect);
        assert!(smoothed.is_empty());
        assert_eq!(smoothed.keywords, kws(&["a"]));
    }

    #[test]
    fn smoothing_spreads_mass_to_neighbors() {
        let t = table(
            vec![2000, 2001, 2002],
            &["w"],
            vec![vec![0], vec![9], vec![0]],
        );
        let smoothed = smooth_on_grid(&t, 0.6, EdgeMode::Reflect);
        // The spike leaks into adjacent years and shrinks at its center.
        assert!(smoothed.values[0][0] > 0.0);
        assert!(smoothed.values[2][0] > 0.0);
        assert!(smoothed.values[1][0] < 9.0);
    }
}
