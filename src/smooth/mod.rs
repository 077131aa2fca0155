//! The keyword-frequency smoother.
//!
//! This is the one piece of reproducible logic the whole tool exists for:
//!
//! 1. filter observations down to the configured keyword set (`aggregate`)
//! 2. aggregate into a year × keyword count table (`aggregate`)
//! 3. Gaussian-smooth each keyword column along the year axis, either by
//!    discrete convolution on the original year grid (`grid`) or by kernel
//!    regression onto a dense synthetic grid (`regress`)
//!
//! Column display ordering lives on the table types in `domain`; rendering and
//! exports consume the result and never feed back into it.

use crate::domain::{CountTable, DisplayOrder, SmoothMethod, SmoothParams, SmoothedTable};
use crate::error::AppError;

pub mod aggregate;
pub mod grid;
pub mod regress;

pub use aggregate::aggregate_counts;

/// Validate the smoother configuration before any computation.
///
/// Fails fast (exit code 2) on: empty keyword set, duplicate keywords,
/// non-positive or non-finite sigma, a kernel-regression grid with fewer than
/// two points, a negative grid buffer, or a display order that is not a
/// permutation of the keyword set.
pub fn validate_config(
    keywords: &[String],
    params: &SmoothParams,
    display_order: &DisplayOrder,
) -> Result<(), AppError> {
    if keywords.is_empty() {
        return Err(AppError::new(2, "Keyword set must not be empty."));
    }
    for (i, word) in keywords.iter().enumerate() {
        if word.trim().is_empty() {
            return Err(AppError::new(2, "Keyword set contains an empty keyword."));
        }
        if keywords[..i].contains(word) {
            return Err(AppError::new(
                2,
                format!("Keyword '{word}' appears more than once in the keyword set."),
            ));
        }
    }

    if !params.sigma.is_finite() || params.sigma <= 0.0 {
        return Err(AppError::new(
            2,
            format!("Sigma must be a positive number (got {}).", params.sigma),
        ));
    }

    if params.method == SmoothMethod::KernelRegression {
        if params.grid_points < 2 {
            return Err(AppError::new(
                2,
                "Kernel regression needs at least 2 grid points.",
            ));
        }
        if !params.grid_buffer.is_finite() || params.grid_buffer < 0.0 {
            return Err(AppError::new(
                2,
                format!("Grid buffer must be >= 0 (got {}).", params.grid_buffer),
            ));
        }
    }

    // Resolve-and-discard to surface bad custom orders before computing.
    display_order.resolve(keywords).map(|_| ())
}

/// Smooth a count table with the configured strategy.
///
/// Pure transformation: the count table is not modified, and identical inputs
/// produce identical outputs. An empty count table yields an empty smoothed
/// table (kernel regression has no year domain to span in that case).
pub fn smooth_counts(table: &CountTable, params: &SmoothParams) -> SmoothedTable {
    match params.method {
        SmoothMethod::Grid => grid::smooth_on_grid(table, params.sigma, params.edge_mode),
        SmoothMethod::KernelRegression => regress::smooth_onto_grid(
            table,
            params.sigma,
            params.grid_points,
            params.grid_buffer,
        ),
    }
}
