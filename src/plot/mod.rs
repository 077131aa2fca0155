//! Chart rendering.
//!
//! The smoothed table is the contract; everything in here is cosmetics
//! (colors, legend, titles, export size) and never feeds back into the
//! pipeline.

pub mod stacked;

pub use stacked::*;
