//! Mathematical utilities: Gaussian kernels and sample grids.

pub mod kernel;

pub use kernel::*;
