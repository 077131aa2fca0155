//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw input observations (`Observation`)
//! - smoothing configuration (`SmoothMethod`, `EdgeMode`, `SmoothParams`)
//! - the year × keyword tables (`CountTable`, `SmoothedTable`)
//! - column display ordering (`DisplayOrder`)
//! - chart styling (`ChartStyle`) and the full run configuration (`RunConfig`)

pub mod types;

pub use types::*;
