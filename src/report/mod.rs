//! Reporting utilities: run summaries, warnings, and table previews.
//!
//! We keep formatting code in one place so:
//! - the aggregation/smoothing code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;
