//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - smoothed-table exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
