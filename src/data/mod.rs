//! Data acquisition.
//!
//! - `fetch`: resolve a CLI source string and read the raw CSV body from a
//!   local file or an `http(s)` URL
//! - `sample`: deterministic synthetic observation generator for demo runs

pub mod fetch;
pub mod sample;

pub use fetch::*;
pub use sample::*;
