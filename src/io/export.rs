//! Export the smoothed table to CSV / JSON.
//!
//! CSV is meant to be easy to consume in spreadsheets or downstream scripts;
//! JSON is the "portable" representation of a run: configuration metadata plus
//! the full sample grid and per-column values, so a chart can be re-rendered
//! or compared later without re-fetching the source.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{RunConfig, SmoothParams, SmoothedTable};
use crate::error::AppError;

/// A saved smoothing run (JSON schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFile {
    pub tool: String,
    pub source: String,
    pub keywords: Vec<String>,
    pub smooth: SmoothParams,
    /// Columns in display order (matches `table.keywords`).
    pub display_columns: Vec<String>,
    pub table: SmoothedTable,
}

/// Write the smoothed table to a CSV file: `sample` column, then one column
/// per keyword in display order.
pub fn write_table_csv(path: &Path, table: &SmoothedTable) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    let mut header = String::from("sample");
    for word in &table.keywords {
        header.push(',');
        header.push_str(word);
    }
    writeln!(file, "{header}")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (sample, row) in table.samples.iter().zip(&table.values) {
        let mut line = format!("{sample:.6}");
        for v in row {
            line.push_str(&format!(",{v:.6}"));
        }
        writeln!(file, "{line}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a run JSON file.
pub fn write_run_json(path: &Path, config: &RunConfig, table: &SmoothedTable) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create run JSON '{}': {e}", path.display()))
    })?;

    let run = RunFile {
        tool: "ws".to_string(),
        source: config.source.describe(),
        keywords: config.keywords.clone(),
        smooth: config.smooth.clone(),
        display_columns: table.keywords.clone(),
        table: table.clone(),
    };

    serde_json::to_writer_pretty(file, &run)
        .map_err(|e| AppError::new(2, format!("Failed to write run JSON: {e}")))?;

    Ok(())
}

/// Read a run JSON file.
pub fn read_run_json(path: &Path) -> Result<RunFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open run JSON '{}': {e}", path.display()))
    })?;
    let run: RunFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid run JSON: {e}")))?;
    Ok(run)
}
