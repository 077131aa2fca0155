//! CSV ingest and normalization.
//!
//! This module turns a raw CSV body into a clean sequence of
//! `Observation { year, word }` records.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no filtering or smoothing logic here — words
//!   outside the keyword set are still valid observations at this stage

use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;

use crate::domain::Observation;
use crate::error::AppError;

/// Summary stats about the observations actually read.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_observations: usize,
    pub year_min: i32,
    pub year_max: i32,
    pub distinct_words: usize,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: observations + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub observations: Vec<Observation>,
    /// `None` when the file had headers but no usable rows.
    pub stats: Option<DatasetStats>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Read observations from a CSV body.
///
/// `year_column` / `word_column` are matched case-insensitively against the
/// header row. A missing required column is fatal; individual rows with an
/// unparseable year or an empty word are skipped and reported.
pub fn read_observations(
    reader: impl Read,
    year_column: &str,
    word_column: &str,
) -> Result<IngestedData, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);

    let year_idx = *header_map
        .get(&normalize_header_name(year_column))
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{year_column}`")))?;
    let word_idx = *header_map
        .get(&normalize_header_name(word_column))
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{word_column}`")))?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in csv_reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, year_idx, word_idx) {
            Ok(obs) => observations.push(obs),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = observations.len();
    let stats = compute_stats(&observations);

    Ok(IngestedData {
        observations,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿year"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, year_idx: usize, word_idx: usize) -> Result<Observation, String> {
    let year_raw = record
        .get(year_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing year value.".to_string())?;

    // Some exports serialize integer years as floats ("2020.0"); accept both.
    let year = year_raw
        .parse::<i32>()
        .or_else(|_| {
            year_raw
                .parse::<f64>()
                .map_err(|_| ())
                .and_then(|v| {
                    if v.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(&v) {
                        Ok(v as i32)
                    } else {
                        Err(())
                    }
                })
        })
        .map_err(|_| format!("Invalid year '{year_raw}'."))?;

    let word = record
        .get(word_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing word value.".to_string())?;

    Ok(Observation::new(year, word))
}

fn compute_stats(observations: &[Observation]) -> Option<DatasetStats> {
    if observations.is_empty() {
        return None;
    }

    let mut year_min = i32::MAX;
    let mut year_max = i32::MIN;
    let mut words: Vec<&str> = observations.iter().map(|o| o.word.as_str()).collect();

    for obs in observations {
        year_min = year_min.min(obs.year);
        year_max = year_max.max(obs.year);
    }

    words.sort_unstable();
    words.dedup();

    Some(DatasetStats {
        n_observations: observations.len(),
        year_min,
        year_max,
        distinct_words: words.len(),
    })
}
