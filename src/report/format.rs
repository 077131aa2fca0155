//! Formatted terminal output for a pipeline run.

use crate::domain::{CountTable, RunConfig, SmoothMethod, SmoothedTable};
use crate::io::ingest::IngestedData;

/// Format the full run summary (ingest stats + aggregation + smoothing setup).
///
/// Warning-level conditions (skipped rows, all-zero keywords, an empty
/// result) show up here as `warning:` lines; they never abort the run.
pub fn format_run_summary(ingest: &IngestedData, counts: &CountTable, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== ws - keyword frequency smoother ===\n");
    out.push_str(&format!("Source: {}\n", config.source.describe()));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));

    if let Some(stats) = &ingest.stats {
        out.push_str(&format!(
            "Input: n={} | years=[{}, {}] | distinct words={}\n",
            stats.n_observations, stats.year_min, stats.year_max, stats.distinct_words
        ));
    }

    let method = match config.smooth.method {
        SmoothMethod::Grid => format!(
            "grid (sigma={}, edge={:?})",
            config.smooth.sigma, config.smooth.edge_mode
        ),
        SmoothMethod::KernelRegression => format!(
            "kernel-regression (sigma={}, points={}, buffer={})",
            config.smooth.sigma, config.smooth.grid_points, config.smooth.grid_buffer
        ),
    };
    out.push_str(&format!("Smoothing: {method}\n"));

    out.push_str("\nKeyword totals:\n");
    let totals = counts.column_totals();
    for (word, total) in counts.keywords.iter().zip(&totals) {
        out.push_str(&format!("  {word:<16} {total}\n"));
    }

    for row_error in ingest.row_errors.iter().take(5) {
        out.push_str(&format!(
            "warning: line {}: {}\n",
            row_error.line, row_error.message
        ));
    }
    if ingest.row_errors.len() > 5 {
        out.push_str(&format!(
            "warning: {} more rows skipped\n",
            ingest.row_errors.len() - 5
        ));
    }

    if counts.is_empty() {
        out.push_str("warning: no observations matched the keyword set; result is empty\n");
    } else {
        for (word, total) in counts.keywords.iter().zip(&totals) {
            if *total == 0 {
                out.push_str(&format!(
                    "warning: keyword '{word}' never occurs; its column is all zeros\n"
                ));
            }
        }
    }

    out
}

/// Format the smoothed table for terminal inspection (`ws table`).
///
/// Large regression grids are elided to the first/last rows to keep output
/// readable; exports carry the full table.
pub fn format_table_preview(table: &SmoothedTable, max_rows: usize) -> String {
    let mut out = String::new();

    out.push_str("sample");
    for word in &table.keywords {
        out.push_str(&format!(",{word}"));
    }
    out.push('\n');

    let n = table.samples.len();
    let write_row = |out: &mut String, row: usize| {
        out.push_str(&format!("{:.2}", table.samples[row]));
        for v in &table.values[row] {
            out.push_str(&format!(",{v:.3}"));
        }
        out.push('\n');
    };

    if n <= max_rows {
        for row in 0..n {
            write_row(&mut out, row);
        }
    } else {
        let head = max_rows / 2;
        let tail = max_rows - head;
        for row in 0..head {
            write_row(&mut out, row);
        }
        out.push_str(&format!("... ({} rows elided)\n", n - max_rows));
        for row in (n - tail)..n {
            write_row(&mut out, row);
        }
    }

    out
}
