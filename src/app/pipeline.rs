//! Shared smoothing-pipeline logic used by the `chart` and `table` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> ingest -> filter+aggregate -> smooth -> reorder columns
//!
//! The command handlers then focus on presentation (summary, chart, exports).
//! Every stage's output is an explicit value passed to the next stage; there
//! is no shared mutable state anywhere in a run.

use crate::domain::{CountTable, RunConfig, SmoothedTable};
use crate::error::AppError;
use crate::io::ingest::IngestedData;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub counts: CountTable,
    /// Smoothed table with columns already in display order.
    pub smoothed: SmoothedTable,
}

/// Execute the full smoothing pipeline and return the computed outputs.
pub fn run_smooth(config: &RunConfig) -> Result<RunOutput, AppError> {
    // 1) Validate configuration before any I/O or computation.
    crate::smooth::validate_config(&config.keywords, &config.smooth, &config.display_order)?;

    // 2) Load the raw CSV body (file or URL).
    let body = crate::data::read_source(&config.source)?;

    // 3) Parse into observations.
    let ingest =
        crate::io::ingest::read_observations(body.as_bytes(), &config.year_column, &config.word_column)?;

    run_smooth_with_ingest(config, ingest)
}

/// Execute the pipeline on pre-ingested observations.
///
/// This is what the in-memory tests use, and keeps re-smoothing with new
/// parameters possible without re-fetching the source.
pub fn run_smooth_with_ingest(
    config: &RunConfig,
    ingest: IngestedData,
) -> Result<RunOutput, AppError> {
    // 4) Filter + aggregate into the count table.
    let counts = crate::smooth::aggregate_counts(&ingest.observations, &config.keywords);

    // 5) Smooth per the configured strategy.
    let smoothed = crate::smooth::smooth_counts(&counts, &config.smooth);

    // 6) Reorder columns for display/stacking.
    let order = config.display_order.resolve(&config.keywords)?;
    let smoothed = smoothed.with_column_order(&order)?;

    Ok(RunOutput {
        ingest,
        counts,
        smoothed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChartStyle, DataSource, DisplayOrder, SmoothMethod, SmoothParams,
    };
    use std::path::PathBuf;

    fn config(keywords: &[&str]) -> RunConfig {
        RunConfig {
            source: DataSource::Path(PathBuf::from("unused.csv")),
            year_column: "year".to_string(),
            word_column: "word".to_string(),
            keywords: keywords.iter().map(|w| w.to_string()).collect(),
            smooth: SmoothParams::default(),
            display_order: DisplayOrder::Reversed,
            chart: ChartStyle::default(),
            out: PathBuf::from("plot.png"),
            export_table: None,
            export_json: None,
        }
    }

    fn ingest_from_csv(body: &str) -> IngestedData {
        crate::io::ingest::read_observations(body.as_bytes(), "year", "word").unwrap()
    }

    #[test]
    fn end_to_end_grid_run() {
        let body = "year,word\n2020,data\n2020,data\n2021,cloud\n2021,data\n2021,noise\n";
        let run = run_smooth_with_ingest(&config(&["data", "cloud"]), ingest_from_csv(body)).unwrap();

        assert_eq!(run.counts.years, vec![2020, 2021]);
        assert_eq!(run.counts.counts, vec![vec![2, 0], vec![1, 1]]);

        // Reversed display order: cloud first, data second.
        assert_eq!(run.smoothed.keywords, vec!["cloud", "data"]);
        assert_eq!(run.smoothed.samples.len(), 2);
    }

    #[test]
    fn end_to_end_kernel_regression_run() {
        let body = "year,word\n2018,data\n2020,data\n2023,data\n";
        let mut cfg = config(&["data"]);
        cfg.smooth.method = SmoothMethod::KernelRegression;
        cfg.smooth.grid_points = 120;

        let run = run_smooth_with_ingest(&cfg, ingest_from_csv(body)).unwrap();
        assert_eq!(run.smoothed.samples.len(), 120);
        assert_eq!(run.smoothed.samples[0], 2018.0);
        assert_eq!(*run.smoothed.samples.last().unwrap(), 2023.0);
        assert!(run.smoothed.values.iter().flatten().all(|&v| v >= 0.0));
    }

    #[test]
    fn empty_match_is_not_an_error() {
        let body = "year,word\n2020,apple\n2021,pear\n";
        let run = run_smooth_with_ingest(&config(&["data", "cloud"]), ingest_from_csv(body)).unwrap();

        assert!(run.counts.is_empty());
        assert!(run.smoothed.is_empty());
        assert_eq!(run.smoothed.keywords, vec!["cloud", "data"]);
    }

    #[test]
    fn bad_config_fails_before_io() {
        let mut cfg = config(&["data"]);
        cfg.smooth.sigma = -1.0;
        // Source path does not exist: validation must trip first.
        let err = run_smooth(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Sigma"));
    }

    #[test]
    fn custom_display_order_is_applied_exactly() {
        let body = "year,word\n2020,a\n2020,b\n2020,c\n";
        let mut cfg = config(&["a", "b", "c"]);
        cfg.display_order = DisplayOrder::Custom(vec![
            "b".to_string(),
            "c".to_string(),
            "a".to_string(),
        ]);

        let run = run_smooth_with_ingest(&cfg, ingest_from_csv(body)).unwrap();
        assert_eq!(run.smoothed.keywords, vec!["b", "c", "a"]);
    }

    #[test]
    fn determinism_across_identical_runs() {
        let body = "year,word\n2019,data\n2020,data\n2021,cloud\n";
        let cfg = config(&["data", "cloud"]);
        let a = run_smooth_with_ingest(&cfg, ingest_from_csv(body)).unwrap();
        let b = run_smooth_with_ingest(&cfg, ingest_from_csv(body)).unwrap();
        assert_eq!(a.smoothed, b.smoothed);
    }
}
