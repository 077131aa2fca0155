//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the smoothing pipeline
//! - prints the run summary / table preview
//! - renders the chart and writes optional exports

use clap::Parser;

use crate::cli::{Command, OrderArg, RunArgs, SampleArgs};
use crate::domain::{ChartStyle, DataSource, DisplayOrder, RunConfig, SmoothParams};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ws` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Chart(args) => handle_run(args, OutputMode::Chart),
        Command::Table(args) => handle_run(args, OutputMode::TableOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Chart,
    TableOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_smooth(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.counts, &config)
    );

    if mode == OutputMode::TableOnly || args.print_table {
        println!("{}", crate::report::format_table_preview(&run.smoothed, 40));
    }

    if mode == OutputMode::Chart {
        if run.smoothed.is_empty() {
            // Never render a chart from an empty result; the summary already
            // carries the warning.
            println!("warning: skipping chart for an empty result");
        } else {
            crate::plot::render_stacked_area(&run.smoothed, &config.chart, &config.out)?;
            println!("Chart written to {}", config.out.display());
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_table {
        crate::io::export::write_table_csv(path, &run.smoothed)?;
        println!("Table written to {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_run_json(path, &config, &run.smoothed)?;
        println!("Run written to {}", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::sample::SampleConfig {
        keywords: args.keywords,
        year_min: args.year_min,
        year_max: args.year_max,
        peak_count: args.peak,
        seed: args.seed,
    };

    let observations = crate::data::sample::generate_observations(&config)?;
    let body = crate::data::sample::observations_to_csv(&observations);

    std::fs::write(&args.out, body).map_err(|e| {
        AppError::new(2, format!("Failed to write sample CSV '{}': {e}", args.out.display()))
    })?;

    println!(
        "Wrote {} observations to {}",
        observations.len(),
        args.out.display()
    );
    Ok(())
}

/// Build the pipeline configuration from CLI flags.
pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    if !(0.0..=1.0).contains(&args.alpha) {
        return Err(AppError::new(
            2,
            format!("Alpha must be in [0, 1] (got {}).", args.alpha),
        ));
    }

    let display_order = match &args.order_list {
        Some(list) => DisplayOrder::Custom(list.clone()),
        None => match args.order {
            OrderArg::Keywords => DisplayOrder::Keywords,
            OrderArg::Reversed => DisplayOrder::Reversed,
        },
    };

    Ok(RunConfig {
        source: DataSource::from_arg(&args.input),
        year_column: args.year_col.clone(),
        word_column: args.word_col.clone(),
        keywords: args.keywords.clone(),
        smooth: SmoothParams {
            method: args.method,
            sigma: args.sigma,
            grid_points: args.grid_points,
            grid_buffer: args.grid_buffer,
            edge_mode: args.edge,
        },
        display_order,
        chart: ChartStyle {
            width: args.width,
            height: args.height,
            title: args.title.clone(),
            subtitle: args.subtitle.clone(),
            caption: args.caption.clone(),
            x_label: args.x_label.clone(),
            y_label: args.y_label.clone(),
            colors: args.colors.clone().unwrap_or_default(),
            alpha: args.alpha,
            x_min: args.x_min,
            x_max: args.x_max,
        },
        out: args.out.clone(),
        export_table: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}
