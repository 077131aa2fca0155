//! Command-line parsing for the keyword-frequency smoother.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation/smoothing/rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{EdgeMode, SmoothMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ws", version, about = "Keyword-frequency smoother and stacked-area charting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline and render a stacked-area PNG.
    Chart(RunArgs),
    /// Run the pipeline and print the smoothed table (no chart).
    ///
    /// Uses the same options as `chart`; cosmetic flags are ignored. Useful
    /// for scripting and for inspecting the numbers behind a chart.
    Table(RunArgs),
    /// Generate a synthetic observation CSV for demo runs.
    Sample(SampleArgs),
}

/// Column display order for stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Keyword-set definition order (first keyword at the bottom of the stack).
    Keywords,
    /// Reversed keyword-set order, so the stack matches a legend read
    /// top-to-bottom.
    Reversed,
}

/// Common options for `chart` and `table`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// CSV source: local path or http(s) URL. Needs `year` and `word` columns.
    pub input: String,

    /// Name of the year column.
    #[arg(long, default_value = "year")]
    pub year_col: String,

    /// Name of the word column.
    #[arg(long, default_value = "word")]
    pub word_col: String,

    /// Ordered keyword set of interest (comma-separated).
    #[arg(short = 'k', long, value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,

    /// Smoothing strategy.
    #[arg(long, value_enum, default_value_t = SmoothMethod::Grid)]
    pub method: SmoothMethod,

    /// Gaussian kernel standard deviation, in years.
    #[arg(long, default_value_t = 0.6)]
    pub sigma: f64,

    /// Sample points for kernel regression.
    #[arg(long, default_value_t = 240)]
    pub grid_points: usize,

    /// Extra years beyond the data range covered by the regression grid.
    #[arg(long, default_value_t = 0.0)]
    pub grid_buffer: f64,

    /// Boundary handling for grid convolution.
    #[arg(long, value_enum, default_value_t = EdgeMode::Reflect)]
    pub edge: EdgeMode,

    /// Column stacking order.
    #[arg(long, value_enum, default_value_t = OrderArg::Reversed)]
    pub order: OrderArg,

    /// Explicit stacking order (comma-separated permutation of the keyword
    /// set); overrides --order.
    #[arg(long, value_delimiter = ',')]
    pub order_list: Option<Vec<String>>,

    /// Output PNG path.
    #[arg(short = 'o', long, default_value = "plot.png")]
    pub out: PathBuf,

    /// Chart width in pixels.
    #[arg(long, default_value_t = 1600)]
    pub width: u32,

    /// Chart height in pixels.
    #[arg(long, default_value_t = 960)]
    pub height: u32,

    /// Chart title.
    #[arg(long, default_value = "Keyword frequency over time")]
    pub title: String,

    /// Optional subtitle under the title.
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Optional caption (bottom-right, e.g. data source credit).
    #[arg(long)]
    pub caption: Option<String>,

    /// Fill colors as #rrggbb hex (comma-separated), cycled per column.
    #[arg(long, value_delimiter = ',')]
    pub colors: Option<Vec<String>>,

    /// Fill alpha for the stacked bands.
    #[arg(long, default_value_t = 0.8)]
    pub alpha: f64,

    /// Explicit x-axis lower bound (defaults to the sample domain).
    #[arg(long)]
    pub x_min: Option<f64>,

    /// Explicit x-axis upper bound (defaults to the sample domain).
    #[arg(long)]
    pub x_max: Option<f64>,

    /// x-axis label.
    #[arg(long, default_value = "Year")]
    pub x_label: String,

    /// y-axis label.
    #[arg(long, default_value = "Word frequency")]
    pub y_label: String,

    /// Export the smoothed table to this CSV path.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full run (config + table) to this JSON path.
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Print the smoothed table even in chart mode.
    #[arg(long)]
    pub print_table: bool,
}

/// Options for the synthetic sample generator.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "sample.csv")]
    pub out: PathBuf,

    /// Keywords to generate (comma-separated).
    #[arg(
        short = 'k',
        long,
        value_delimiter = ',',
        default_value = "data,analysis,cloud,software"
    )]
    pub keywords: Vec<String>,

    /// First year of the range.
    #[arg(long, default_value_t = 2005)]
    pub year_min: i32,

    /// Last year of the range.
    #[arg(long, default_value_t = 2023)]
    pub year_max: i32,

    /// Peak expected occurrences per keyword per year.
    #[arg(long, default_value_t = 25)]
    pub peak: u32,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
