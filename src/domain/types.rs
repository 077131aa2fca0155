//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation and smoothing
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One raw input record: a single occurrence of `word` in `year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub word: String,
}

impl Observation {
    pub fn new(year: i32, word: impl Into<String>) -> Self {
        Self {
            year,
            word: word.into(),
        }
    }
}

/// Which smoothing strategy to apply to the count table.
///
/// Both strategies are Gaussian; they differ in the output sample grid:
///
/// - `Grid` keeps the input years as the sample grid (discrete convolution).
/// - `KernelRegression` resamples onto a dense synthetic grid, which yields
///   continuous-looking curves even from sparse yearly counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SmoothMethod {
    Grid,
    KernelRegression,
}

/// Boundary handling for grid convolution.
///
/// Both modes are deterministic:
///
/// - `Reflect` mirrors the sequence about the edge (`d c b a | a b c d | d c b a`).
/// - `Extend` clamps to the edge sample (`a a a a | a b c d | d d d d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    Reflect,
    Extend,
}

/// Smoothing configuration.
///
/// `grid_points` and `grid_buffer` are only consulted in kernel-regression
/// mode; `edge_mode` only in grid mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothParams {
    pub method: SmoothMethod,
    /// Standard deviation of the Gaussian kernel, in years. Must be > 0.
    pub sigma: f64,
    /// Number of evenly spaced sample points for kernel regression. Must be >= 2.
    pub grid_points: usize,
    /// Extra years beyond `[min_year, max_year]` covered by the synthetic grid.
    ///
    /// Default 0, so the sample domain exactly brackets the input year range
    /// and the smoother never extrapolates beyond configured bounds.
    pub grid_buffer: f64,
    pub edge_mode: EdgeMode,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self {
            method: SmoothMethod::Grid,
            sigma: 0.6,
            grid_points: 240,
            grid_buffer: 0.0,
            edge_mode: EdgeMode::Reflect,
        }
    }
}

/// The caller-chosen column ordering used for visual stacking.
///
/// This is deliberately an explicit, named option: the stacking order decides
/// which band sits at the bottom of the chart, and `Reversed` is the common
/// choice so the stack matches a legend read top-to-bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayOrder {
    /// Keyword-set definition order.
    Keywords,
    /// Keyword-set definition order, reversed.
    Reversed,
    /// An explicit permutation of the keyword set.
    Custom(Vec<String>),
}

impl DisplayOrder {
    /// Resolve to a concrete column list for the given keyword set.
    ///
    /// A `Custom` list must be a permutation of `keywords`; anything else is
    /// an invalid configuration.
    pub fn resolve(&self, keywords: &[String]) -> Result<Vec<String>, AppError> {
        match self {
            DisplayOrder::Keywords => Ok(keywords.to_vec()),
            DisplayOrder::Reversed => Ok(keywords.iter().rev().cloned().collect()),
            DisplayOrder::Custom(list) => {
                if list.len() != keywords.len() {
                    return Err(AppError::new(
                        2,
                        format!(
                            "Display-order list has {} entries but the keyword set has {}.",
                            list.len(),
                            keywords.len()
                        ),
                    ));
                }
                for word in list {
                    if !keywords.contains(word) {
                        return Err(AppError::new(
                            2,
                            format!("Display-order entry '{word}' is not in the keyword set."),
                        ));
                    }
                }
                let mut seen: Vec<&String> = Vec::with_capacity(list.len());
                for word in list {
                    if seen.contains(&word) {
                        return Err(AppError::new(
                            2,
                            format!("Display-order entry '{word}' appears more than once."),
                        ));
                    }
                    seen.push(word);
                }
                Ok(list.clone())
            }
        }
    }
}

/// Year × keyword matrix of raw occurrence counts.
///
/// Rows are the distinct years present in the filtered input, sorted
/// ascending (contiguous or not). Columns follow the keyword-set order and
/// are zero-filled for absent (year, keyword) combinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    pub years: Vec<i32>,
    pub keywords: Vec<String>,
    /// `counts[row][col]` for `years[row]` × `keywords[col]`.
    pub counts: Vec<Vec<u64>>,
}

impl CountTable {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total occurrences across the whole table.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Per-keyword totals, in column order.
    pub fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.keywords.len()];
        for row in &self.counts {
            for (col, v) in row.iter().enumerate() {
                totals[col] += v;
            }
        }
        totals
    }

    /// Extract one keyword column as an ordered count sequence.
    pub fn column(&self, col: usize) -> Vec<u64> {
        self.counts.iter().map(|row| row[col]).collect()
    }
}

/// Year/sample × keyword matrix of smoothed values.
///
/// Sample points are either the input years (grid mode) or a denser synthetic
/// grid of real-valued positions (kernel-regression mode), always ascending.
/// Values are non-negative reals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedTable {
    pub samples: Vec<f64>,
    pub keywords: Vec<String>,
    /// `values[row][col]` for `samples[row]` × `keywords[col]`.
    pub values: Vec<Vec<f64>>,
}

impl SmoothedTable {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Return a copy with columns permuted into `order`.
    ///
    /// `order` must be a permutation of this table's keywords (use
    /// [`DisplayOrder::resolve`] to produce one).
    pub fn with_column_order(&self, order: &[String]) -> Result<SmoothedTable, AppError> {
        let mut indices = Vec::with_capacity(order.len());
        for word in order {
            let idx = self
                .keywords
                .iter()
                .position(|k| k == word)
                .ok_or_else(|| {
                    AppError::new(2, format!("Unknown column '{word}' in display order."))
                })?;
            indices.push(idx);
        }
        if indices.len() != self.keywords.len() {
            return Err(AppError::new(
                2,
                "Display order must cover every keyword column exactly once.",
            ));
        }

        let values = self
            .values
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect();

        Ok(SmoothedTable {
            samples: self.samples.clone(),
            keywords: order.to_vec(),
            values,
        })
    }

    /// Maximum row total (stack height), 0.0 for an empty table.
    pub fn max_stack(&self) -> f64 {
        self.values
            .iter()
            .map(|row| row.iter().sum::<f64>())
            .fold(0.0, f64::max)
    }
}

/// Where the raw CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// Classify a CLI string: anything starting with `http://` or `https://`
    /// is a URL, everything else a local path.
    pub fn from_arg(arg: &str) -> DataSource {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg.to_string())
        } else {
            DataSource::Path(PathBuf::from(arg))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Url(url) => url.clone(),
            DataSource::Path(path) => path.display().to_string(),
        }
    }
}

/// Chart styling for the stacked-area renderer.
///
/// These are cosmetics: they never affect the smoothed table itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub subtitle: Option<String>,
    pub caption: Option<String>,
    pub x_label: String,
    pub y_label: String,
    /// Per-column fill colors as `#rrggbb` hex strings, cycled if fewer than
    /// columns. Empty means the built-in palette.
    pub colors: Vec<String>,
    /// Fill alpha for the stacked bands, in `[0, 1]`.
    pub alpha: f64,
    /// Explicit x-axis display bounds; defaults to the sample domain.
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 960,
            title: "Keyword frequency over time".to_string(),
            subtitle: None,
            caption: None,
            x_label: "Year".to_string(),
            y_label: "Word frequency".to_string(),
            colors: Vec::new(),
            alpha: 0.8,
            x_min: None,
            x_max: None,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults); there is no hidden state
/// shared between stages.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DataSource,
    pub year_column: String,
    pub word_column: String,
    /// Fixed, ordered keyword set of interest. Defined by the caller, never
    /// derived from data.
    pub keywords: Vec<String>,
    pub smooth: SmoothParams,
    pub display_order: DisplayOrder,
    pub chart: ChartStyle,
    pub out: PathBuf,
    pub export_table: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn display_order_reversed() {
        let keywords = kws(&["data", "cloud", "software"]);
        let order = DisplayOrder::Reversed.resolve(&keywords).unwrap();
        assert_eq!(order, kws(&["software", "cloud", "data"]));
    }

    #[test]
    fn display_order_custom_must_be_permutation() {
        let keywords = kws(&["data", "cloud"]);

        let unknown = DisplayOrder::Custom(kws(&["data", "web"]));
        assert!(unknown.resolve(&keywords).is_err());

        let short = DisplayOrder::Custom(kws(&["data"]));
        assert!(short.resolve(&keywords).is_err());

        let dup = DisplayOrder::Custom(kws(&["data", "data"]));
        assert!(dup.resolve(&keywords).is_err());

        let ok = DisplayOrder::Custom(kws(&["cloud", "data"]));
        assert_eq!(ok.resolve(&keywords).unwrap(), kws(&["cloud", "data"]));
    }

    #[test]
    fn column_reorder_permutes_values() {
        let table = SmoothedTable {
            samples: vec![2020.0, 2021.0],
            keywords: kws(&["a", "b"]),
            values: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        };
        let swapped = table.with_column_order(&kws(&["b", "a"])).unwrap();
        assert_eq!(swapped.keywords, kws(&["b", "a"]));
        assert_eq!(swapped.values, vec![vec![2.0, 1.0], vec![4.0, 3.0]]);
    }

    #[test]
    fn data_source_classification() {
        assert_eq!(
            DataSource::from_arg("https://example.com/x.csv"),
            DataSource::Url("https://example.com/x.csv".to_string())
        );
        assert_eq!(
            DataSource::from_arg("data/x.csv"),
            DataSource::Path(PathBuf::from("data/x.csv"))
        );
    }

    #[test]
    fn count_table_totals() {
        let table = CountTable {
            years: vec![2020, 2021],
            keywords: kws(&["a", "b"]),
            counts: vec![vec![2, 0], vec![1, 1]],
        };
        assert_eq!(table.total(), 4);
        assert_eq!(table.column_totals(), vec![3, 1]);
        assert_eq!(table.column(0), vec![2, 1]);
    }
}
