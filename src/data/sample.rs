//! Synthetic observation generation for demo runs.
//!
//! `ws sample` writes a CSV the chart pipeline can consume without touching
//! the network. Each keyword gets a logistic "adoption curve" over the year
//! range with a randomized midpoint and steepness, plus Gaussian noise on the
//! yearly counts. Generation is fully determined by the seed: identical
//! seeds produce identical files.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::Observation;
use crate::error::AppError;

/// Configuration for the synthetic generator.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub keywords: Vec<String>,
    pub year_min: i32,
    pub year_max: i32,
    /// Peak expected occurrences per keyword per year.
    pub peak_count: u32,
    pub seed: u64,
}

/// Generate synthetic observations, sorted by year then keyword-set order.
pub fn generate_observations(config: &SampleConfig) -> Result<Vec<Observation>, AppError> {
    if config.keywords.is_empty() {
        return Err(AppError::new(2, "Sample generation needs at least one keyword."));
    }
    if config.year_max < config.year_min {
        return Err(AppError::new(
            2,
            format!(
                "Invalid year range for sample generation ({}..{}).",
                config.year_min, config.year_max
            ),
        ));
    }
    if config.peak_count == 0 {
        return Err(AppError::new(2, "Peak count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.peak_count as f64 * 0.1)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let span = (config.year_max - config.year_min) as f64;
    let mut observations = Vec::new();

    // Per-keyword curve parameters are drawn first so each keyword's shape is
    // independent of how many observations earlier keywords produced.
    struct Curve {
        midpoint: f64,
        steepness: f64,
    }
    let curves: Vec<Curve> = config
        .keywords
        .iter()
        .map(|_| Curve {
            midpoint: config.year_min as f64 + rng.gen_range(0.2..0.8) * span.max(1.0),
            steepness: rng.gen_range(0.3..1.2),
        })
        .collect();

    for year in config.year_min..=config.year_max {
        for (word, curve) in config.keywords.iter().zip(&curves) {
            let z = curve.steepness * (year as f64 - curve.midpoint);
            let level = config.peak_count as f64 / (1.0 + (-z).exp());
            let count = (level + noise.sample(&mut rng)).round().max(0.0) as u32;
            for _ in 0..count {
                observations.push(Observation::new(year, word.clone()));
            }
        }
    }

    Ok(observations)
}

/// Serialize observations as a `year,word` CSV body.
pub fn observations_to_csv(observations: &[Observation]) -> String {
    let mut out = String::from("year,word\n");
    for obs in observations {
        out.push_str(&format!("{},{}\n", obs.year, obs.word));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SampleConfig {
        SampleConfig {
            keywords: vec!["data".to_string(), "cloud".to_string()],
            year_min: 2005,
            year_max: 2023,
            peak_count: 20,
            seed: 42,
        }
    }

    #[test]
    fn same_seed_same_output() {
        let a = generate_observations(&config()).unwrap();
        let b = generate_observations(&config()).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn different_seed_different_output() {
        let a = generate_observations(&config()).unwrap();
        let mut other = config();
        other.seed = 43;
        let b = generate_observations(&other).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn years_stay_in_range() {
        let obs = generate_observations(&config()).unwrap();
        assert!(obs.iter().all(|o| (2005..=2023).contains(&o.year)));
    }

    #[test]
    fn rejects_bad_config() {
        let mut c = config();
        c.keywords.clear();
        assert!(generate_observations(&c).is_err());

        let mut c = config();
        c.year_max = c.year_min - 1;
        assert!(generate_observations(&c).is_err());

        let mut c = config();
        c.peak_count = 0;
        assert!(generate_observations(&c).is_err());
    }

    #[test]
    fn csv_body_is_parseable_by_ingest() {
        let obs = generate_observations(&config()).unwrap();
        let body = observations_to_csv(&obs);
        let ingest = crate::io::ingest::read_observations(body.as_bytes(), "year", "word").unwrap();
        assert_eq!(ingest.rows_used, obs.len());
        assert!(ingest.row_errors.is_empty());
    }
}
