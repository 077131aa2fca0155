//! Filter + aggregate: raw observations → year × keyword count table.
//!
//! Semantics:
//!
//! - observations whose word is outside the keyword set are discarded, not an
//!   error
//! - rows are the distinct years present in the *filtered* input, ascending
//! - every configured keyword gets a column, zero-filled where absent
//! - an empty (or fully non-matching) input yields an empty table

use std::collections::BTreeMap;

use crate::domain::{CountTable, Observation};

/// Build the count table for `keywords` from raw observations.
pub fn aggregate_counts(observations: &[Observation], keywords: &[String]) -> CountTable {
    // BTreeMap keeps years sorted ascending for free.
    let mut rows: BTreeMap<i32, Vec<u64>> = BTreeMap::new();

    for obs in observations {
        let Some(col) = keywords.iter().position(|k| k == &obs.word) else {
            continue;
        };
        let row = rows
            .entry(obs.year)
            .or_insert_with(|| vec![0u64; keywords.len()]);
        row[col] += 1;
    }

    let mut years = Vec::with_capacity(rows.len());
    let mut counts = Vec::with_capacity(rows.len());
    for (year, row) in rows {
        years.push(year);
        counts.push(row);
    }

    CountTable {
        years,
        keywords: keywords.to_vec(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn worked_example() {
        // (2020,"data") x2, (2021,"cloud"), (2021,"data") with set ["data","cloud"]:
        // 2020 -> {data: 2, cloud: 0}, 2021 -> {data: 1, cloud: 1}.
        let obs = vec![
            Observation::new(2020, "data"),
            Observation::new(2020, "data"),
            Observation::new(2021, "cloud"),
            Observation::new(2021, "data"),
        ];
        let table = aggregate_counts(&obs, &kws(&["data", "cloud"]));

        assert_eq!(table.years, vec![2020, 2021]);
        assert_eq!(table.keywords, kws(&["data", "cloud"]));
        assert_eq!(table.counts, vec![vec![2, 0], vec![1, 1]]);
    }

    #[test]
    fn words_outside_set_are_discarded() {
        let obs = vec![
            Observation::new(2020, "data"),
            Observation::new(2020, "banana"),
            Observation::new(2022, "banana"),
        ];
        let table = aggregate_counts(&obs, &kws(&["data"]));

        // 2022 only carried a non-matching word, so it contributes no row.
        assert_eq!(table.years, vec![2020]);
        assert_eq!(table.counts, vec![vec![1]]);
    }

    #[test]
    fn absent_keyword_still_gets_a_zero_column() {
        let obs = vec![Observation::new(2020, "data")];
        let table = aggregate_counts(&obs, &kws(&["data", "quantum"]));

        assert_eq!(table.keywords, kws(&["data", "quantum"]));
        assert_eq!(table.counts, vec![vec![1, 0]]);
        assert_eq!(table.column_totals(), vec![1, 0]);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = aggregate_counts(&[], &kws(&["data", "cloud"]));
        assert!(table.is_empty());
        assert_eq!(table.keywords.len(), 2);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn no_matches_yields_empty_table() {
        let obs = vec![
            Observation::new(2019, "apple"),
            Observation::new(2020, "pear"),
        ];
        let table = aggregate_counts(&obs, &kws(&["data", "cloud"]));
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn years_sorted_even_when_input_is_not() {
        let obs = vec![
            Observation::new(2023, "data"),
            Observation::new(2019, "data"),
            Observation::new(2021, "data"),
        ];
        let table = aggregate_counts(&obs, &kws(&["data"]));
        assert_eq!(table.years, vec![2019, 2021, 2023]);
    }

    #[test]
    fn column_order_follows_keyword_set_not_first_appearance() {
        let obs = vec![
            Observation::new(2020, "cloud"),
            Observation::new(2020, "data"),
        ];
        let table = aggregate_counts(&obs, &kws(&["data", "cloud"]));
        assert_eq!(table.keywords, kws(&["data", "cloud"]));
        assert_eq!(table.counts, vec![vec![1, 1]]);
    }
}
