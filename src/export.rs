use std::fs::File;
use std::path::Path;

use log::info;
use polars::prelude::*;

use crate::error::HexError;
use crate::schema::pattern;
use crate::scoring::HexagonalPattern;

/// One row per pattern with its center and lettered pair slots.
///
/// `slots` fixes the number of pair column groups (normally the number of
/// target intervals); a pattern with fewer pairs leaves the extra slots null.
pub fn patterns_to_frame(patterns: &[HexagonalPattern], slots: usize) -> Result<DataFrame, HexError> {
    let ids: Vec<String> = (1..=patterns.len()).map(|i| format!("#{i}")).collect();
    let center_dates: Vec<String> = patterns.iter().map(|p| p.center.full_date()).collect();
    let center_categories: Vec<&str> = patterns.iter().map(|p| p.center.category.as_str()).collect();
    let center_days: Vec<i64> = patterns.iter().map(|p| p.center.day_index).collect();
    let scores: Vec<f64> = patterns.iter().map(|p| p.score).collect();

    let mut columns = vec![
        Column::new(pattern::PATTERN_ID.into(), &ids),
        Column::new(pattern::CENTER_DATE.into(), &center_dates),
        Column::new(pattern::CENTER_CATEGORY.into(), &center_categories),
        Column::new(pattern::CENTER_DAY_INDEX.into(), &center_days),
        Column::new(pattern::SCORE.into(), &scores),
    ];

    for slot in 0..slots {
        let left: Vec<Option<String>> = patterns
            .iter()
            .map(|p| p.pairs.get(slot).map(|pair| pair.left.full_date()))
            .collect();
        let right: Vec<Option<String>> = patterns
            .iter()
            .map(|p| p.pairs.get(slot).map(|pair| pair.right.full_date()))
            .collect();
        let avg: Vec<Option<f64>> = patterns
            .iter()
            .map(|p| p.pairs.get(slot).map(|pair| round_tenths(pair.average_distance)))
            .collect();

        columns.push(Column::new(pattern::pair_left_date(slot).into(), &left));
        columns.push(Column::new(pattern::pair_right_date(slot).into(), &right));
        columns.push(Column::new(pattern::pair_avg_distance(slot).into(), &avg));
    }

    Ok(DataFrame::new(columns)?)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Write the pattern table as CSV, prefixed with a UTF-8 byte-order mark.
pub fn write_patterns_csv(
    path: &Path,
    patterns: &[HexagonalPattern],
    slots: usize,
) -> Result<(), HexError> {
    let mut df = patterns_to_frame(patterns, slots)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_bom(true)
        .include_header(true)
        .finish(&mut df)?;
    info!("Wrote {} patterns to {}", patterns.len(), path.display());
    Ok(())
}

/// Patterns ordered by descending score, ties kept in discovery order.
pub fn rank_by_score(patterns: &[HexagonalPattern]) -> Vec<&HexagonalPattern> {
    let mut ranked: Vec<&HexagonalPattern> = patterns.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::event::tests::sequence_of;
    use crate::search::find_all_patterns;

    fn sample_patterns() -> Vec<HexagonalPattern> {
        // an exact pair around 1034, off-by-one pairs around later centers
        let seq = sequence_of(&[517, 1034, 1551, 1552, 2069, 2587]);
        let config = SearchConfig::default()
            .with_target_distances(vec![517.0])
            .with_tolerance(1.0);
        find_all_patterns(&seq, &config)
    }

    #[test]
    fn frame_has_one_row_per_pattern() {
        let patterns = sample_patterns();
        let df = patterns_to_frame(&patterns, 1).unwrap();
        assert_eq!(df.height(), patterns.len());
        assert_eq!(df.width(), 5 + 3);
        let ids = df.column(pattern::PATTERN_ID).unwrap().str().unwrap();
        assert_eq!(ids.get(0), Some("#1"));
        assert!(df.column("pair_a_avg_distance").is_ok());
    }

    #[test]
    fn extra_slots_are_null() {
        let patterns = sample_patterns();
        let df = patterns_to_frame(&patterns, 2).unwrap();
        let col = df.column(&pattern::pair_left_date(1)).unwrap();
        assert_eq!(col.null_count(), patterns.len());
    }

    #[test]
    fn many_slots_get_distinct_columns() {
        let patterns = sample_patterns();
        let df = patterns_to_frame(&patterns, 30).unwrap();
        assert_eq!(df.width(), 5 + 3 * 30);
        assert!(df.column("pair_ad_right_date").is_ok());
    }

    #[test]
    fn ranking_is_stable_and_descending() {
        let patterns = sample_patterns();
        let ranked = rank_by_score(&patterns);
        assert_eq!(ranked.len(), patterns.len());
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_tenths(856.5), 856.5);
        assert_eq!(round_tenths(517.04), 517.0);
    }
}
