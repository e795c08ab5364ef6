use crate::backtrack::solve_exact_cover;
use crate::config::SearchConfig;
use crate::event::EventSequence;
use crate::grouping::group_by_target;
use crate::pairs::candidate_pairs;
use crate::scoring::{build_pattern, HexagonalPattern};

/// Run the full per-center pipeline for the event at `center_idx`.
///
/// `None` means this center yields no pattern: some target has no
/// candidate pair, or every assignment reuses an event.
pub fn find_pattern_at(
    events: &EventSequence,
    center_idx: usize,
    config: &SearchConfig,
) -> Option<HexagonalPattern> {
    let pairs = candidate_pairs(
        events,
        center_idx,
        config.max_window_days,
        config.tolerance_days,
    );
    if pairs.is_empty() {
        return None;
    }

    let buckets = group_by_target(&pairs, &config.target_distances, config.tolerance_days)?;
    let assignment = solve_exact_cover(&buckets)?;

    Some(build_pattern(
        &events[center_idx],
        &assignment,
        &config.target_distances,
        config.tolerance_days,
        config.score_smoothing,
    ))
}

/// Search every admitted center in one go, without batching.
pub fn find_all_patterns(events: &EventSequence, config: &SearchConfig) -> Vec<HexagonalPattern> {
    (0..events.len())
        .filter(|&idx| config.admits_center(events[idx].day_index))
        .filter_map(|idx| find_pattern_at(events, idx, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::sequence_of;

    #[test]
    fn single_target_zero_tolerance() {
        let seq = sequence_of(&[0, 517, 1034]);
        let config = SearchConfig::default()
            .with_target_distances(vec![517.0])
            .with_tolerance(0.0);
        let pattern = find_pattern_at(&seq, 1, &config).unwrap();
        assert_eq!(pattern.center.id, "e1");
        assert_eq!(pattern.pairs.len(), 1);
        assert_eq!(pattern.score, 1.0);

        assert!(find_pattern_at(&seq, 0, &config).is_none());
        assert!(find_pattern_at(&seq, 2, &config).is_none());
    }

    #[test]
    fn missing_target_gives_no_pattern() {
        let seq = sequence_of(&[0, 517, 1034]);
        let config = SearchConfig::default();
        assert!(find_all_patterns(&seq, &config).is_empty());
    }

    #[test]
    fn center_range_limits_centers_not_candidates() {
        let seq = sequence_of(&[0, 517, 1034, 1551, 2068]);
        let config = SearchConfig::default()
            .with_target_distances(vec![517.0])
            .with_tolerance(0.0);
        assert_eq!(find_all_patterns(&seq, &config).len(), 3);

        let narrowed = config.clone().with_center_range(1000, 1100);
        let found = find_all_patterns(&seq, &narrowed);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].center.day_index, 1034);
        assert_eq!(found[0].pairs[0].left.day_index, 517);
    }
}
