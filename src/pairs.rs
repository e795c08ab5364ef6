use crate::event::{EclipseEvent, EventSequence};

/// Two events straddling a center at nearly equal offsets.
///
/// Borrowed from the sequence and only alive during one center's search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryPair<'a> {
    pub left: &'a EclipseEvent,
    pub right: &'a EclipseEvent,
    pub distance_left: i64,
    pub distance_right: i64,
    pub average_distance: f64,
    pub diff: i64,
}

impl<'a> SymmetryPair<'a> {
    fn between(center: &EclipseEvent, left: &'a EclipseEvent, right: &'a EclipseEvent) -> Self {
        let distance_left = center.day_index - left.day_index;
        let distance_right = right.day_index - center.day_index;
        Self {
            left,
            right,
            distance_left,
            distance_right,
            average_distance: (distance_left + distance_right) as f64 / 2.0,
            diff: (distance_left - distance_right).abs(),
        }
    }
}

/// Events within `max_window_days` before and after the center.
///
/// Each walk stops at the first event beyond the window; the sequence is
/// sorted so nothing further out can qualify. Left candidates are ordered
/// nearest first, as are right candidates.
pub fn window_candidates(
    events: &EventSequence,
    center_idx: usize,
    max_window_days: f64,
) -> (Vec<&EclipseEvent>, Vec<&EclipseEvent>) {
    let slice = events.as_slice();
    let center = &slice[center_idx];

    let left = slice[..center_idx]
        .iter()
        .rev()
        .take_while(|e| (center.day_index - e.day_index) as f64 <= max_window_days)
        .collect();
    let right = slice[center_idx + 1..]
        .iter()
        .take_while(|e| (e.day_index - center.day_index) as f64 <= max_window_days)
        .collect();

    (left, right)
}

/// All symmetric pairs around the event at `center_idx`.
///
/// Cross product of the left and right windows, keeping a pair iff
/// `|dL - dR| <= tolerance_days`. Enumeration order is left-major, both
/// sides nearest first.
pub fn candidate_pairs(
    events: &EventSequence,
    center_idx: usize,
    max_window_days: f64,
    tolerance_days: f64,
) -> Vec<SymmetryPair<'_>> {
    let center = &events[center_idx];
    let (left, right) = window_candidates(events, center_idx, max_window_days);

    let mut pairs = Vec::new();
    for &l in &left {
        for &r in &right {
            let pair = SymmetryPair::between(center, l, r);
            if pair.diff as f64 <= tolerance_days {
                pairs.push(pair);
            }
        }
    }
    pairs
}
