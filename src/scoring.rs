use crate::event::EclipseEvent;
use crate::pairs::SymmetryPair;

/// A selected symmetry pair together with the target interval it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    pub target: f64,
    pub left: EclipseEvent,
    pub right: EclipseEvent,
    pub distance_left: i64,
    pub distance_right: i64,
    pub average_distance: f64,
    pub diff: i64,
}

impl MatchedPair {
    pub fn from_pair(pair: &SymmetryPair<'_>, target: f64) -> Self {
        Self {
            target,
            left: pair.left.clone(),
            right: pair.right.clone(),
            distance_left: pair.distance_left,
            distance_right: pair.distance_right,
            average_distance: pair.average_distance,
            diff: pair.diff,
        }
    }

    /// Contribution to the pattern score: 1.0 for a perfectly symmetric
    /// pair, decreasing linearly with `diff`.
    pub fn score(&self, tolerance_days: f64, smoothing: f64) -> f64 {
        1.0 - self.diff as f64 / (tolerance_days + smoothing)
    }
}

/// Where an event sits inside a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRole {
    Center,
    Left(usize),
    Right(usize),
}

/// A center plus one pair per target interval, all events distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct HexagonalPattern {
    pub center: EclipseEvent,
    /// Ordered by descending average distance.
    pub pairs: Vec<MatchedPair>,
    pub score: f64,
}

impl HexagonalPattern {
    /// Days from the earliest to the latest event of the pattern.
    pub fn span_days(&self) -> i64 {
        let (first, last) = self
            .pairs
            .iter()
            .fold((self.center.day_index, self.center.day_index), |(lo, hi), p| {
                (lo.min(p.left.day_index), hi.max(p.right.day_index))
            });
        last - first
    }

    pub fn span_years(&self) -> f64 {
        self.span_days() as f64 / 365.25
    }

    /// Every event of the pattern in chronological order, tagged by role.
    pub fn timeline(&self) -> Vec<(PatternRole, &EclipseEvent)> {
        let mut events = Vec::with_capacity(1 + 2 * self.pairs.len());
        events.push((PatternRole::Center, &self.center));
        for (i, pair) in self.pairs.iter().enumerate() {
            events.push((PatternRole::Left(i), &pair.left));
            events.push((PatternRole::Right(i), &pair.right));
        }
        events.sort_by_key(|(_, e)| e.day_index);
        events
    }

    /// Identifiers of the center and every paired event.
    pub fn event_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.center.id.as_str()).chain(
            self.pairs
                .iter()
                .flat_map(|p| [p.left.id.as_str(), p.right.id.as_str()]),
        )
    }
}

/// Sum of per-pair scores, `Σ (1 - diff / (tolerance + smoothing))`.
pub fn score_pairs(pairs: &[MatchedPair], tolerance_days: f64, smoothing: f64) -> f64 {
    pairs
        .iter()
        .map(|p| p.score(tolerance_days, smoothing))
        .sum()
}

/// Build the pattern for an accepted assignment.
///
/// `assignment` is in target order (`targets[i]` covered by
/// `assignment[i]`); the pattern lists pairs by descending average distance.
pub fn build_pattern(
    center: &EclipseEvent,
    assignment: &[&SymmetryPair<'_>],
    targets: &[f64],
    tolerance_days: f64,
    smoothing: f64,
) -> HexagonalPattern {
    let mut pairs: Vec<MatchedPair> = assignment
        .iter()
        .zip(targets)
        .map(|(pair, &target)| MatchedPair::from_pair(pair, target))
        .collect();
    pairs.sort_by(|a, b| b.average_distance.total_cmp(&a.average_distance));

    let score = score_pairs(&pairs, tolerance_days, smoothing);
    HexagonalPattern {
        center: center.clone(),
        pairs,
        score,
    }
}
