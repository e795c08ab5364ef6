use crate::pairs::SymmetryPair;

/// Candidate pairs whose average offset matches one target interval.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetBucket<'p, 'a> {
    pub target: f64,
    pub pairs: Vec<&'p SymmetryPair<'a>>,
}

/// Partition candidate pairs into one bucket per target interval.
///
/// A pair lands in every bucket whose target is within `tolerance_days` of
/// its average (closed interval), keeping candidate order inside a bucket.
/// Returns `None` as soon as any bucket would be empty: no complete
/// assignment can exist for this center. A `Some` result is necessary but
/// not sufficient; event reuse may still rule the center out.
pub fn group_by_target<'p, 'a>(
    pairs: &'p [SymmetryPair<'a>],
    targets: &[f64],
    tolerance_days: f64,
) -> Option<Vec<TargetBucket<'p, 'a>>> {
    targets
        .iter()
        .map(|&target| {
            let matching: Vec<_> = pairs
                .iter()
                .filter(|p| (p.average_distance - target).abs() <= tolerance_days)
                .collect();
            if matching.is_empty() {
                None
            } else {
                Some(TargetBucket {
                    target,
                    pairs: matching,
                })
            }
        })
        .collect()
}
