use std::collections::HashSet;

use crate::grouping::TargetBucket;
use crate::pairs::SymmetryPair;

/// Choose one pair per bucket with no event used twice.
///
/// Depth-first over the buckets in order, trying each bucket's pairs in
/// their candidate order. The first complete assignment wins; there is no
/// search for a better-scoring one. The result holds one pair per bucket,
/// in bucket order, with all `2 * buckets.len()` event ids distinct.
pub fn solve_exact_cover<'p, 'a>(
    buckets: &[TargetBucket<'p, 'a>],
) -> Option<Vec<&'p SymmetryPair<'a>>> {
    let mut used: HashSet<&'a str> = HashSet::with_capacity(buckets.len() * 2);
    let mut chosen = Vec::with_capacity(buckets.len());
    if assign(buckets, 0, &mut used, &mut chosen) {
        Some(chosen)
    } else {
        None
    }
}

/// Recursive step: fill bucket `depth` and everything after it.
fn assign<'p, 'a>(
    buckets: &[TargetBucket<'p, 'a>],
    depth: usize,
    used: &mut HashSet<&'a str>,
    chosen: &mut Vec<&'p SymmetryPair<'a>>,
) -> bool {
    let Some(bucket) = buckets.get(depth) else {
        return true;
    };

    for &pair in &bucket.pairs {
        let left = pair.left.id.as_str();
        let right = pair.right.id.as_str();
        if used.contains(left) || used.contains(right) {
            continue;
        }

        used.insert(left);
        used.insert(right);
        chosen.push(pair);

        if assign(buckets, depth + 1, used, chosen) {
            return true;
        }

        chosen.pop();
        used.remove(left);
        used.remove(right);
    }

    false
}
