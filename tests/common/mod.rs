//! Shared builders for integration tests.

#![allow(dead_code)]

use celestial_hexagon::{EclipseCategory, EclipseEvent, EclipseKind, EventSequence};

/// Event at a raw day index. Calendar fields are placeholders; the search
/// only looks at the day index and the identifier.
pub fn event_at(id: &str, day_index: i64) -> EclipseEvent {
    EclipseEvent {
        id: id.to_string(),
        original_date: String::new(),
        year: 2000,
        month: 1,
        day: 1,
        time: "00:00:00".to_string(),
        kind: EclipseKind::Total,
        category: if day_index % 2 == 0 {
            EclipseCategory::Solar
        } else {
            EclipseCategory::Lunar
        },
        day_index,
    }
}

/// Sequence with ids `e0`, `e1`, ... in the order given.
pub fn sequence_of(days: &[i64]) -> EventSequence {
    let events = days
        .iter()
        .enumerate()
        .map(|(i, &d)| event_at(&format!("e{i}"), d))
        .collect();
    EventSequence::new(events).expect("unique ids")
}

/// A center at 10000 with one exact pair per default target interval.
pub fn hexagon_days() -> Vec<i64> {
    let center = 10_000;
    let mut days = vec![center];
    for offset in [1211, 856, 694, 517] {
        days.push(center - offset);
        days.push(center + offset);
    }
    days
}
