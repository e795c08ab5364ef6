/// Column-name constants for celestial-hexagon frames.
/// Single source of truth - exported to Python via PyO3.

// ── Input CSV columns (positional) ──────────────────────────────────────────
pub mod input {
    pub const DATE_TIME_POS: usize = 0;
    pub const KIND_POS: usize = 1;
    pub const CATEGORY_POS: usize = 2;

    pub const DATE_TIME: &str = "date_time";
    pub const KIND: &str = "kind";
    pub const CATEGORY: &str = "category";

    /// Minimum number of columns an eclipse CSV must carry.
    pub const MIN_COLUMNS: usize = 3;
}

// ── Event columns ───────────────────────────────────────────────────────────
pub mod event {
    pub const EVENT_ID: &str = "event_id";
    pub const ORIGINAL_DATE: &str = "original_date";
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const DAY: &str = "day";
    pub const TIME: &str = "time";
    pub const KIND: &str = "kind";
    pub const CATEGORY: &str = "category";
    pub const DAY_INDEX: &str = "day_index";
}

// ── Pattern export columns ──────────────────────────────────────────────────
pub mod pattern {
    pub const PATTERN_ID: &str = "pattern_id";
    pub const CENTER_DATE: &str = "center_date";
    pub const CENTER_CATEGORY: &str = "center_category";
    pub const CENTER_DAY_INDEX: &str = "center_day_index";
    pub const SCORE: &str = "score";

    /// Pair slots are lettered a, b, c, ... in descending average distance.
    pub fn pair_left_date(slot: usize) -> String {
        format!("pair_{}_left_date", slot_label(slot))
    }

    pub fn pair_right_date(slot: usize) -> String {
        format!("pair_{}_right_date", slot_label(slot))
    }

    pub fn pair_avg_distance(slot: usize) -> String {
        format!("pair_{}_avg_distance", slot_label(slot))
    }

    /// Spreadsheet-style label: `a`..`z`, then `aa`, `ab`, ...
    pub fn slot_label(slot: usize) -> String {
        let mut label = Vec::new();
        let mut n = slot + 1;
        while n > 0 {
            n -= 1;
            label.push(b'a' + (n % 26) as u8);
            n /= 26;
        }
        label.reverse();
        String::from_utf8_lossy(&label).into_owned()
    }
}

// ── Category labels ─────────────────────────────────────────────────────────
pub mod category {
    pub const SOLAR: &str = "solar";
    pub const LUNAR: &str = "lunar";
}

// ── Kind labels ─────────────────────────────────────────────────────────────
pub mod kind {
    pub const TOTAL: &str = "total";
}
