use crate::error::HexError;

/// Characteristic intervals (days) a pattern's pair averages must match.
pub const DEFAULT_TARGET_DISTANCES: [f64; 4] = [1211.0, 856.0, 694.0, 517.0];
pub const DEFAULT_TOLERANCE_DAYS: f64 = 1.0;
/// Candidate search radius around a center, about eight years.
pub const MAX_WINDOW_DAYS: f64 = 2922.0;
/// Centers processed between two progress reports.
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Smoothing term added to the tolerance in the score denominator.
///
/// Keeps a pair at the tolerance limit from scoring exactly zero.
pub const SCORE_SMOOTHING_DAYS: f64 = 0.1;

/// Parameters of one pattern search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Ordered target intervals; pattern pairs are assigned in this order.
    pub target_distances: Vec<f64>,
    /// Closed-interval tolerance for both symmetry and target matching.
    pub tolerance_days: f64,
    pub max_window_days: f64,
    pub batch_size: usize,
    pub score_smoothing: f64,
    /// Restrict which events act as centers to a closed day-index range.
    pub center_range: Option<(i64, i64)>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_distances: DEFAULT_TARGET_DISTANCES.to_vec(),
            tolerance_days: DEFAULT_TOLERANCE_DAYS,
            max_window_days: MAX_WINDOW_DAYS,
            batch_size: DEFAULT_BATCH_SIZE,
            score_smoothing: SCORE_SMOOTHING_DAYS,
            center_range: None,
        }
    }
}

impl SearchConfig {
    pub fn with_target_distances(mut self, targets: impl Into<Vec<f64>>) -> Self {
        self.target_distances = targets.into();
        self
    }

    pub fn with_tolerance(mut self, tolerance_days: f64) -> Self {
        self.tolerance_days = tolerance_days;
        self
    }

    pub fn with_max_window(mut self, max_window_days: f64) -> Self {
        self.max_window_days = max_window_days;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_score_smoothing(mut self, score_smoothing: f64) -> Self {
        self.score_smoothing = score_smoothing;
        self
    }

    pub fn with_center_range(mut self, start: i64, end: i64) -> Self {
        self.center_range = Some((start, end));
        self
    }

    pub fn target_count(&self) -> usize {
        self.target_distances.len()
    }

    /// Whether an event at `day_index` may act as a center.
    pub fn admits_center(&self, day_index: i64) -> bool {
        match self.center_range {
            Some((start, end)) => start <= day_index && day_index <= end,
            None => true,
        }
    }

    pub fn validate(&self) -> Result<(), HexError> {
        if self.target_distances.is_empty() {
            return Err(HexError::InvalidConfig(
                "target_distances must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .target_distances
            .iter()
            .find(|t| !t.is_finite() || **t <= 0.0)
        {
            return Err(HexError::InvalidConfig(format!(
                "target distance must be a positive number, got {bad}"
            )));
        }
        if !self.tolerance_days.is_finite() || self.tolerance_days < 0.0 {
            return Err(HexError::InvalidConfig(format!(
                "tolerance_days must be non-negative, got {}",
                self.tolerance_days
            )));
        }
        if !self.max_window_days.is_finite() || self.max_window_days <= 0.0 {
            return Err(HexError::InvalidConfig(format!(
                "max_window_days must be positive, got {}",
                self.max_window_days
            )));
        }
        if self.batch_size == 0 {
            return Err(HexError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if !self.score_smoothing.is_finite() || self.score_smoothing <= 0.0 {
            return Err(HexError::InvalidConfig(format!(
                "score_smoothing must be positive, got {}",
                self.score_smoothing
            )));
        }
        if let Some((start, end)) = self.center_range {
            if start > end {
                return Err(HexError::InvalidConfig(format!(
                    "center range start {start} is after end {end}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_distances, vec![1211.0, 856.0, 694.0, 517.0]);
        assert_eq!(config.tolerance_days, 1.0);
        assert_eq!(config.max_window_days, 2922.0);
        assert_eq!(config.target_count(), 4);
    }

    #[test]
    fn zero_tolerance_is_allowed() {
        assert!(SearchConfig::default().with_tolerance(0.0).validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            SearchConfig::default().with_target_distances(Vec::<f64>::new()),
            SearchConfig::default().with_target_distances(vec![517.0_f64, -1.0]),
            SearchConfig::default().with_target_distances(vec![f64::NAN]),
            SearchConfig::default().with_tolerance(-0.5),
            SearchConfig::default().with_tolerance(f64::INFINITY),
            SearchConfig::default().with_max_window(0.0),
            SearchConfig::default().with_batch_size(0),
            SearchConfig::default().with_score_smoothing(0.0),
            SearchConfig::default().with_center_range(10, 5),
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(HexError::InvalidConfig(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn center_range_is_closed() {
        let config = SearchConfig::default().with_center_range(10, 20);
        assert!(config.admits_center(10));
        assert!(config.admits_center(20));
        assert!(!config.admits_center(9));
        assert!(!config.admits_center(21));
        assert!(SearchConfig::default().admits_center(i64::MIN));
    }
}
