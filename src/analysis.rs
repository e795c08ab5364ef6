use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::config::SearchConfig;
use crate::driver::{CancellationToken, PatternSearch};
use crate::error::HexError;
use crate::event::EventSequence;
use crate::export;
use crate::ingest;
use crate::scoring::HexagonalPattern;

/// One analysis session: loaded events plus the latest result collection.
///
/// Results are replaced wholesale. Loading events or starting a search
/// clears them; a completed search installs its full collection at once.
#[derive(Debug, Default)]
pub struct EclipseAnalysis {
    base_path: PathBuf,
    config: SearchConfig,
    events: Option<EventSequence>,
    patterns: Vec<HexagonalPattern>,
}

impl EclipseAnalysis {
    pub fn new(base_path: impl Into<PathBuf>, config: SearchConfig) -> Result<Self, HexError> {
        config.validate()?;
        Ok(Self {
            base_path: base_path.into(),
            config,
            events: None,
            patterns: Vec::new(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) -> Result<(), HexError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load an eclipse CSV relative to the base path.
    pub fn load_csv(&mut self, filename: impl AsRef<Path>) -> Result<&EventSequence, HexError> {
        let path = self.base_path.join(filename);
        let events = ingest::read_events_csv(&path)?;
        Ok(self.install_events(events))
    }

    /// Load eclipse CSV content already held in memory.
    pub fn load_csv_text(&mut self, text: &str) -> Result<&EventSequence, HexError> {
        let events = ingest::parse_events_csv(text)?;
        Ok(self.install_events(events))
    }

    pub fn install_events(&mut self, events: EventSequence) -> &EventSequence {
        self.patterns.clear();
        self.events.insert(events)
    }

    pub fn events(&self) -> Result<&EventSequence, HexError> {
        self.events
            .as_ref()
            .ok_or_else(|| HexError::NotLoaded("events".into()))
    }

    // ── Searching ───────────────────────────────────────────────────────────

    /// Clear previous results and prepare a batched search.
    ///
    /// Hand the finished search's output to [`install_patterns`].
    ///
    /// [`install_patterns`]: Self::install_patterns
    pub fn begin_search(&mut self, cancel: CancellationToken) -> Result<PatternSearch<'_>, HexError> {
        self.patterns.clear();
        let events = self
            .events
            .as_ref()
            .ok_or_else(|| HexError::NotLoaded("events".into()))?;
        Ok(PatternSearch::new(events, self.config.clone())?.with_cancellation(cancel))
    }

    pub fn install_patterns(&mut self, patterns: Vec<HexagonalPattern>) {
        self.patterns = patterns;
    }

    /// Run a full search, reporting progress after every batch.
    pub fn find_patterns<F>(&mut self, cancel: CancellationToken, on_progress: F) -> Result<usize, HexError>
    where
        F: FnMut(u8),
    {
        let patterns = self.begin_search(cancel)?.run(on_progress)?;
        let count = patterns.len();
        self.install_patterns(patterns);
        Ok(count)
    }

    pub fn patterns(&self) -> &[HexagonalPattern] {
        &self.patterns
    }

    // ── Export ──────────────────────────────────────────────────────────────

    pub fn events_frame(&self) -> Result<DataFrame, HexError> {
        ingest::events_to_frame(self.events()?)
    }

    /// Result table in discovery order, or by descending score if `ranked`.
    pub fn patterns_frame(&self, ranked: bool) -> Result<DataFrame, HexError> {
        let slots = self.config.target_count();
        if ranked {
            let ordered: Vec<HexagonalPattern> =
                export::rank_by_score(&self.patterns).into_iter().cloned().collect();
            export::patterns_to_frame(&ordered, slots)
        } else {
            export::patterns_to_frame(&self.patterns, slots)
        }
    }

    /// Write the result table as CSV relative to the base path.
    pub fn export_patterns(&self, filename: impl AsRef<Path>) -> Result<PathBuf, HexError> {
        let path = self.base_path.join(filename);
        export::write_patterns_csv(&path, &self.patterns, self.config.target_count())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::sequence_of;

    fn analysis_with(days: &[i64]) -> EclipseAnalysis {
        let config = SearchConfig::default()
            .with_target_distances(vec![517.0])
            .with_tolerance(0.0);
        let mut analysis = EclipseAnalysis::new(".", config).unwrap();
        analysis.install_events(sequence_of(days));
        analysis
    }

    #[test]
    fn search_without_events_is_not_loaded() {
        let mut analysis = EclipseAnalysis::default();
        let err = analysis.find_patterns(CancellationToken::new(), |_| {}).unwrap_err();
        assert!(matches!(err, HexError::NotLoaded(_)));
    }

    #[test]
    fn rerun_replaces_results() {
        let mut analysis = analysis_with(&[0, 517, 1034]);
        assert_eq!(analysis.find_patterns(CancellationToken::new(), |_| {}).unwrap(), 1);
        let first = analysis.patterns().to_vec();
        assert_eq!(analysis.find_patterns(CancellationToken::new(), |_| {}).unwrap(), 1);
        assert_eq!(analysis.patterns(), first.as_slice());
    }

    #[test]
    fn loading_events_clears_results() {
        let mut analysis = analysis_with(&[0, 517, 1034]);
        analysis.find_patterns(CancellationToken::new(), |_| {}).unwrap();
        analysis.install_events(sequence_of(&[0, 10]));
        assert!(analysis.patterns().is_empty());
    }

    #[test]
    fn ranked_frame_orders_by_score() {
        let mut analysis = analysis_with(&[0, 517, 1034, 1551]);
        analysis
            .set_config(analysis.config().clone().with_tolerance(1.0))
            .unwrap();
        analysis.find_patterns(CancellationToken::new(), |_| {}).unwrap();
        let df = analysis.patterns_frame(true).unwrap();
        let scores = df.column(crate::schema::pattern::SCORE).unwrap().f64().unwrap();
        let scores: Vec<f64> = scores.into_iter().flatten().collect();
        assert_eq!(scores.len(), analysis.patterns().len());
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn cancelled_search_leaves_results_cleared() {
        let mut analysis = analysis_with(&[0, 517, 1034]);
        analysis.find_patterns(CancellationToken::new(), |_| {}).unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let err = analysis.find_patterns(token, |_| {}).unwrap_err();
        assert!(matches!(err, HexError::Cancelled));
        assert!(analysis.patterns().is_empty());
    }
}
