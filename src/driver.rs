//! Batched search over every center of a sequence.
//!
//! `PatternSearch::step` processes one batch of centers and hands control
//! back to the caller, which may report progress, service its own event
//! loop, or cancel before calling `step` again. Results are only handed out
//! once the whole sequence has been scanned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace, warn};

use crate::config::SearchConfig;
use crate::error::HexError;
use crate::event::EventSequence;
use crate::scoring::HexagonalPattern;
use crate::search::find_pattern_at;

/// Shared flag a host flips to stop a running search.
///
/// Checked each time the search resumes, so a batch in progress always
/// completes before the search stops.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running { progress: u8 },
    Completed,
    Cancelled,
}

/// One pattern search over a borrowed event sequence.
#[derive(Debug)]
pub struct PatternSearch<'a> {
    events: &'a EventSequence,
    config: SearchConfig,
    cancel: CancellationToken,
    next_center: usize,
    progress: u8,
    found: Vec<HexagonalPattern>,
    state: SearchState,
}

impl<'a> PatternSearch<'a> {
    pub fn new(events: &'a EventSequence, config: SearchConfig) -> Result<Self, HexError> {
        config.validate()?;
        Ok(Self {
            events,
            config,
            cancel: CancellationToken::new(),
            next_center: 0,
            progress: 0,
            found: Vec::new(),
            state: SearchState::Idle,
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Percentage of centers processed, 0 to 100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SearchState::Completed | SearchState::Cancelled)
    }

    /// Drop all results and return to `Idle`.
    ///
    /// A token that has already fired is replaced by a fresh one, so
    /// handles to it no longer reach this search; use [`reset_with`] to
    /// hand in a new shared token.
    ///
    /// [`reset_with`]: Self::reset_with
    pub fn reset(&mut self) {
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
        }
        self.next_center = 0;
        self.progress = 0;
        self.found.clear();
        self.state = SearchState::Idle;
    }

    /// Reset and watch `token` for cancellation from now on.
    pub fn reset_with(&mut self, token: CancellationToken) {
        self.cancel = token;
        self.reset();
    }

    /// Process the next batch of centers.
    pub fn step(&mut self) -> SearchState {
        if self.is_finished() {
            return self.state;
        }
        if self.cancel.is_cancelled() {
            warn!(
                "Pattern search cancelled at {}% ({} of {} centers)",
                self.progress,
                self.next_center,
                self.events.len()
            );
            self.found.clear();
            self.state = SearchState::Cancelled;
            return self.state;
        }

        let total = self.events.len();
        if self.state == SearchState::Idle {
            info!(
                "Searching {} centers for {} target intervals (tolerance {} days)",
                total,
                self.config.target_count(),
                self.config.tolerance_days
            );
        }

        let end = (self.next_center + self.config.batch_size).min(total);
        for idx in self.next_center..end {
            if !self.config.admits_center(self.events[idx].day_index) {
                continue;
            }
            if let Some(pattern) = find_pattern_at(self.events, idx, &self.config) {
                trace!(
                    "Pattern at center {} (score {:.3})",
                    pattern.center.id,
                    pattern.score
                );
                self.found.push(pattern);
            }
        }
        self.next_center = end;
        self.progress = if total == 0 {
            100
        } else {
            (end * 100 / total) as u8
        };
        debug!("Processed {end}/{total} centers ({}%)", self.progress);

        self.state = if end == total {
            info!("Pattern search complete: {} patterns", self.found.len());
            SearchState::Completed
        } else {
            SearchState::Running {
                progress: self.progress,
            }
        };
        self.state
    }

    /// Step until finished, calling `on_progress` after every batch.
    pub fn run<F>(mut self, mut on_progress: F) -> Result<Vec<HexagonalPattern>, HexError>
    where
        F: FnMut(u8),
    {
        while !self.is_finished() {
            if self.step() != SearchState::Cancelled {
                on_progress(self.progress);
            }
        }
        self.finish()
    }

    /// Results of a completed search.
    ///
    /// A search that has not finished yet is run to completion first.
    pub fn finish(mut self) -> Result<Vec<HexagonalPattern>, HexError> {
        while !self.is_finished() {
            self.step();
        }
        match self.state {
            SearchState::Completed => Ok(self.found),
            _ => Err(HexError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::sequence_of;

    fn single_target() -> SearchConfig {
        SearchConfig::default()
            .with_target_distances(vec![517.0])
            .with_tolerance(0.0)
    }

    #[test]
    fn empty_sequence_completes_at_full_progress() {
        let seq = EventSequence::default();
        let mut search = PatternSearch::new(&seq, SearchConfig::default()).unwrap();
        assert_eq!(search.state(), SearchState::Idle);
        assert_eq!(search.step(), SearchState::Completed);
        assert_eq!(search.progress(), 100);
        assert!(search.finish().unwrap().is_empty());
    }

    #[test]
    fn steps_through_batches() {
        let days: Vec<i64> = (0..10).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let mut search = PatternSearch::new(&seq, single_target().with_batch_size(4)).unwrap();

        assert_eq!(search.step(), SearchState::Running { progress: 40 });
        assert_eq!(search.step(), SearchState::Running { progress: 80 });
        assert_eq!(search.step(), SearchState::Completed);
        assert_eq!(search.step(), SearchState::Completed);
        assert_eq!(search.finish().unwrap().len(), 8);
    }

    #[test]
    fn progress_is_monotonic_and_ends_at_100() {
        let days: Vec<i64> = (0..250).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let mut reported = Vec::new();
        let found = PatternSearch::new(&seq, single_target())
            .unwrap()
            .run(|p| reported.push(p))
            .unwrap();

        assert_eq!(reported, vec![40, 80, 100]);
        assert_eq!(found.len(), 248);
    }

    #[test]
    fn cancellation_is_observed_on_resume() {
        let days: Vec<i64> = (0..10).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let token = CancellationToken::new();
        let mut search = PatternSearch::new(&seq, single_target().with_batch_size(3))
            .unwrap()
            .with_cancellation(token.clone());

        assert!(matches!(search.step(), SearchState::Running { .. }));
        token.cancel();
        assert_eq!(search.step(), SearchState::Cancelled);
        assert_eq!(search.progress(), 30);
        assert!(matches!(search.finish(), Err(HexError::Cancelled)));
    }

    #[test]
    fn cancel_from_progress_callback() {
        let days: Vec<i64> = (0..10).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let token = CancellationToken::new();
        let handle = token.clone();
        let result = PatternSearch::new(&seq, single_target().with_batch_size(2))
            .unwrap()
            .with_cancellation(token)
            .run(|p| {
                if p >= 40 {
                    handle.cancel();
                }
            });
        assert!(matches!(result, Err(HexError::Cancelled)));
    }

    #[test]
    fn reset_restarts_from_idle() {
        let days: Vec<i64> = (0..10).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let mut search = PatternSearch::new(&seq, single_target().with_batch_size(5)).unwrap();
        search.step();
        search.step();
        assert_eq!(search.state(), SearchState::Completed);

        search.reset();
        assert_eq!(search.state(), SearchState::Idle);
        assert_eq!(search.progress(), 0);
        assert_eq!(search.finish().unwrap().len(), 8);
    }

    #[test]
    fn reset_after_cancellation_runs_again() {
        let days: Vec<i64> = (0..10).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let token = CancellationToken::new();
        let mut search = PatternSearch::new(&seq, single_target().with_batch_size(5))
            .unwrap()
            .with_cancellation(token.clone());
        token.cancel();
        assert_eq!(search.step(), SearchState::Cancelled);

        search.reset();
        assert_eq!(search.state(), SearchState::Idle);
        assert_eq!(search.step(), SearchState::Running { progress: 50 });
        assert_eq!(search.finish().unwrap().len(), 8);
    }

    #[test]
    fn reset_with_installs_a_live_token() {
        let days: Vec<i64> = (0..10).map(|i| i * 517).collect();
        let seq = sequence_of(&days);
        let first = CancellationToken::new();
        let mut search = PatternSearch::new(&seq, single_target().with_batch_size(5))
            .unwrap()
            .with_cancellation(first.clone());
        first.cancel();
        search.step();

        let second = CancellationToken::new();
        search.reset_with(second.clone());
        assert!(matches!(search.step(), SearchState::Running { .. }));
        second.cancel();
        assert_eq!(search.step(), SearchState::Cancelled);
    }

    #[test]
    fn rejects_invalid_config() {
        let seq = EventSequence::default();
        let err = PatternSearch::new(&seq, SearchConfig::default().with_batch_size(0)).unwrap_err();
        assert!(matches!(err, HexError::InvalidConfig(_)));
    }
}
