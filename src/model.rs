use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::analysis::EclipseAnalysis;
use crate::config::{
    SearchConfig, DEFAULT_BATCH_SIZE, DEFAULT_TARGET_DISTANCES, DEFAULT_TOLERANCE_DAYS,
    MAX_WINDOW_DAYS,
};
use crate::driver::{CancellationToken, SearchState};
use crate::error::HexError;

#[pyclass(name = "EclipseModel")]
pub struct EclipseModel {
    analysis: EclipseAnalysis,
    progress: u8,
}

#[pymethods]
impl EclipseModel {
    #[new]
    #[pyo3(signature = (
        base_path,
        target_distances = None,
        tolerance_days = DEFAULT_TOLERANCE_DAYS,
        max_window_days = MAX_WINDOW_DAYS,
        batch_size = DEFAULT_BATCH_SIZE,
    ))]
    fn new(
        base_path: String,
        target_distances: Option<Vec<f64>>,
        tolerance_days: f64,
        max_window_days: f64,
        batch_size: usize,
    ) -> PyResult<Self> {
        let config = SearchConfig::default()
            .with_target_distances(
                target_distances.unwrap_or_else(|| DEFAULT_TARGET_DISTANCES.to_vec()),
            )
            .with_tolerance(tolerance_days)
            .with_max_window(max_window_days)
            .with_batch_size(batch_size);
        Ok(Self {
            analysis: EclipseAnalysis::new(base_path, config)?,
            progress: 0,
        })
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load an eclipse CSV (date-time, kind, category) relative to base_path.
    ///
    /// Malformed rows are dropped. Returns the loaded events, sorted by
    /// day index. Any previous search results are discarded.
    #[pyo3(signature = (filename=None))]
    fn load_events(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or("eclipses.csv");
        self.analysis.load_csv(fname)?;
        self.progress = 0;
        Ok(PyDataFrame(self.analysis.events_frame()?))
    }

    /// Load eclipse CSV content from a string.
    fn load_events_text(&mut self, text: &str) -> PyResult<PyDataFrame> {
        self.analysis.load_csv_text(text)?;
        self.progress = 0;
        Ok(PyDataFrame(self.analysis.events_frame()?))
    }

    // ── Search ──────────────────────────────────────────────────────────────

    /// Search every event as a center for hexagonal symmetry patterns.
    ///
    /// Batches run with the GIL released. After each batch `progress` (if
    /// given) is called with the percentage done; returning `False` from it
    /// cancels the search. Ctrl-C is honoured between batches.
    /// Returns the number of patterns found.
    #[pyo3(signature = (progress=None))]
    fn find_patterns(&mut self, py: Python<'_>, progress: Option<PyObject>) -> PyResult<usize> {
        let token = CancellationToken::new();
        self.progress = 0;

        let mut search = self.analysis.begin_search(token.clone())?;
        while !search.is_finished() {
            let state = py.allow_threads(|| search.step());
            if state == SearchState::Cancelled {
                break;
            }
            self.progress = search.progress();
            py.check_signals()?;

            if let Some(callback) = &progress {
                let answer = callback.call1(py, (search.progress(),))?;
                if matches!(answer.extract::<bool>(py), Ok(false)) {
                    token.cancel();
                }
            }
        }

        let patterns = search.finish()?;
        let count = patterns.len();
        self.analysis.install_patterns(patterns);
        Ok(count)
    }

    // ── Export ──────────────────────────────────────────────────────────────

    /// Write the pattern table as CSV relative to base_path.
    #[pyo3(signature = (filename=None))]
    fn export_patterns(&self, filename: Option<&str>) -> PyResult<String> {
        let fname = filename.unwrap_or("eclipse_patterns.csv");
        let path = self.analysis.export_patterns(fname)?;
        Ok(path.display().to_string())
    }

    /// Pattern table; `ranked=True` orders by descending score.
    #[pyo3(signature = (ranked=false))]
    fn patterns_df(&self, ranked: bool) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(self.analysis.patterns_frame(ranked)?))
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn events_df(&self) -> PyResult<Option<PyDataFrame>> {
        match self.analysis.events_frame() {
            Ok(df) => Ok(Some(PyDataFrame(df))),
            Err(HexError::NotLoaded(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[getter]
    fn pattern_count(&self) -> usize {
        self.analysis.patterns().len()
    }

    #[getter]
    fn progress(&self) -> u8 {
        self.progress
    }

    #[getter]
    fn target_distances(&self) -> Vec<f64> {
        self.analysis.config().target_distances.clone()
    }

    #[getter]
    fn tolerance_days(&self) -> f64 {
        self.analysis.config().tolerance_days
    }
}
