//! Hexagonal symmetry search over chronological eclipse records.
//!
//! For every eclipse acting as a center, the search looks for one pair of
//! eclipses per target interval, each pair straddling the center at nearly
//! equal offsets, with no eclipse used twice.

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyModule;

pub mod analysis;
pub mod backtrack;
pub mod calendar;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod export;
pub mod grouping;
pub mod ingest;
pub mod pairs;
pub mod schema;
pub mod scoring;
pub mod search;

#[cfg(feature = "python")]
mod model;

pub use analysis::EclipseAnalysis;
pub use config::SearchConfig;
pub use driver::{CancellationToken, PatternSearch, SearchState};
pub use error::HexError;
pub use event::{EclipseCategory, EclipseEvent, EclipseKind, EventSequence};
pub use scoring::{HexagonalPattern, MatchedPair, PatternRole};
pub use search::{find_all_patterns, find_pattern_at};

/// Export schema constants as Python submodules
#[cfg(feature = "python")]
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Event
    let event = PyModule::new(m.py(), "event")?;
    event.add("EVENT_ID", schema::event::EVENT_ID)?;
    event.add("ORIGINAL_DATE", schema::event::ORIGINAL_DATE)?;
    event.add("YEAR", schema::event::YEAR)?;
    event.add("MONTH", schema::event::MONTH)?;
    event.add("DAY", schema::event::DAY)?;
    event.add("TIME", schema::event::TIME)?;
    event.add("KIND", schema::event::KIND)?;
    event.add("CATEGORY", schema::event::CATEGORY)?;
    event.add("DAY_INDEX", schema::event::DAY_INDEX)?;
    m.add_submodule(&event)?;

    // Pattern
    let pattern = PyModule::new(m.py(), "pattern")?;
    pattern.add("PATTERN_ID", schema::pattern::PATTERN_ID)?;
    pattern.add("CENTER_DATE", schema::pattern::CENTER_DATE)?;
    pattern.add("CENTER_CATEGORY", schema::pattern::CENTER_CATEGORY)?;
    pattern.add("CENTER_DAY_INDEX", schema::pattern::CENTER_DAY_INDEX)?;
    pattern.add("SCORE", schema::pattern::SCORE)?;
    m.add_submodule(&pattern)?;

    // Category
    let category = PyModule::new(m.py(), "category")?;
    category.add("SOLAR", schema::category::SOLAR)?;
    category.add("LUNAR", schema::category::LUNAR)?;
    m.add_submodule(&category)?;

    // Defaults
    let defaults = PyModule::new(m.py(), "defaults")?;
    defaults.add("TARGET_DISTANCES", config::DEFAULT_TARGET_DISTANCES.to_vec())?;
    defaults.add("TOLERANCE_DAYS", config::DEFAULT_TOLERANCE_DAYS)?;
    defaults.add("MAX_WINDOW_DAYS", config::MAX_WINDOW_DAYS)?;
    defaults.add("BATCH_SIZE", config::DEFAULT_BATCH_SIZE)?;
    defaults.add("SCORE_SMOOTHING_DAYS", config::SCORE_SMOOTHING_DAYS)?;
    m.add_submodule(&defaults)?;

    Ok(())
}

/// Name of the Python extension module; matches `[lib] name` so the
/// exported `PyInit_*` symbol is the one Python looks up.
pub const PYTHON_MODULE: &str = "celestial_hexagon";

#[cfg(feature = "python")]
#[pymodule]
fn celestial_hexagon(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<model::EclipseModel>()?;
    add_schema_exports(m)?;
    Ok(())
}
