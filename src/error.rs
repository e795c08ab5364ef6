#[cfg(feature = "python")]
use pyo3::exceptions::{PyRuntimeError, PyValueError};
#[cfg(feature = "python")]
use pyo3::PyErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HexError {
    #[error("Data not loaded: {0}")]
    NotLoaded(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Duplicate event id: {0}")]
    DuplicateEventId(String),

    #[error("Search cancelled")]
    Cancelled,

    #[error("{0}")]
    General(String),
}

#[cfg(feature = "python")]
impl From<HexError> for PyErr {
    fn from(err: HexError) -> PyErr {
        match err {
            HexError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

#[cfg(feature = "python")]
impl From<PyErr> for HexError {
    fn from(err: PyErr) -> Self {
        HexError::General(err.to_string())
    }
}
