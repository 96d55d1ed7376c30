//! Dataset error types.

use std::path::PathBuf;

/// Errors that can occur while loading a reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decoded text is not valid CSV
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The loader task panicked or was cancelled
    #[error("load task failed: {0}")]
    Task(String),
}

/// Errors from queries against the loaded datasets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The startup load has not finished yet
    #[error("datasets are still loading")]
    NotReady,

    /// No schedule has the requested train number
    #[error("no schedule for train {train_no}")]
    NotFound { train_no: String },
}
