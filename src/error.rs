use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading inputs or running a training session
#[derive(Debug, Error)]
pub enum Error {
    /// A lookup addressed a cell outside the grid. Always a logic defect, never recovered
    #[error("cell ({row}, {col}) is out of bounds for a {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("malformed map file (line {line}): {message}")]
    MalformedMapFile { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write episode trace: {0}")]
    Trace(#[from] csv::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub(crate) fn map(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedMapFile {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
