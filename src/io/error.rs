use super::Format;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {format} file '{}': {details}", path.display())]
    Parse {
        format: Format,
        path: PathBuf,
        details: String,
    },

    #[error("failed to decompress '{}': {source}", path.display())]
    Decompress {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid query list entry at line {line}: {details}")]
    Query { line: usize, details: String },

    #[error("failed to write results: {0}")]
    Output(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Output(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Output(e.to_string())
    }
}

impl Error {
    pub fn open(path: &Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(format: Format, path: &Path, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            path: path.to_path_buf(),
            details: details.into(),
        }
    }

    pub fn decompress(path: &Path, source: std::io::Error) -> Self {
        Self::Decompress {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn query(line: usize, details: impl Into<String>) -> Self {
        Self::Query {
            line,
            details: details.into(),
        }
    }
}
