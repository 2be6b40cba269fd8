use std::path::PathBuf;

use thiserror::Error;

/// Result type for conversion and loading
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while converting or loading embedding files
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file not found or unreadable: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed word2vec file {} at line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("word not in vocabulary: {0}")]
    UnknownWord(String),
}

impl ConvertError {
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::NotFound { path: path.into(), source }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Write { path: path.into(), source }
    }

    pub fn malformed<S: Into<String>>(path: impl Into<PathBuf>, line: usize, reason: S) -> Self {
        ConvertError::Malformed {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}
