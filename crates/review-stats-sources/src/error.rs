use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read reviews from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV reviews: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON reviews: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column: {column}. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid review at record {record}: {reason}")]
    InvalidRecord { record: usize, reason: String },

    #[error("Cannot determine review source kind for {0}")]
    UnknownKind(PathBuf),
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(record: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            record,
            reason: reason.into(),
        }
    }
}
