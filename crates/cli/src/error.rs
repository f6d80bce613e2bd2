use std::path::PathBuf;

use scoring::ScoringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Score input has {0} error(s)")]
    InvalidScore(usize),
}

pub type Result<T> = std::result::Result<T, CliError>;
