use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Unknown scoring scheme: '{0}'. Available: {1}")]
    UnknownScheme(String, String),

    #[error("Unknown tie-break scheme: '{0}'. Available: {1}")]
    UnknownTiebreakScheme(String, String),

    #[error("Unknown score type: '{0}'. Available: {1}")]
    UnknownScoreType(String, String),

    #[error("Unknown score status: '{0}'")]
    UnknownStatus(String),

    #[error("head_to_head_event_id is required for the head_to_head tiebreaker")]
    MissingHeadToHeadEvent,
}

pub type Result<T> = std::result::Result<T, ScoringError>;
