use serde::{Deserialize, Serialize};

use crate::models::ScoreStatus;

/// Outcome of turning one textual score entry into an encoded value.
///
/// `error` always comes with `is_valid == false`; `warning` never changes
/// validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub formatted: String,
    pub raw_value: Option<i64>,
    pub is_valid: bool,
    pub needs_tie_break: bool,
    pub score_status: Option<ScoreStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ParseResult {
    /// Nothing entered yet. Not valid, but not an error either.
    pub fn empty() -> Self {
        Self {
            formatted: String::new(),
            raw_value: None,
            is_valid: false,
            needs_tie_break: false,
            score_status: None,
            error: None,
            warning: None,
        }
    }

    pub fn invalid(input: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            formatted: input.into(),
            error: Some(error.into()),
            ..Self::empty()
        }
    }

    pub fn scored(formatted: impl Into<String>, raw_value: i64) -> Self {
        Self {
            formatted: formatted.into(),
            raw_value: Some(raw_value),
            is_valid: true,
            score_status: Some(ScoreStatus::Scored),
            ..Self::empty()
        }
    }

    pub fn with_status(
        formatted: impl Into<String>,
        raw_value: Option<i64>,
        status: ScoreStatus,
    ) -> Self {
        Self {
            formatted: formatted.into(),
            raw_value,
            is_valid: true,
            score_status: Some(status),
            ..Self::empty()
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}
