use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::{Validate, ValidationErrors};

use crate::models::{ScoreStatus, ScoringScheme, TiebreakScheme};

/// Blocking errors and advisory warnings collected by a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Folds another report in, prefixing each message (e.g. `"Round 2: "`).
    pub fn absorb(&mut self, other: ValidationReport, prefix: &str) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{}{}", prefix, e)));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{}{}", prefix, w)));
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn first_warning(&self) -> Option<&str> {
        self.warnings.first().map(String::as_str)
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

/// A programmatically constructed score, validated without any text parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreInput {
    #[serde(default)]
    pub scheme: Option<ScoringScheme>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub rounds: Option<Vec<ScoreRound>>,
    #[serde(default)]
    pub status: Option<ScoreStatus>,
    #[serde(default)]
    pub tiebreak: Option<TiebreakInput>,
    #[serde(default)]
    pub time_cap: Option<TimeCapInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRound {
    pub value: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TiebreakInput {
    #[validate(required(message = "Tiebreak scheme is required"))]
    #[serde(default)]
    pub scheme: Option<TiebreakScheme>,
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TimeCapInput {
    #[validate(range(min = 1, message = "Time cap must be positive"))]
    pub ms: i64,
    /// Work completed when the cap was hit, used to order capped athletes.
    #[serde(default)]
    pub secondary_value: Option<i64>,
}

/// Flattens derive-level validation failures into report messages.
pub(crate) fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code))
            })
        })
        .collect()
}
