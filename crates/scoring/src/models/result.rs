use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::scheme::{ScoreStatus, ScoreType, ScoringScheme, TiebreakScheme};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl Athlete {
    /// Full name when known, then email, then a placeholder.
    pub fn display_name(&self) -> String {
        let full_name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full_name = full_name.trim();

        if !full_name.is_empty() {
            full_name.to_string()
        } else if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            email.to_string()
        } else {
            "Unknown".to_string()
        }
    }
}

/// Scoring configuration of the workout a leaderboard is built for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    pub workout_id: String,
    pub scheme: ScoringScheme,
    #[serde(default)]
    pub score_type: Option<ScoreType>,
    #[serde(default)]
    pub tiebreak_scheme: Option<TiebreakScheme>,
    #[serde(default)]
    pub time_cap_seconds: Option<i64>,
}

impl WorkoutDefinition {
    pub fn effective_score_type(&self) -> ScoreType {
        self.score_type
            .unwrap_or_else(|| self.scheme.default_score_type())
    }
}

/// One persisted result row joined with its athlete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutResult {
    pub result_id: String,
    pub athlete: Athlete,
    #[serde(default)]
    pub scaling_level_id: Option<String>,
    #[serde(default)]
    pub as_rx: bool,
    #[serde(default)]
    pub status: Option<ScoreStatus>,
    /// Display string saved before results were recorded as sets.
    #[serde(default)]
    pub legacy_score: Option<String>,
    #[serde(default)]
    pub tiebreak_value: Option<i64>,
    pub completed_at: NaiveDateTime,
}

/// One set or round of a result. Which field carries the value depends on the
/// workout scheme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetRow {
    pub set_number: i32,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub distance: Option<i64>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub time_capped: bool,
}
