use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leaderboard::LeaderboardRequest;
use crate::models::{Athlete, CompetitionScoring, Heat, HeatAssignment, ScoreStatus};

/// A whole competition: every event's rows plus who is registered where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionRequest {
    pub events: Vec<CompetitionEvent>,
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub scoring: CompetitionScoring,
    /// When present, a division only scores the events it had heats in.
    #[serde(default)]
    pub heats: Vec<Heat>,
    #[serde(default)]
    pub mixed_heat_assignments: Vec<HeatAssignment>,
    /// Restricts the output to one division.
    #[serde(default)]
    pub division_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionEvent {
    pub track_workout_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Percentage applied to the event's points; 200 makes it count double.
    #[serde(default = "default_points_multiplier")]
    pub points_multiplier: i64,
    pub leaderboard: LeaderboardRequest,
}

fn default_points_multiplier() -> i64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub athlete: Athlete,
    pub division_id: String,
}

/// One athlete's placement in one event, as fed to the points rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScore {
    pub user_id: String,
    pub rank: Option<usize>,
    pub value: Option<i64>,
    #[serde(default)]
    pub is_time_capped: bool,
    #[serde(default)]
    pub status: Option<ScoreStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPoints {
    pub user_id: String,
    pub rank: usize,
    pub points: Decimal,
}

/// Running totals for one athlete before overall ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub user_id: String,
    pub total_points: Decimal,
    /// Event id to placement, for events the athlete was placed in.
    #[serde(default)]
    pub placements: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedStanding {
    pub user_id: String,
    pub total_points: Decimal,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResult {
    pub track_workout_id: String,
    pub event_name: Option<String>,
    /// `None` when the athlete has no placement in the event.
    pub rank: Option<usize>,
    pub points: Decimal,
    pub formatted_score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionEntry {
    pub overall_rank: usize,
    pub user_id: String,
    pub user_name: String,
    pub division_id: String,
    pub total_points: Decimal,
    pub event_results: Vec<EventResult>,
}
