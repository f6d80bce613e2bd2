use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{ScalingLevel, SetRow, WorkoutDefinition, WorkoutResult};

/// Everything needed to rank one workout, already fetched by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRequest {
    pub workout: WorkoutDefinition,
    pub results: Vec<WorkoutResult>,
    #[serde(default)]
    pub scaling_levels: Vec<ScalingLevel>,
    /// Set rows keyed by `result_id`.
    #[serde(default)]
    pub sets_by_result: HashMap<String, Vec<SetRow>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based competition rank; `None` when the athlete has no score.
    pub rank: Option<usize>,
    pub user_id: String,
    pub user_name: String,
    pub scaling_level_id: Option<String>,
    pub scaling_level_label: Option<String>,
    pub scaling_level_position: Option<i32>,
    pub as_rx: bool,
    pub aggregated_score: Option<i64>,
    pub formatted_score: String,
    pub tiebreak_value: Option<i64>,
    pub formatted_tiebreak: Option<String>,
    pub is_time_capped: bool,
    /// Capped, and `aggregated_score` is the cap time rather than work done.
    #[serde(default)]
    pub is_capped_at_time: bool,
    pub completed_at: NaiveDateTime,
}
