use serde::{Deserialize, Serialize};

use crate::models::{Heat, HeatAssignment};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceQuery {
    pub heats: Vec<Heat>,
    /// Assignment rows for heats whose own `division_id` is `None`.
    #[serde(default)]
    pub mixed_heat_assignments: Vec<HeatAssignment>,
    pub division_id: String,
}
