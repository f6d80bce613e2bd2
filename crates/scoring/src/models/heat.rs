use serde::{Deserialize, Serialize};

/// A scheduled heat for one track workout. `division_id` is `None` for a
/// mixed heat whose athletes come from several divisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heat {
    pub heat_id: String,
    pub track_workout_id: String,
    pub division_id: Option<String>,
}

impl Heat {
    pub fn is_mixed(&self) -> bool {
        self.division_id.is_none()
    }
}

/// Division of one athlete placed in a mixed heat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatAssignment {
    pub heat_id: String,
    pub division_id: Option<String>,
}
