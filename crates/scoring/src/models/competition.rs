use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

/// Points awarded for first place under the fixed-step table.
pub const FIRST_PLACE_POINTS: i64 = 100;
pub const DEFAULT_POINTS_STEP: i64 = 5;

/// How placements within one event turn into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointsAlgorithm {
    /// `first_place_points - (place - 1) * step`, never below zero.
    FixedStep {
        #[serde(default = "default_step")]
        step: i64,
        #[serde(default = "default_first_place_points")]
        first_place_points: i64,
    },
    /// Front-loaded table that rewards podium finishes.
    WinnerTakesMore,
    /// 100 for first down to 0 for last, spread evenly over the field.
    EvenSpread,
    /// Distance from the winner measured against the field's median.
    PScore(PScoreConfig),
}

impl Default for PointsAlgorithm {
    fn default() -> Self {
        Self::FixedStep {
            step: DEFAULT_POINTS_STEP,
            first_place_points: FIRST_PLACE_POINTS,
        }
    }
}

impl PointsAlgorithm {
    /// Decimal places kept after the event multiplier is applied.
    pub fn points_precision(&self) -> u32 {
        match self {
            Self::PScore(_) => 2,
            _ => 0,
        }
    }
}

fn default_step() -> i64 {
    DEFAULT_POINTS_STEP
}

fn default_first_place_points() -> i64 {
    FIRST_PLACE_POINTS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PScoreConfig {
    #[serde(default = "default_allow_negatives")]
    pub allow_negatives: bool,
    #[serde(default)]
    pub median_field: MedianField,
}

impl Default for PScoreConfig {
    fn default() -> Self {
        Self {
            allow_negatives: default_allow_negatives(),
            median_field: MedianField::default(),
        }
    }
}

fn default_allow_negatives() -> bool {
    true
}

/// Which finishers the P-score median is taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianField {
    /// The score of the last athlete in the top half of the field.
    #[default]
    TopHalf,
    /// The ordinary median of every finisher.
    All,
}

/// What an athlete who did not finish or did not start receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusRule {
    /// Placed right after the last ranked athlete and scored for that place.
    LastPlace,
    /// Placed right after the last ranked athlete with zero points.
    Zero,
    /// Left out of the event entirely.
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHandling {
    #[serde(default = "default_dnf_rule")]
    pub dnf: StatusRule,
    #[serde(default = "default_dns_rule")]
    pub dns: StatusRule,
}

impl Default for StatusHandling {
    fn default() -> Self {
        Self {
            dnf: default_dnf_rule(),
            dns: default_dns_rule(),
        }
    }
}

fn default_dnf_rule() -> StatusRule {
    StatusRule::LastPlace
}

fn default_dns_rule() -> StatusRule {
    StatusRule::Zero
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakMethod {
    None,
    /// Most first places wins, then most second places, and so on.
    #[default]
    Countback,
    /// Better placement in one designated event wins.
    HeadToHead,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiebreakerConfig {
    #[serde(default)]
    pub primary: TiebreakMethod,
    #[serde(default)]
    pub secondary: Option<TiebreakMethod>,
    /// Event consulted by `head_to_head`.
    #[serde(default)]
    pub head_to_head_event_id: Option<String>,
}

impl TiebreakerConfig {
    pub fn uses(&self, method: TiebreakMethod) -> bool {
        self.primary == method || self.secondary == Some(method)
    }

    pub fn validate(&self) -> Result<()> {
        if self.uses(TiebreakMethod::HeadToHead) && self.head_to_head_event_id.is_none() {
            return Err(ScoringError::MissingHeadToHeadEvent);
        }
        Ok(())
    }
}

/// Competition-wide scoring rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionScoring {
    #[serde(default)]
    pub algorithm: PointsAlgorithm,
    #[serde(default)]
    pub tiebreaker: TiebreakerConfig,
    #[serde(default)]
    pub status_handling: StatusHandling,
}
