pub mod competition;
pub mod heat;
pub mod result;
pub mod scaling;
pub mod scheme;

pub use competition::{
    CompetitionScoring, MedianField, PScoreConfig, PointsAlgorithm, StatusHandling, StatusRule,
    TiebreakMethod, TiebreakerConfig,
};
pub use heat::{Heat, HeatAssignment};
pub use result::{Athlete, SetRow, WorkoutDefinition, WorkoutResult};
pub use scaling::{LegacyTier, ScalingIndex, ScalingLevel, ScalingRef};
pub use scheme::{Direction, ScoreStatus, ScoreType, ScoringScheme, TiebreakScheme};
