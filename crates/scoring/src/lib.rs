//! Score encoding, validation, leaderboard ranking and event points for
//! competition workouts.
//!
//! Every entry point is a pure function over already-fetched rows: nothing in
//! this crate performs I/O or keeps state between calls.

pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Result, ScoringError};
pub use models::{
    CompetitionScoring, Direction, LegacyTier, PointsAlgorithm, ScalingLevel, ScalingRef,
    ScoreStatus, ScoreType, ScoringScheme, TiebreakScheme, TiebreakerConfig,
};
pub use services::aggregator::{AggregatedScore, aggregate_sets, aggregate_values, encode_rounds};
pub use services::competition::get_competition_leaderboard;
pub use services::heats::{get_relevant_workout_ids, retain_relevant};
pub use services::leaderboard::get_leaderboard_for_workout;
pub use services::outlier::{is_outlier, z_score};
pub use services::parser::{parse_score, parse_tie_break_score};
pub use services::points::{
    even_spread_points, fixed_step_points, p_scores, score_event, winner_takes_more_points,
};
pub use services::tiebreakers::apply_tiebreakers;
pub use services::validator::{
    validate_distance, validate_load, validate_reps, validate_rounds_reps, validate_score_input,
    validate_time,
};
