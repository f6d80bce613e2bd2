pub mod competition;
pub mod heats;
pub mod leaderboard;
pub mod parse;
pub mod validation;

pub use competition::{
    CompetitionEntry, CompetitionEvent, CompetitionRequest, EventPoints, EventResult, EventScore,
    RankedStanding, Registration, Standing,
};
pub use heats::RelevanceQuery;
pub use leaderboard::{LeaderboardEntry, LeaderboardRequest};
pub use parse::ParseResult;
pub use validation::{ScoreInput, ScoreRound, TiebreakInput, TimeCapInput, ValidationReport};
