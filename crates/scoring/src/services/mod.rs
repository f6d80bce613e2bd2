pub mod aggregator;
pub mod competition;
pub mod encoder;
pub mod heats;
pub mod leaderboard;
pub mod outlier;
pub mod parser;
pub mod points;
pub mod tiebreakers;
pub mod validator;
