use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// How a workout is scored. Determines the accepted text grammar and the
/// unit of the encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringScheme {
    Time,
    TimeWithCap,
    RoundsReps,
    Reps,
    Load,
    Distance,
    PassFail,
}

impl ScoringScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::TimeWithCap => "time-with-cap",
            Self::RoundsReps => "rounds-reps",
            Self::Reps => "reps",
            Self::Load => "load",
            Self::Distance => "distance",
            Self::PassFail => "pass-fail",
        }
    }

    pub fn all() -> &'static [ScoringScheme] {
        &[
            Self::Time,
            Self::TimeWithCap,
            Self::RoundsReps,
            Self::Reps,
            Self::Load,
            Self::Distance,
            Self::PassFail,
        ]
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Time | Self::TimeWithCap)
    }

    /// Aggregation applied to multi-set results when the workout does not
    /// override it.
    pub fn default_score_type(&self) -> ScoreType {
        match self {
            Self::Time | Self::TimeWithCap => ScoreType::Min,
            Self::PassFail => ScoreType::First,
            Self::RoundsReps | Self::Reps | Self::Load | Self::Distance => ScoreType::Max,
        }
    }

    pub fn default_direction(&self) -> Direction {
        if self.is_timed() {
            Direction::LowerIsBetter
        } else {
            Direction::HigherIsBetter
        }
    }

    fn parse_str(s: &str) -> Result<Self, ScoringError> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "time" | "for-time" => Ok(Self::Time),
            "time-with-cap" | "timecap" => Ok(Self::TimeWithCap),
            "rounds-reps" | "amrap" => Ok(Self::RoundsReps),
            "reps" => Ok(Self::Reps),
            "load" => Ok(Self::Load),
            "distance" => Ok(Self::Distance),
            "pass-fail" => Ok(Self::PassFail),
            _ => Err(ScoringError::UnknownScheme(
                s.to_string(),
                Self::all()
                    .iter()
                    .map(|scheme| scheme.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }
}

impl TryFrom<&str> for ScoringScheme {
    type Error = ScoringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for ScoringScheme {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ScoringScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Secondary score used only to order entries whose primary scores tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiebreakScheme {
    Time,
    Reps,
}

impl TiebreakScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Reps => "reps",
        }
    }

    pub fn all() -> &'static [TiebreakScheme] {
        &[Self::Time, Self::Reps]
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::Time => Direction::LowerIsBetter,
            Self::Reps => Direction::HigherIsBetter,
        }
    }

    fn parse_str(s: &str) -> Result<Self, ScoringError> {
        match s.trim().to_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "reps" => Ok(Self::Reps),
            _ => Err(ScoringError::UnknownTiebreakScheme(
                s.to_string(),
                Self::all()
                    .iter()
                    .map(|scheme| scheme.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }
}

impl TryFrom<&str> for TiebreakScheme {
    type Error = ScoringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for TiebreakScheme {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TiebreakScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How per-round values collapse into one aggregated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreType {
    Min,
    Max,
    Sum,
    Average,
    First,
    Last,
}

impl ScoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Average => "average",
            Self::First => "first",
            Self::Last => "last",
        }
    }

    pub fn all() -> &'static [ScoreType] {
        &[
            Self::Min,
            Self::Max,
            Self::Sum,
            Self::Average,
            Self::First,
            Self::Last,
        ]
    }

    /// `min` and `max` name their direction; the remaining aggregations keep
    /// the scheme's natural direction (a summed time is still lower-is-better).
    pub fn direction(&self, scheme: ScoringScheme) -> Direction {
        match self {
            Self::Min => Direction::LowerIsBetter,
            Self::Max => Direction::HigherIsBetter,
            Self::Sum | Self::Average | Self::First | Self::Last => scheme.default_direction(),
        }
    }

    fn parse_str(s: &str) -> Result<Self, ScoringError> {
        match s.trim().to_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "sum" => Ok(Self::Sum),
            "average" | "avg" => Ok(Self::Average),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(ScoringError::UnknownScoreType(
                s.to_string(),
                Self::all()
                    .iter()
                    .map(|score_type| score_type.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }
}

impl std::str::FromStr for ScoreType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ScoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

impl Direction {
    /// Orders two values so that the better one comes first.
    pub fn compare(&self, a: i64, b: i64) -> std::cmp::Ordering {
        match self {
            Self::LowerIsBetter => a.cmp(&b),
            Self::HigherIsBetter => b.cmp(&a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    Scored,
    Dns,
    Dnf,
    Cap,
}

impl ScoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scored => "scored",
            Self::Dns => "dns",
            Self::Dnf => "dnf",
            Self::Cap => "cap",
        }
    }

    /// DNS and DNF carry no magnitude and never take part in tie-breaks.
    pub fn has_result(&self) -> bool {
        matches!(self, Self::Scored | Self::Cap)
    }
}

impl std::str::FromStr for ScoreStatus {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scored" => Ok(Self::Scored),
            "dns" => Ok(Self::Dns),
            "dnf" => Ok(Self::Dnf),
            "cap" => Ok(Self::Cap),
            _ => Err(ScoringError::UnknownStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scheme_parsing() {
        assert_eq!(ScoringScheme::from_str("time").unwrap(), ScoringScheme::Time);
        assert_eq!(
            ScoringScheme::try_from("Time_With_Cap").unwrap(),
            ScoringScheme::TimeWithCap
        );
        assert_eq!(
            "amrap".parse::<ScoringScheme>().unwrap(),
            ScoringScheme::RoundsReps
        );

        let err = ScoringScheme::from_str("calories").unwrap_err();
        assert!(err.to_string().contains("calories"));
        assert!(err.to_string().contains("pass-fail"));
    }

    #[test]
    fn test_scheme_defaults() {
        assert_eq!(ScoringScheme::Time.default_score_type(), ScoreType::Min);
        assert_eq!(ScoringScheme::TimeWithCap.default_score_type(), ScoreType::Min);
        assert_eq!(ScoringScheme::RoundsReps.default_score_type(), ScoreType::Max);
        assert_eq!(ScoringScheme::Load.default_score_type(), ScoreType::Max);
        assert_eq!(ScoringScheme::PassFail.default_score_type(), ScoreType::First);
    }

    #[test]
    fn test_score_type_direction_falls_back_to_scheme() {
        assert_eq!(
            ScoreType::Sum.direction(ScoringScheme::Time),
            Direction::LowerIsBetter
        );
        assert_eq!(
            ScoreType::Sum.direction(ScoringScheme::Load),
            Direction::HigherIsBetter
        );
        assert_eq!(
            ScoreType::Max.direction(ScoringScheme::Time),
            Direction::HigherIsBetter
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ScoringScheme::TimeWithCap).unwrap();
        assert_eq!(json, "\"time-with-cap\"");

        let status: ScoreStatus = serde_json::from_str("\"dnf\"").unwrap();
        assert_eq!(status, ScoreStatus::Dnf);
    }
}
