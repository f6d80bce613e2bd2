use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::encoder::{format_cap, format_encoded};
use super::parser::parse_score;
use crate::dto::{ParseResult, ValidationReport};
use crate::models::{ScoreStatus, ScoreType, ScoringScheme, SetRow};

/// One competitor's sets collapsed into a single rankable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregatedScore {
    pub value: Option<i64>,
    pub is_time_capped: bool,
    /// The value was read from set times rather than work done.
    pub is_time_value: bool,
}

impl AggregatedScore {
    fn new(value: Option<i64>, is_time_capped: bool, is_time_value: bool) -> Self {
        Self {
            value,
            is_time_capped: value.is_some() && is_time_capped,
            is_time_value: value.is_some() && is_time_value,
        }
    }

    /// Capped, and the value is the time the cap was hit. Such a value says
    /// nothing about work done and never competes with capped rep counts.
    pub fn is_capped_at_time(&self) -> bool {
        self.is_time_capped && self.is_time_value
    }

    /// Marks a scored result capped, e.g. from a stored CAP status.
    pub fn mark_capped(&mut self) {
        if self.value.is_some() {
            self.is_time_capped = true;
        }
    }

    /// Display string. Rows that predate set-based scoring have no value but
    /// may still carry the string they were saved with.
    pub fn formatted(&self, scheme: ScoringScheme, legacy_score: Option<&str>) -> String {
        match self.value {
            Some(value) if self.is_capped_at_time() => format_cap(Some(value)),
            Some(value) => format_encoded(value, scheme, self.is_time_capped),
            None => legacy_score
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("N/A")
                .to_string(),
        }
    }
}

pub fn aggregate_values(values: &[i64], score_type: ScoreType) -> Option<i64> {
    match score_type {
        ScoreType::Min => values.iter().copied().min(),
        ScoreType::Max => values.iter().copied().max(),
        ScoreType::Sum => {
            if values.is_empty() {
                None
            } else {
                values.iter().try_fold(0i64, |acc, v| acc.checked_add(*v))
            }
        }
        ScoreType::Average => {
            if values.is_empty() {
                return None;
            }
            let total: Decimal = values.iter().map(|v| Decimal::from(*v)).sum();
            (total / Decimal::from(values.len()))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        }
        ScoreType::First => values.first().copied(),
        ScoreType::Last => values.last().copied(),
    }
}

/// Aggregates stored set rows for one result.
///
/// A `time-with-cap` result recorded with reps but no time is a capped
/// result: its reps are aggregated with `max`, since more work done is
/// better. A set flagged `time_capped` marks the whole result capped in any
/// scheme; for the timed schemes the value then stays a time.
pub fn aggregate_sets(
    sets: &[SetRow],
    scheme: ScoringScheme,
    score_type: Option<ScoreType>,
) -> AggregatedScore {
    let mut ordered: Vec<&SetRow> = sets.iter().collect();
    ordered.sort_by_key(|s| s.set_number);

    let has_reps = ordered.iter().any(|s| s.reps.is_some());
    let has_time = ordered.iter().any(|s| s.time.is_some());
    let capped_by_reps = scheme == ScoringScheme::TimeWithCap && has_reps && !has_time;

    let (values, score_type): (Vec<i64>, ScoreType) = if capped_by_reps {
        (ordered.iter().filter_map(|s| s.reps).collect(), ScoreType::Max)
    } else {
        let pick: fn(&SetRow) -> Option<i64> = match scheme {
            ScoringScheme::Time | ScoringScheme::TimeWithCap => |s| s.time,
            ScoringScheme::RoundsReps => |s| s.score.or(s.reps),
            ScoringScheme::Reps => |s| s.reps.or(s.score),
            ScoringScheme::Load => |s| s.weight,
            ScoringScheme::Distance => |s| s.distance.or(s.score),
            ScoringScheme::PassFail => |s| s.score,
        };
        (
            ordered.iter().filter_map(|s| pick(s)).collect(),
            score_type.unwrap_or_else(|| scheme.default_score_type()),
        )
    };

    let value = aggregate_values(&values, score_type);
    AggregatedScore::new(
        value,
        capped_by_reps || ordered.iter().any(|s| s.time_capped),
        scheme.is_timed() && !capped_by_reps,
    )
}

/// Per-round parse results plus their aggregate.
#[derive(Debug, Clone)]
pub struct EncodedRounds {
    pub rounds: Vec<ParseResult>,
    pub aggregated: AggregatedScore,
    pub report: ValidationReport,
}

/// Parses each textual round under one scheme and aggregates them. Any round
/// that fails blocks the aggregate; failures are reported by 1-based index.
pub fn encode_rounds(
    inputs: &[&str],
    scheme: ScoringScheme,
    score_type: Option<ScoreType>,
    time_cap_seconds: Option<i64>,
) -> EncodedRounds {
    let mut report = ValidationReport::default();
    let mut values = Vec::with_capacity(inputs.len());
    let mut is_time_capped = false;

    let rounds: Vec<ParseResult> = inputs
        .iter()
        .map(|input| parse_score(input, scheme, time_cap_seconds, None))
        .collect();

    if rounds.is_empty() {
        report.error("At least one round is required");
    }

    for (idx, round) in rounds.iter().enumerate() {
        let prefix = format!("Round {}: ", idx + 1);

        if let Some(warning) = &round.warning {
            report.warning(format!("{}{}", prefix, warning));
        }

        match (&round.error, round.score_status, round.raw_value) {
            (Some(error), _, _) => report.error(format!("{}{}", prefix, error)),
            (None, Some(ScoreStatus::Cap), Some(value)) => {
                is_time_capped = true;
                values.push(value);
            }
            (None, Some(ScoreStatus::Scored), Some(value)) => values.push(value),
            (None, None, _) => report.error(format!("{}No score entered", prefix)),
            (None, Some(status), _) => report.error(format!(
                "{}{} cannot be aggregated",
                prefix,
                status.as_str().to_uppercase()
            )),
        }
    }

    let aggregated = if report.is_valid() {
        let score_type = score_type.unwrap_or_else(|| scheme.default_score_type());
        let value = aggregate_values(&values, score_type);
        AggregatedScore::new(value, is_time_capped, scheme.is_timed())
    } else {
        AggregatedScore::default()
    };

    EncodedRounds {
        rounds,
        aggregated,
        report,
    }
}
