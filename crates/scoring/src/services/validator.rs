use validator::Validate;

use super::encoder::{ROUNDS_MULTIPLIER, grams_per_pound};
use crate::dto::validation::field_messages;
use crate::dto::{ScoreInput, ValidationReport};
use crate::models::{ScoreStatus, ScoringScheme, TiebreakScheme};

const MAX_PLAUSIBLE_TIME_MS: i64 = 24 * 60 * 60 * 1_000;
const MAX_PLAUSIBLE_ROUNDS: i64 = 1_000;
const MAX_PLAUSIBLE_PARTIAL_REPS: i64 = 1_000;
const MAX_PLAUSIBLE_LOAD_LBS: i64 = 2_500;
const MARATHON_MM: i64 = 42_195_000;

pub fn validate_time(ms: i64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if ms < 0 {
        report.error("Time cannot be negative");
    } else if ms > MAX_PLAUSIBLE_TIME_MS {
        report.warning("Time exceeds 24 hours, please verify");
    }

    report
}

pub fn validate_rounds_reps(encoded: i64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if encoded < 0 {
        report.error("Rounds and reps cannot be negative");
        return report;
    }

    let rounds = encoded / ROUNDS_MULTIPLIER;
    let reps = encoded % ROUNDS_MULTIPLIER;

    if rounds > MAX_PLAUSIBLE_ROUNDS {
        report.warning(format!(
            "{} rounds is unusually high, please verify",
            rounds
        ));
    }
    if reps > MAX_PLAUSIBLE_PARTIAL_REPS {
        report.warning(format!(
            "{} reps in a partial round is unusually high, please verify",
            reps
        ));
    }

    report
}

pub fn validate_reps(reps: i64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if reps < 0 {
        report.error("Reps cannot be negative");
    }

    report
}

pub fn validate_load(grams: i64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if grams < 0 {
        report.error("Load cannot be negative");
    } else if rust_decimal::Decimal::from(grams)
        > grams_per_pound() * rust_decimal::Decimal::from(MAX_PLAUSIBLE_LOAD_LBS)
    {
        report.warning(format!(
            "Load exceeds {} lbs, please verify",
            MAX_PLAUSIBLE_LOAD_LBS
        ));
    }

    report
}

pub fn validate_distance(mm: i64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if mm < 0 {
        report.error("Distance cannot be negative");
    } else if mm > MARATHON_MM {
        report.warning("Distance exceeds a marathon (42.195 km), please verify");
    }

    report
}

pub fn validate_pass_fail(value: i64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if value < 0 {
        report.error("Pass/fail value cannot be negative");
    } else if value > 1 {
        report.error("Pass/fail value must be 0 or 1");
    }

    report
}

/// Range checks for one encoded value of `scheme`.
pub fn validate_value(scheme: ScoringScheme, value: i64) -> ValidationReport {
    match scheme {
        ScoringScheme::Time | ScoringScheme::TimeWithCap => validate_time(value),
        ScoringScheme::RoundsReps => validate_rounds_reps(value),
        ScoringScheme::Reps => validate_reps(value),
        ScoringScheme::Load => validate_load(value),
        ScoringScheme::Distance => validate_distance(value),
        ScoringScheme::PassFail => validate_pass_fail(value),
    }
}

pub fn validate_tiebreak_value(scheme: TiebreakScheme, value: i64) -> ValidationReport {
    match scheme {
        TiebreakScheme::Time => validate_time(value),
        TiebreakScheme::Reps => validate_reps(value),
    }
}

/// Validates a score built in code rather than typed in.
///
/// DNS and DNF carry no value, so they are exempt from the value requirement.
/// A CAP with a time cap attached is exempt as well: its magnitude is the cap.
pub fn validate_score_input(input: &ScoreInput) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(scheme) = input.scheme else {
        report.error("Scheme is required");
        return report;
    };

    let rounds = input.rounds.as_deref().unwrap_or_default();
    let status_without_value = match input.status {
        Some(ScoreStatus::Dns | ScoreStatus::Dnf) => true,
        Some(ScoreStatus::Cap) => input.time_cap.is_some(),
        Some(ScoreStatus::Scored) | None => false,
    };

    if input.value.is_none() && rounds.is_empty() && !status_without_value {
        report.error("Either a value or at least one round is required");
    }

    if let Some(value) = input.value {
        report.absorb(validate_value(scheme, value), "");
    }

    for (idx, round) in rounds.iter().enumerate() {
        report.absorb(
            validate_value(scheme, round.value),
            &format!("Round {}: ", idx + 1),
        );
    }

    if let Some(tiebreak) = &input.tiebreak {
        if let Err(errors) = tiebreak.validate() {
            for message in field_messages(&errors) {
                report.error(message);
            }
        }
        if let (Some(tb_scheme), Some(value)) = (tiebreak.scheme, tiebreak.value) {
            report.absorb(validate_tiebreak_value(tb_scheme, value), "Tiebreak: ");
        }
    }

    if let Some(time_cap) = &input.time_cap
        && let Err(errors) = time_cap.validate()
    {
        for message in field_messages(&errors) {
            report.error(message);
        }
    }

    if input.status == Some(ScoreStatus::Cap) {
        let has_secondary = input
            .time_cap
            .as_ref()
            .is_some_and(|cap| cap.secondary_value.is_some());
        let has_tiebreak = input.tiebreak.as_ref().is_some_and(|tb| tb.value.is_some());

        if !has_secondary && !has_tiebreak {
            report.warning(
                "Capped score has no reps completed or tiebreak, ranking among capped athletes will be ambiguous",
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{ScoreRound, TiebreakInput, TimeCapInput};

    #[test]
    fn test_negative_values_are_errors_for_every_scheme() {
        for scheme in ScoringScheme::all() {
            let report = validate_value(*scheme, -1);
            assert!(!report.is_valid(), "{} accepted a negative value", scheme);
        }
    }

    #[test]
    fn test_time_warnings() {
        assert!(validate_time(754_000).warnings.is_empty());

        let ultra = validate_time(MAX_PLAUSIBLE_TIME_MS + 1);
        assert!(ultra.is_valid());
        assert_eq!(ultra.warnings.len(), 1);
    }

    #[test]
    fn test_rounds_reps_warnings() {
        let report = validate_rounds_reps(1_001 * ROUNDS_MULTIPLIER + 1_500);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);

        assert!(validate_rounds_reps(400_015).warnings.is_empty());
    }

    #[test]
    fn test_load_warning_threshold() {
        assert!(validate_load(1_133_980).warnings.is_empty());

        let heavy = validate_load(1_133_981);
        assert!(heavy.is_valid());
        assert_eq!(heavy.warnings.len(), 1);
    }

    #[test]
    fn test_distance_warning_threshold() {
        assert!(validate_distance(MARATHON_MM).warnings.is_empty());
        assert_eq!(validate_distance(MARATHON_MM + 1).warnings.len(), 1);
        assert!(validate_distance(MARATHON_MM + 1).is_valid());
    }

    #[test]
    fn test_score_input_requires_scheme() {
        let report = validate_score_input(&ScoreInput::default());
        assert_eq!(report.errors, vec!["Scheme is required".to_string()]);
    }

    #[test]
    fn test_score_input_requires_value_or_rounds() {
        let report = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::Reps),
            ..Default::default()
        });
        assert!(!report.is_valid());

        let dns = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::Reps),
            status: Some(ScoreStatus::Dns),
            ..Default::default()
        });
        assert!(dns.is_valid());
    }

    #[test]
    fn test_score_input_reports_failing_rounds_by_index() {
        let report = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::Load),
            rounds: Some(vec![
                ScoreRound { value: 102_058 },
                ScoreRound { value: -5 },
                ScoreRound { value: 2_000_000 },
            ]),
            ..Default::default()
        });

        assert_eq!(report.errors, vec!["Round 2: Load cannot be negative".to_string()]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Round 3: "));
    }

    #[test]
    fn test_tiebreak_requires_scheme() {
        let report = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::RoundsReps),
            value: Some(500_012),
            tiebreak: Some(TiebreakInput {
                scheme: None,
                value: Some(510_000),
            }),
            ..Default::default()
        });

        assert_eq!(report.errors, vec!["Tiebreak scheme is required".to_string()]);
    }

    #[test]
    fn test_time_cap_must_be_positive() {
        let report = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::TimeWithCap),
            value: Some(600_000),
            time_cap: Some(TimeCapInput {
                ms: 0,
                secondary_value: None,
            }),
            ..Default::default()
        });

        assert_eq!(report.errors, vec!["Time cap must be positive".to_string()]);
    }

    #[test]
    fn test_cap_without_secondary_only_warns() {
        let report = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::TimeWithCap),
            status: Some(ScoreStatus::Cap),
            time_cap: Some(TimeCapInput {
                ms: 900_000,
                secondary_value: None,
            }),
            ..Default::default()
        });
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);

        let with_reps = validate_score_input(&ScoreInput {
            scheme: Some(ScoringScheme::TimeWithCap),
            status: Some(ScoreStatus::Cap),
            time_cap: Some(TimeCapInput {
                ms: 900_000,
                secondary_value: Some(142),
            }),
            ..Default::default()
        });
        assert!(with_reps.is_valid());
        assert!(with_reps.warnings.is_empty());
    }
}
