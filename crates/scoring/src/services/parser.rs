use super::encoder::{self, MS_PER_SECOND, format_cap, format_time};
use super::validator::{validate_tiebreak_value, validate_value};
use crate::dto::{ParseResult, ValidationReport};
use crate::models::{ScoreStatus, ScoringScheme, TiebreakScheme};

/// Turns free-form score text into an encoded, validated result.
///
/// Status tokens (`dns`, `dnf`, `cap`) are recognised before the scheme
/// grammar. For `time-with-cap` with a cap configured, a time equal to the
/// cap becomes a CAP and a time beyond it is rejected.
pub fn parse_score(
    input: &str,
    scheme: ScoringScheme,
    time_cap_seconds: Option<i64>,
    tiebreak_scheme: Option<TiebreakScheme>,
) -> ParseResult {
    let trimmed = input.trim();
    let normalized = trimmed.to_lowercase();

    if normalized.is_empty() {
        return ParseResult::empty();
    }

    let cap_ms = time_cap_seconds
        .filter(|secs| *secs > 0)
        .and_then(|secs| secs.checked_mul(MS_PER_SECOND));

    let mut result = match normalized.as_str() {
        "dns" | "did not start" => return ParseResult::with_status("DNS", None, ScoreStatus::Dns),
        "dnf" | "did not finish" => return ParseResult::with_status("DNF", None, ScoreStatus::Dnf),
        "cap" | "c" => {
            if !scheme.is_timed() {
                return ParseResult::invalid(trimmed, "CAP is only valid for timed workouts");
            }
            ParseResult::with_status(format_cap(cap_ms), cap_ms, ScoreStatus::Cap)
        }
        _ => match encode_scored(&normalized, scheme) {
            Ok(result) => result,
            Err(error) => return ParseResult::invalid(trimmed, error),
        },
    };

    if scheme == ScoringScheme::TimeWithCap
        && result.score_status == Some(ScoreStatus::Scored)
        && let (Some(cap), Some(ms)) = (cap_ms, result.raw_value)
    {
        if ms == cap {
            result.formatted = format_cap(Some(cap));
            result.score_status = Some(ScoreStatus::Cap);
        } else if ms > cap {
            return ParseResult::invalid(
                trimmed,
                format!("Time cannot exceed cap of {}", format_time(cap)),
            );
        }
    }

    result.needs_tie_break = tiebreak_scheme.is_some()
        && result.score_status.is_some_and(|status| status.has_result());

    result
}

/// Parses the secondary value that orders entries with identical primary
/// scores. There is no status handling here: `cap` is just bad input.
pub fn parse_tie_break_score(input: &str, tiebreak_scheme: TiebreakScheme) -> ParseResult {
    let trimmed = input.trim();
    let normalized = trimmed.to_lowercase();

    if normalized.is_empty() {
        return ParseResult::empty();
    }

    let encoded = match encoder::encode_tiebreak(&normalized, tiebreak_scheme) {
        Ok(encoded) => encoded,
        Err(error) => return ParseResult::invalid(trimmed, error),
    };

    let report = validate_tiebreak_value(tiebreak_scheme, encoded.value);
    finish(trimmed, encoded, report)
}

fn encode_scored(normalized: &str, scheme: ScoringScheme) -> Result<ParseResult, String> {
    let encoded = encoder::encode(normalized, scheme)?;
    let report = validate_value(scheme, encoded.value);
    let result = finish(normalized, encoded, report);

    match result.error {
        Some(error) => Err(error),
        None => Ok(result),
    }
}

fn finish(input: &str, encoded: encoder::Encoded, report: ValidationReport) -> ParseResult {
    if let Some(error) = report.first_error() {
        return ParseResult::invalid(input, error);
    }

    let warnings: Vec<String> = encoded
        .warning
        .into_iter()
        .chain(report.warnings)
        .collect();

    let result = ParseResult::scored(encoded.formatted, encoded.value);
    if warnings.is_empty() {
        result
    } else {
        result.with_warning(warnings.join("; "))
    }
}
