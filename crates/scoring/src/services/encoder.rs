//! Scheme grammars: text to encoded integer, and encoded integer back to a
//! display string.
//!
//! Encoded units:
//! - time: milliseconds
//! - rounds-reps: `rounds * 100_000 + reps`
//! - reps / pass-fail: plain count (pass-fail is 1 or 0)
//! - load: grams
//! - distance: millimetres

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ScoringScheme, TiebreakScheme};

pub const MS_PER_SECOND: i64 = 1_000;
pub const ROUNDS_MULTIPLIER: i64 = 100_000;

pub fn grams_per_pound() -> Decimal {
    Decimal::new(453_592, 3)
}

/// A successfully encoded entry. `warning` is advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub value: i64,
    pub formatted: String,
    pub warning: Option<String>,
}

impl Encoded {
    fn new(value: i64, formatted: String) -> Self {
        Self {
            value,
            formatted,
            warning: None,
        }
    }
}

/// Encodes already-normalized (trimmed, lowercased) input for `scheme`.
pub fn encode(input: &str, scheme: ScoringScheme) -> Result<Encoded, String> {
    match scheme {
        ScoringScheme::Time | ScoringScheme::TimeWithCap => {
            let ms = parse_time_ms(input)?;
            Ok(Encoded::new(ms, format_time(ms)))
        }
        ScoringScheme::RoundsReps => encode_rounds_reps(input),
        ScoringScheme::Reps => {
            let reps = parse_count(input, &["rep", "reps"], "Invalid rep count")?;
            Ok(Encoded::new(reps, format!("{} reps", reps)))
        }
        ScoringScheme::Load => encode_load(input),
        ScoringScheme::Distance => encode_distance(input),
        ScoringScheme::PassFail => encode_pass_fail(input),
    }
}

/// Tie-break values share the primary grammars but never carry a status.
pub fn encode_tiebreak(input: &str, scheme: TiebreakScheme) -> Result<Encoded, String> {
    match scheme {
        TiebreakScheme::Time => {
            let ms = parse_time_ms(input)?;
            Ok(Encoded::new(ms, format_time(ms)))
        }
        TiebreakScheme::Reps => {
            let reps = parse_count(input, &["rep", "reps"], "Invalid rep count")?;
            Ok(Encoded::new(reps, reps.to_string()))
        }
    }
}

/// Accepts `SS`, `M:SS`, `H:MM:SS`, each with an optional `.mmm` fraction on
/// the seconds. A bare number is always seconds: `"90"` is 1:30.
pub fn parse_time_ms(input: &str) -> Result<i64, String> {
    const INVALID: &str = "Invalid time format";

    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let (negative, body) = split_sign(&compact);
    if body.is_empty() {
        return Err(INVALID.to_string());
    }

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() > 3 {
        return Err(INVALID.to_string());
    }

    let (seconds_part, leading) = parts.split_last().ok_or_else(|| INVALID.to_string())?;
    let (whole_seconds, fraction) = match seconds_part.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (*seconds_part, None),
    };

    let seconds = parse_digits(whole_seconds).ok_or_else(|| INVALID.to_string())?;
    let millis = match fraction {
        Some(f) if !f.is_empty() && f.len() <= 3 && f.chars().all(|c| c.is_ascii_digit()) => {
            format!("{:0<3}", f).parse::<i64>().map_err(|_| INVALID.to_string())?
        }
        Some(_) => return Err(INVALID.to_string()),
        None => 0,
    };

    let mut components = Vec::with_capacity(leading.len());
    for part in leading {
        components.push(parse_digits(part).ok_or_else(|| INVALID.to_string())?);
    }

    if !leading.is_empty() && seconds >= 60 {
        return Err(INVALID.to_string());
    }
    if leading.len() == 2 && components[1] >= 60 {
        return Err(INVALID.to_string());
    }

    let total_seconds = components
        .iter()
        .try_fold(0i64, |acc, &c| acc.checked_mul(60)?.checked_add(c))
        .and_then(|minutes| minutes.checked_mul(60)?.checked_add(seconds))
        .ok_or_else(|| INVALID.to_string())?;

    let ms = total_seconds
        .checked_mul(MS_PER_SECOND)
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(|| INVALID.to_string())?;

    Ok(if negative { -ms } else { ms })
}

fn encode_rounds_reps(input: &str) -> Result<Encoded, String> {
    const INVALID: &str = "Invalid rounds+reps format";
    const ROUND_SUFFIXES: &[&str] = &["r", "rd", "rds", "round", "rounds"];

    let (negative, body) = split_sign(input.trim());

    let (rounds, reps, warning) = match body.split_once('+') {
        Some((rounds_part, reps_part)) => {
            if reps_part.contains('+') {
                return Err(INVALID.to_string());
            }
            let rounds = parse_count(rounds_part, ROUND_SUFFIXES, INVALID)?;
            let reps = parse_count(reps_part, &["rep", "reps"], INVALID)?;
            (rounds, reps, None)
        }
        None => {
            let rounds = parse_count(body, ROUND_SUFFIXES, INVALID)?;
            let warning = format!("Interpreted as {} complete rounds", rounds);
            (rounds, 0, Some(warning))
        }
    };

    if reps >= ROUNDS_MULTIPLIER {
        return Err(format!(
            "Reps must be less than {} per round",
            ROUNDS_MULTIPLIER
        ));
    }

    let value = rounds
        .checked_mul(ROUNDS_MULTIPLIER)
        .and_then(|v| v.checked_add(reps))
        .ok_or_else(|| INVALID.to_string())?;
    let value = if negative { -value } else { value };

    Ok(Encoded {
        value,
        formatted: format_rounds_reps(value),
        warning,
    })
}

fn encode_load(input: &str) -> Result<Encoded, String> {
    const INVALID: &str = "Invalid load";

    let (negative, body) = split_sign(input.trim());
    let (number, unit) = split_number_unit(body);
    let amount = parse_decimal(number).ok_or_else(|| INVALID.to_string())?;
    let amount = if negative { -amount } else { amount };

    let (factor, unit_label) = match unit {
        "" | "lb" | "lbs" | "#" => (grams_per_pound(), "lbs"),
        "kg" | "kgs" => (Decimal::from(1_000), "kg"),
        other => return Err(format!("Unknown load unit '{}'", other)),
    };

    let grams = to_whole(amount * factor).ok_or_else(|| INVALID.to_string())?;
    Ok(Encoded::new(
        grams,
        format!("{} {}", amount.normalize(), unit_label),
    ))
}

fn encode_distance(input: &str) -> Result<Encoded, String> {
    const INVALID: &str = "Invalid distance";

    let (negative, body) = split_sign(input.trim());
    let (number, unit) = split_number_unit(body);
    let amount = parse_decimal(number).ok_or_else(|| INVALID.to_string())?;
    let amount = if negative { -amount } else { amount };

    let (mm_per_unit, unit_label) = match unit {
        "" | "m" | "meter" | "meters" | "metre" | "metres" => (Decimal::from(1_000), "m"),
        "km" => (Decimal::from(1_000_000), "km"),
        "ft" | "feet" => (Decimal::new(3_048, 1), "ft"),
        "mi" | "mile" | "miles" => (Decimal::from(1_609_344), "mi"),
        other => return Err(format!("Unknown distance unit '{}'", other)),
    };

    let mm = to_whole(amount * mm_per_unit).ok_or_else(|| INVALID.to_string())?;
    Ok(Encoded::new(
        mm,
        format!("{} {}", amount.normalize(), unit_label),
    ))
}

fn encode_pass_fail(input: &str) -> Result<Encoded, String> {
    match input.trim() {
        "pass" | "p" | "1" => Ok(Encoded::new(1, "Pass".to_string())),
        "fail" | "f" | "0" => Ok(Encoded::new(0, "Fail".to_string())),
        _ => Err("Enter 'pass' or 'fail'".to_string()),
    }
}

/// Whole, non-fractional count with an optional unit word.
fn parse_count(input: &str, suffixes: &[&str], error: &str) -> Result<i64, String> {
    let (negative, body) = split_sign(input.trim());
    let (number, unit) = split_number_unit(body);
    if !unit.is_empty() && !suffixes.contains(&unit) {
        return Err(error.to_string());
    }

    let count = parse_digits(number).ok_or_else(|| error.to_string())?;
    Ok(if negative { -count } else { count })
}

fn split_sign(input: &str) -> (bool, &str) {
    match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, input),
    }
}

fn split_number_unit(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    (&input[..end], input[end..].trim())
}

fn parse_digits(input: &str) -> Option<i64> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    if input.is_empty() || input == "." {
        return None;
    }
    Decimal::from_str(input).ok()
}

fn to_whole(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

pub fn format_time(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let total_seconds = ms / MS_PER_SECOND as u64;
    let millis = ms % MS_PER_SECOND as u64;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let clock = if hours > 0 {
        format!("{}{}:{:02}:{:02}", sign, hours, minutes, seconds)
    } else {
        format!("{}{}:{:02}", sign, minutes, seconds)
    };

    if millis > 0 {
        format!("{}.{:03}", clock, millis)
    } else {
        clock
    }
}

pub fn format_rounds_reps(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let value = value.unsigned_abs();
    let multiplier = ROUNDS_MULTIPLIER as u64;
    format!("{}{}+{}", sign, value / multiplier, value % multiplier)
}

/// Display for a time-capped entry whose stored value is the cap itself.
pub fn format_cap(cap_ms: Option<i64>) -> String {
    match cap_ms {
        Some(ms) => format!("CAP ({})", format_time(ms)),
        None => "CAP".to_string(),
    }
}

pub fn format_load(grams: i64) -> String {
    let pounds = (Decimal::from(grams) / grams_per_pound())
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{} lbs", pounds)
}

pub fn format_distance(mm: i64) -> String {
    let meters = (Decimal::from(mm) / Decimal::from(1_000)).normalize();
    format!("{} m", meters)
}

/// Display string for an encoded or aggregated value. A capped `time-with-cap`
/// value here is the rep count reached; a capped time renders with
/// [`format_cap`].
pub fn format_encoded(value: i64, scheme: ScoringScheme, is_time_capped: bool) -> String {
    let formatted = match scheme {
        ScoringScheme::Time => format_time(value),
        ScoringScheme::TimeWithCap if is_time_capped => return format!("{} reps (capped)", value),
        ScoringScheme::TimeWithCap => format_time(value),
        ScoringScheme::RoundsReps => format_rounds_reps(value),
        ScoringScheme::Reps => format!("{} reps", value),
        ScoringScheme::Load => format_load(value),
        ScoringScheme::Distance => format_distance(value),
        ScoringScheme::PassFail => match value {
            1 => "Pass".to_string(),
            0 => "Fail".to_string(),
            n => format!("{} passes", n),
        },
    };

    if is_time_capped {
        format!("{} (capped)", formatted)
    } else {
        formatted
    }
}

pub fn format_tiebreak(value: i64, scheme: TiebreakScheme) -> String {
    match scheme {
        TiebreakScheme::Time => format_time(value),
        TiebreakScheme::Reps => value.to_string(),
    }
}

pub fn format_with_tiebreak(formatted: &str, tiebreak: Option<&str>) -> String {
    match tiebreak {
        Some(tb) => format!("{} (TB: {})", formatted, tb),
        None => formatted.to_string(),
    }
}
