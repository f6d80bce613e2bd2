use std::path::{Path, PathBuf};

use scoring::dto::{
    CompetitionRequest, LeaderboardRequest, ParseResult, RelevanceQuery, ScoreInput,
};
use scoring::services::encoder::format_with_tiebreak;
use scoring::{
    ScoreType, ScoringScheme, TiebreakScheme, encode_rounds, get_competition_leaderboard,
    get_leaderboard_for_workout, get_relevant_workout_ids, is_outlier, parse_score,
    parse_tie_break_score, validate_score_input, z_score,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CliError, Result};

/// Writes command output to stdout as JSON.
pub struct Printer {
    pretty: bool,
}

impl Printer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{}", json);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RoundsOutput {
    pub rounds: Vec<ParseResult>,
    pub aggregated_score: Option<i64>,
    pub formatted: Option<String>,
    pub is_time_capped: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct OutlierOutput {
    pub value: f64,
    pub z_score: Option<f64>,
    pub is_outlier: bool,
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    tracing::debug!("Reading {}", path.display());

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(serde_json::from_str(&content)?)
}

pub fn handle_parse(
    printer: &Printer,
    input: &str,
    scheme: &str,
    time_cap: Option<i64>,
    tiebreak: Option<&str>,
) -> Result<()> {
    let scheme = ScoringScheme::try_from(scheme)?;
    let tiebreak = tiebreak.map(str::parse::<TiebreakScheme>).transpose()?;

    let result = parse_score(input, scheme, time_cap, tiebreak);
    if let Some(warning) = &result.warning {
        tracing::warn!("{}", warning);
    }

    printer.print(&result)
}

pub fn handle_tiebreak(printer: &Printer, input: &str, scheme: &str) -> Result<()> {
    let scheme = TiebreakScheme::try_from(scheme)?;
    printer.print(&parse_tie_break_score(input, scheme))
}

pub async fn handle_validate(printer: &Printer, file: PathBuf) -> Result<()> {
    let input: ScoreInput = read_json(&file).await?;

    let report = validate_score_input(&input);
    report.log_warnings();
    printer.print(&report)?;

    if report.is_valid() {
        tracing::info!("✓ Score input is valid");
        Ok(())
    } else {
        Err(CliError::InvalidScore(report.errors.len()))
    }
}

pub fn build_rounds_output(
    inputs: &[String],
    scheme: ScoringScheme,
    score_type: Option<ScoreType>,
    time_cap: Option<i64>,
) -> RoundsOutput {
    let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
    let encoded = encode_rounds(&inputs, scheme, score_type, time_cap);
    encoded.report.log_warnings();

    let formatted = encoded
        .aggregated
        .value
        .map(|_| encoded.aggregated.formatted(scheme, None));

    RoundsOutput {
        rounds: encoded.rounds,
        aggregated_score: encoded.aggregated.value,
        formatted,
        is_time_capped: encoded.aggregated.is_time_capped,
        errors: encoded.report.errors,
        warnings: encoded.report.warnings,
    }
}

pub fn handle_rounds(
    printer: &Printer,
    inputs: &[String],
    scheme: &str,
    score_type: Option<&str>,
    time_cap: Option<i64>,
) -> Result<()> {
    let scheme = ScoringScheme::try_from(scheme)?;
    let score_type = score_type.map(str::parse::<ScoreType>).transpose()?;

    printer.print(&build_rounds_output(inputs, scheme, score_type, time_cap))
}

pub async fn handle_leaderboard(printer: &Printer, file: PathBuf) -> Result<()> {
    let request: LeaderboardRequest = read_json(&file).await?;

    tracing::info!(
        "Ranking {} results for workout {}",
        request.results.len(),
        request.workout.workout_id
    );

    let entries = get_leaderboard_for_workout(&request);
    for entry in &entries {
        tracing::debug!(
            "{:>4} {} {}",
            entry.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            entry.user_name,
            format_with_tiebreak(&entry.formatted_score, entry.formatted_tiebreak.as_deref())
        );
    }

    printer.print(&entries)
}

pub async fn handle_competition(printer: &Printer, file: PathBuf) -> Result<()> {
    let request: CompetitionRequest = read_json(&file).await?;

    tracing::info!(
        "Scoring {} events for {} athletes",
        request.events.len(),
        request.registrations.len()
    );

    let entries = get_competition_leaderboard(&request)?;
    for entry in &entries {
        tracing::debug!(
            "{} {:>4} {} {}",
            entry.division_id,
            entry.overall_rank,
            entry.user_name,
            entry.total_points
        );
    }

    printer.print(&entries)
}

pub async fn handle_relevance(printer: &Printer, file: PathBuf) -> Result<()> {
    let query: RelevanceQuery = read_json(&file).await?;

    let relevant = get_relevant_workout_ids(&query);
    if relevant.is_none() {
        tracing::info!("No heats scheduled, every workout is relevant");
    }

    printer.print(&relevant)
}

pub fn handle_outlier(printer: &Printer, value: f64, sample: &[f64]) -> Result<()> {
    let output = OutlierOutput {
        value,
        z_score: z_score(value, sample),
        is_outlier: is_outlier(value, sample),
    };

    if output.is_outlier {
        tracing::warn!("{} is an outlier, flag it for review", value);
    }

    printer.print(&output)
}
