use std::cmp::Ordering;

use tracing::{debug, warn};

use super::aggregator::{AggregatedScore, aggregate_sets};
use super::encoder::format_tiebreak;
use crate::dto::{LeaderboardEntry, LeaderboardRequest};
use crate::models::{
    Direction, ScalingIndex, ScoreStatus, TiebreakScheme, WorkoutDefinition, WorkoutResult,
};

/// Builds the ranked leaderboard for one workout.
///
/// Ordering keys, first decisive wins: scaling position (unknown last), Rx
/// before non-Rx, score, tiebreak, then name and user id so the output never
/// depends on input order. Missing data sorts to the back instead of failing.
pub fn get_leaderboard_for_workout(request: &LeaderboardRequest) -> Vec<LeaderboardEntry> {
    let workout = &request.workout;
    let direction = workout.effective_score_type().direction(workout.scheme);
    let index = ScalingIndex::new(&request.scaling_levels);

    debug!(
        workout_id = %workout.workout_id,
        scheme = %workout.scheme,
        results = request.results.len(),
        "Building leaderboard"
    );

    let mut keyed: Vec<(String, LeaderboardEntry)> = request
        .results
        .iter()
        .map(|result| {
            let sets = request
                .sets_by_result
                .get(&result.result_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let entry = build_entry(result, sets, workout, &index);
            (entry.user_name.to_lowercase(), entry)
        })
        .collect();

    keyed.sort_by(|(a_name, a), (b_name, b)| {
        compare_scoring_keys(a, b, direction, workout.tiebreak_scheme)
            .then_with(|| a_name.cmp(b_name))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut entries: Vec<LeaderboardEntry> = keyed.into_iter().map(|(_, e)| e).collect();
    assign_ranks(&mut entries, direction, workout.tiebreak_scheme);
    entries
}

fn build_entry(
    result: &WorkoutResult,
    sets: &[crate::models::SetRow],
    workout: &WorkoutDefinition,
    index: &ScalingIndex<'_>,
) -> LeaderboardEntry {
    let scaling = result.scaling_level_id.as_deref().and_then(|id| {
        let resolved = index.resolve(id);
        if resolved.is_none() {
            warn!(
                result_id = %result.result_id,
                scaling_level_id = id,
                "Unknown scaling level, entry will sort after known levels"
            );
        }
        resolved
    });

    let (aggregated, formatted_score) = match result.status {
        Some(status @ (ScoreStatus::Dns | ScoreStatus::Dnf)) => (
            AggregatedScore::default(),
            status.as_str().to_uppercase(),
        ),
        _ => {
            let mut aggregated = aggregate_sets(sets, workout.scheme, workout.score_type);
            if result.status == Some(ScoreStatus::Cap) {
                aggregated.mark_capped();
            }
            let formatted = aggregated.formatted(workout.scheme, result.legacy_score.as_deref());
            (aggregated, formatted)
        }
    };

    let formatted_tiebreak = workout
        .tiebreak_scheme
        .zip(result.tiebreak_value)
        .map(|(scheme, value)| format_tiebreak(value, scheme));

    LeaderboardEntry {
        rank: None,
        user_id: result.athlete.user_id.clone(),
        user_name: result.athlete.display_name(),
        scaling_level_id: result.scaling_level_id.clone(),
        scaling_level_label: scaling.as_ref().map(|s| s.label().to_string()),
        scaling_level_position: scaling.as_ref().map(|s| s.position()),
        as_rx: result.as_rx,
        aggregated_score: aggregated.value,
        formatted_score,
        tiebreak_value: result.tiebreak_value,
        formatted_tiebreak,
        is_time_capped: aggregated.is_time_capped,
        is_capped_at_time: aggregated.is_capped_at_time(),
        completed_at: result.completed_at,
    }
}

/// Every key that decides placement. Entries equal here share a rank.
fn compare_scoring_keys(
    a: &LeaderboardEntry,
    b: &LeaderboardEntry,
    direction: Direction,
    tiebreak_scheme: Option<TiebreakScheme>,
) -> Ordering {
    compare_positions(a.scaling_level_position, b.scaling_level_position)
        .then_with(|| b.as_rx.cmp(&a.as_rx))
        .then_with(|| compare_scores(a, b, direction))
        .then_with(|| compare_tiebreaks(a.tiebreak_value, b.tiebreak_value, tiebreak_scheme))
}

fn compare_positions(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A capped result never beats a finisher. Among capped results more work is
/// better whatever the workout's own direction. A cap that only carries the
/// cap time says nothing about work, so it follows capped rep counts and is
/// left to the tiebreak.
fn compare_scores(a: &LeaderboardEntry, b: &LeaderboardEntry, direction: Direction) -> Ordering {
    match (a.aggregated_score, b.aggregated_score) {
        (Some(a_score), Some(b_score)) => match (a.is_time_capped, b.is_time_capped) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => match (a.is_capped_at_time, b.is_capped_at_time) {
                (false, false) => Direction::HigherIsBetter.compare(a_score, b_score),
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                (true, true) => Ordering::Equal,
            },
            (false, false) => direction.compare(a_score, b_score),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_tiebreaks(
    a: Option<i64>,
    b: Option<i64>,
    tiebreak_scheme: Option<TiebreakScheme>,
) -> Ordering {
    let Some(scheme) = tiebreak_scheme else {
        return Ordering::Equal;
    };

    match (a, b) {
        (Some(a), Some(b)) => scheme.direction().compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Competition ranking (1, 1, 3) over sorted entries. Entries without a score
/// get no rank and are not counted.
fn assign_ranks(
    entries: &mut [LeaderboardEntry],
    direction: Direction,
    tiebreak_scheme: Option<TiebreakScheme>,
) {
    let mut ranked = 0;
    let mut previous: Option<(usize, usize)> = None;

    for idx in 0..entries.len() {
        if entries[idx].aggregated_score.is_none() {
            entries[idx].rank = None;
            continue;
        }

        let rank = match previous {
            Some((prev_idx, prev_rank))
                if compare_scoring_keys(
                    &entries[prev_idx],
                    &entries[idx],
                    direction,
                    tiebreak_scheme,
                ) == Ordering::Equal =>
            {
                prev_rank
            }
            _ => ranked + 1,
        };

        entries[idx].rank = Some(rank);
        ranked += 1;
        previous = Some((idx, rank));
    }
}
