use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use super::heats::relevant_workout_ids;
use super::leaderboard::get_leaderboard_for_workout;
use super::points::score_event;
use super::tiebreakers::apply_tiebreakers;
use crate::dto::{
    CompetitionEntry, CompetitionEvent, CompetitionRequest, EventResult, EventScore,
    LeaderboardRequest, Registration, Standing,
};
use crate::error::Result;
use crate::models::{CompetitionScoring, ScoreStatus};

const NO_RESULT: &str = "N/A";

/// Overall standings for every division of a competition.
///
/// Each event is ranked per division with the workout leaderboard, turned into
/// points, and summed. Divisions with heats only score the events they had
/// heats in. Output is ordered by division id, then overall rank.
pub fn get_competition_leaderboard(request: &CompetitionRequest) -> Result<Vec<CompetitionEntry>> {
    let scoring = &request.scoring;
    scoring.tiebreaker.validate()?;

    let mut divisions: BTreeMap<&str, Vec<&Registration>> = BTreeMap::new();
    for registration in &request.registrations {
        let division = registration.division_id.as_str();
        if request
            .division_id
            .as_deref()
            .is_none_or(|wanted| wanted == division)
        {
            divisions.entry(division).or_default().push(registration);
        }
    }

    let mut entries = Vec::new();
    for (division, athletes) in divisions {
        debug!(
            division,
            athletes = athletes.len(),
            events = request.events.len(),
            "Scoring division"
        );

        let relevant =
            relevant_workout_ids(&request.heats, &request.mixed_heat_assignments, division);
        let members: HashSet<&str> = athletes
            .iter()
            .map(|r| r.athlete.user_id.as_str())
            .collect();

        let mut results_by_user: HashMap<&str, Vec<EventResult>> = HashMap::new();
        for event in &request.events {
            let competed = relevant
                .as_ref()
                .is_none_or(|ids| ids.contains(&event.track_workout_id));
            let mut scored = if competed {
                score_division_event(event, &members, scoring)
            } else {
                debug!(
                    division,
                    event = %event.track_workout_id,
                    "No heats for division, skipping event"
                );
                HashMap::new()
            };

            for registration in &athletes {
                let user_id = registration.athlete.user_id.as_str();
                let result = scored.remove(user_id).unwrap_or_else(|| EventResult {
                    track_workout_id: event.track_workout_id.clone(),
                    event_name: event.name.clone(),
                    rank: None,
                    points: Decimal::ZERO,
                    formatted_score: NO_RESULT.to_string(),
                });
                results_by_user.entry(user_id).or_default().push(result);
            }
        }

        let standings: Vec<Standing> = athletes
            .iter()
            .map(|registration| {
                let user_id = registration.athlete.user_id.as_str();
                let results = results_by_user
                    .get(user_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                Standing {
                    user_id: user_id.to_string(),
                    total_points: results.iter().map(|r| r.points).sum(),
                    placements: results
                        .iter()
                        .filter_map(|r| r.rank.map(|rank| (r.track_workout_id.clone(), rank)))
                        .collect(),
                }
            })
            .collect();

        let by_user: HashMap<&str, &Registration> = athletes
            .iter()
            .map(|r| (r.athlete.user_id.as_str(), *r))
            .collect();

        for ranked in apply_tiebreakers(&standings, &scoring.tiebreaker)? {
            let Some(registration) = by_user.get(ranked.user_id.as_str()) else {
                continue;
            };
            entries.push(CompetitionEntry {
                overall_rank: ranked.rank,
                user_name: registration.athlete.display_name(),
                division_id: division.to_string(),
                total_points: ranked.total_points,
                event_results: results_by_user
                    .remove(ranked.user_id.as_str())
                    .unwrap_or_default(),
                user_id: ranked.user_id,
            });
        }
    }

    Ok(entries)
}

/// Ranks one event among the members of a division and scores it. Keyed by
/// user id; athletes without a row in the event are absent.
fn score_division_event(
    event: &CompetitionEvent,
    members: &HashSet<&str>,
    scoring: &CompetitionScoring,
) -> HashMap<String, EventResult> {
    let board = &event.leaderboard;
    let results: Vec<_> = board
        .results
        .iter()
        .filter(|r| members.contains(r.athlete.user_id.as_str()))
        .cloned()
        .collect();
    let result_ids: HashSet<&str> = results.iter().map(|r| r.result_id.as_str()).collect();
    let sets_by_result = board
        .sets_by_result
        .iter()
        .filter(|(id, _)| result_ids.contains(id.as_str()))
        .map(|(id, sets)| (id.clone(), sets.clone()))
        .collect();

    let statuses: HashMap<&str, ScoreStatus> = results
        .iter()
        .filter_map(|r| r.status.map(|status| (r.athlete.user_id.as_str(), status)))
        .collect();

    let division_board = LeaderboardRequest {
        workout: board.workout.clone(),
        results: results.clone(),
        scaling_levels: board.scaling_levels.clone(),
        sets_by_result,
    };
    let entries = get_leaderboard_for_workout(&division_board);

    let scores: Vec<EventScore> = entries
        .iter()
        .map(|entry| EventScore {
            user_id: entry.user_id.clone(),
            rank: entry.rank,
            value: entry.aggregated_score,
            is_time_capped: entry.is_time_capped,
            status: statuses.get(entry.user_id.as_str()).copied(),
        })
        .collect();

    let workout = &board.workout;
    let direction = workout.effective_score_type().direction(workout.scheme);
    let points: HashMap<String, (usize, Decimal)> =
        score_event(&scores, direction, scoring, event.points_multiplier)
            .into_iter()
            .map(|p| (p.user_id, (p.rank, p.points)))
            .collect();

    let mut scored = HashMap::new();
    for entry in entries {
        let placed = points.get(&entry.user_id).copied();
        scored.entry(entry.user_id).or_insert_with(|| EventResult {
            track_workout_id: event.track_workout_id.clone(),
            event_name: event.name.clone(),
            rank: placed.map(|(rank, _)| rank),
            points: placed.map(|(_, points)| points).unwrap_or_default(),
            formatted_score: entry.formatted_score,
        });
    }
    scored
}
