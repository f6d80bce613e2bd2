use std::collections::{BTreeSet, HashSet};

use crate::dto::RelevanceQuery;
use crate::models::{Heat, HeatAssignment};

/// Workouts a division actually competed in, judged from its heats.
///
/// `None` means there are no heats at all, so nothing should be filtered. A
/// mixed heat counts only when one of its assignments belongs to the division;
/// a mixed heat nobody was assigned to counts for no one.
pub fn get_relevant_workout_ids(query: &RelevanceQuery) -> Option<BTreeSet<String>> {
    relevant_workout_ids(
        &query.heats,
        &query.mixed_heat_assignments,
        &query.division_id,
    )
}

pub(crate) fn relevant_workout_ids(
    heats: &[Heat],
    mixed_heat_assignments: &[HeatAssignment],
    division: &str,
) -> Option<BTreeSet<String>> {
    if heats.is_empty() {
        return None;
    }

    let mixed_heats_with_division: HashSet<&str> = mixed_heat_assignments
        .iter()
        .filter(|a| a.division_id.as_deref() == Some(division))
        .map(|a| a.heat_id.as_str())
        .collect();

    let relevant = heats
        .iter()
        .filter(|heat| match heat.division_id.as_deref() {
            Some(heat_division) => heat_division == division,
            None => mixed_heats_with_division.contains(heat.heat_id.as_str()),
        })
        .map(|heat| heat.track_workout_id.clone())
        .collect();

    Some(relevant)
}

/// Drops items whose workout is not in `relevant`. `None` keeps everything.
pub fn retain_relevant<T, F>(items: &mut Vec<T>, relevant: Option<&BTreeSet<String>>, workout_id: F)
where
    F: Fn(&T) -> &str,
{
    if let Some(relevant) = relevant {
        items.retain(|item| relevant.contains(workout_id(item)));
    }
}
