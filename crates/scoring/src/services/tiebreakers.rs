use std::cmp::Ordering;

use crate::dto::{RankedStanding, Standing};
use crate::error::Result;
use crate::models::{TiebreakMethod, TiebreakerConfig};

/// Overall ranking by total points, highest first.
///
/// Equal totals go to the primary tiebreaker, then the secondary. Athletes
/// still level share a rank (1, 1, 3) and keep their input order.
pub fn apply_tiebreakers(
    standings: &[Standing],
    config: &TiebreakerConfig,
) -> Result<Vec<RankedStanding>> {
    config.validate()?;

    let compare = |a: &Standing, b: &Standing| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| compare_by(config.primary, a, b, config))
            .then_with(|| {
                config
                    .secondary
                    .map_or(Ordering::Equal, |method| compare_by(method, a, b, config))
            })
    };

    let mut ordered: Vec<&Standing> = standings.iter().collect();
    ordered.sort_by(|a, b| compare(*a, *b));

    let mut ranked: Vec<RankedStanding> = Vec::with_capacity(ordered.len());
    for (idx, &standing) in ordered.iter().enumerate() {
        let rank = match (idx.checked_sub(1).map(|prev| ordered[prev]), ranked.last()) {
            (Some(prev), Some(prev_ranked)) if compare(prev, standing) == Ordering::Equal => {
                prev_ranked.rank
            }
            _ => idx + 1,
        };
        ranked.push(RankedStanding {
            user_id: standing.user_id.clone(),
            total_points: standing.total_points,
            rank,
        });
    }

    Ok(ranked)
}

fn compare_by(
    method: TiebreakMethod,
    a: &Standing,
    b: &Standing,
    config: &TiebreakerConfig,
) -> Ordering {
    match method {
        TiebreakMethod::None => Ordering::Equal,
        TiebreakMethod::Countback => countback(a, b),
        TiebreakMethod::HeadToHead => config
            .head_to_head_event_id
            .as_deref()
            .map_or(Ordering::Equal, |event_id| head_to_head(a, b, event_id)),
    }
}

/// More first places wins; if level, more second places, and so on down to
/// the worst placement either athlete holds.
fn countback(a: &Standing, b: &Standing) -> Ordering {
    let worst = a
        .placements
        .values()
        .chain(b.placements.values())
        .copied()
        .max()
        .unwrap_or(0);

    (1..=worst)
        .map(|place| {
            let count = |s: &Standing| s.placements.values().filter(|p| **p == place).count();
            count(b).cmp(&count(a))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Better placement in the chosen event wins. A missing placement loses to
/// any placement.
fn head_to_head(a: &Standing, b: &Standing, event_id: &str) -> Ordering {
    match (a.placements.get(event_id), b.placements.get(event_id)) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
