//! Event placement to points.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::dto::{EventPoints, EventScore};
use crate::models::{
    CompetitionScoring, Direction, MedianField, PScoreConfig, PointsAlgorithm, ScoreStatus,
    StatusRule,
};

const WINNER_TAKES_MORE: [i64; 28] = [
    100, 85, 75, 67, 60, 54, 49, 45, 41, 38, 35, 32, 30, 28, 26, 24, 22, 20, 18, 16, 14, 12, 10,
    8, 6, 4, 2, 1,
];

const P_SCORE_WINNER: i64 = 100;
const P_SCORE_MEDIAN: i64 = 50;

pub fn fixed_step_points(place: usize, step: i64, first_place_points: i64) -> Decimal {
    let behind = i64::try_from(place.saturating_sub(1)).unwrap_or(i64::MAX);
    Decimal::from(first_place_points.saturating_sub(behind.saturating_mul(step)).max(0))
}

/// Table lookup; every place past the table still earns one point.
pub fn winner_takes_more_points(place: usize) -> Decimal {
    let points = place
        .checked_sub(1)
        .and_then(|idx| WINNER_TAKES_MORE.get(idx))
        .copied()
        .unwrap_or(1);
    Decimal::from(points)
}

pub fn even_spread_points(place: usize, field_size: usize) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    if field_size <= 1 {
        return hundred;
    }

    let step = hundred / Decimal::from(field_size - 1);
    let points = hundred - Decimal::from(place.saturating_sub(1)) * step;
    points
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
}

/// P-scores for a field of finishers, in input order.
///
/// The best value scores 100 and the median scores 50; everything else is
/// placed linearly on that scale and rounded to two decimals. A field whose
/// median equals the winner falls back to the median of all values. If that
/// is still the winning value, the winners score 100 and everyone else 0.
pub fn p_scores(values: &[i64], direction: Direction, config: &PScoreConfig) -> Vec<Decimal> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| direction.compare(*a, *b));
    let Some(&best) = sorted.first() else {
        return Vec::new();
    };

    let best = Decimal::from(best);
    let spread = match config.median_field {
        MedianField::TopHalf => {
            let spread = (top_half_median(&sorted) - best).abs();
            if spread.is_zero() {
                (full_median(&sorted) - best).abs()
            } else {
                spread
            }
        }
        MedianField::All => (full_median(&sorted) - best).abs(),
    };

    values
        .iter()
        .map(|value| {
            let distance = (Decimal::from(*value) - best).abs();
            let score = if distance.is_zero() {
                Decimal::from(P_SCORE_WINNER)
            } else if spread.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::from(P_SCORE_WINNER) - distance * Decimal::from(P_SCORE_MEDIAN) / spread
            };
            let score = score.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            if config.allow_negatives {
                score
            } else {
                score.max(Decimal::ZERO)
            }
        })
        .collect()
}

/// The last value in the top half of an already sorted field.
fn top_half_median(sorted: &[i64]) -> Decimal {
    let idx = sorted.len().div_ceil(2).saturating_sub(1);
    sorted.get(idx).copied().map(Decimal::from).unwrap_or_default()
}

fn full_median(sorted: &[i64]) -> Decimal {
    let mid = sorted.len() / 2;
    match (sorted.len() % 2, sorted.get(mid)) {
        (_, None) => Decimal::ZERO,
        (1, Some(value)) => Decimal::from(*value),
        (_, Some(upper)) => {
            let lower = sorted.get(mid - 1).copied().unwrap_or(*upper);
            (Decimal::from(lower) + Decimal::from(*upper)) / Decimal::TWO
        }
    }
}

/// Points for every placed athlete of one event.
///
/// Athletes with a rank are scored by the configured algorithm. DNF rows are
/// placed right after the last rank and DNS rows after them, each scored per
/// the status rules. Rows with neither a rank nor a DNS/DNF status are left
/// out. `multiplier` is a percentage applied last.
pub fn score_event(
    scores: &[EventScore],
    direction: Direction,
    scoring: &CompetitionScoring,
    multiplier: i64,
) -> Vec<EventPoints> {
    let mut ranked: Vec<(&EventScore, usize)> = scores
        .iter()
        .filter_map(|score| score.rank.map(|rank| (score, rank)))
        .collect();
    ranked.sort_by_key(|(_, rank)| *rank);

    let field_size = ranked.len();
    let last_rank = ranked.last().map(|(_, rank)| *rank).unwrap_or(0);
    let algorithm = &scoring.algorithm;

    let p_scores = match algorithm {
        PointsAlgorithm::PScore(config) => Some(ranked_p_scores(&ranked, direction, config)),
        _ => None,
    };
    let worst_p_score = p_scores
        .as_ref()
        .and_then(|scores| scores.values().min().copied())
        .unwrap_or_default();

    let placement = |place: usize| match algorithm {
        PointsAlgorithm::FixedStep {
            step,
            first_place_points,
        } => fixed_step_points(place, *step, *first_place_points),
        PointsAlgorithm::WinnerTakesMore => winner_takes_more_points(place),
        PointsAlgorithm::EvenSpread => even_spread_points(place, field_size),
        PointsAlgorithm::PScore(_) => worst_p_score,
    };

    let mut points: Vec<EventPoints> = ranked
        .iter()
        .map(|(score, rank)| {
            let base = match &p_scores {
                Some(p_scores) => p_scores
                    .get(score.user_id.as_str())
                    .copied()
                    .unwrap_or(worst_p_score),
                None => placement(*rank),
            };
            EventPoints {
                user_id: score.user_id.clone(),
                rank: *rank,
                points: base,
            }
        })
        .collect();

    let has_dnf = scoring.status_handling.dnf != StatusRule::Exclude
        && scores
            .iter()
            .any(|s| s.rank.is_none() && s.status == Some(ScoreStatus::Dnf));
    let dnf_place = last_rank + 1;
    let dns_place = if has_dnf { dnf_place + 1 } else { dnf_place };

    for status in [ScoreStatus::Dnf, ScoreStatus::Dns] {
        let (rule, place) = match status {
            ScoreStatus::Dnf => (scoring.status_handling.dnf, dnf_place),
            _ => (scoring.status_handling.dns, dns_place),
        };
        let base = match rule {
            StatusRule::LastPlace => placement(place),
            StatusRule::Zero => Decimal::ZERO,
            StatusRule::Exclude => continue,
        };

        points.extend(
            scores
                .iter()
                .filter(|s| s.rank.is_none() && s.status == Some(status))
                .map(|s| EventPoints {
                    user_id: s.user_id.clone(),
                    rank: place,
                    points: base,
                }),
        );
    }

    let precision = algorithm.points_precision();
    for entry in &mut points {
        entry.points = apply_multiplier(entry.points, multiplier, precision);
    }
    points
}

/// P-scores of the finishers keyed by user id. Capped athletes are not in
/// the map; callers give them the lowest P-score of the field.
fn ranked_p_scores<'a>(
    ranked: &[(&'a EventScore, usize)],
    direction: Direction,
    config: &PScoreConfig,
) -> HashMap<&'a str, Decimal> {
    let finishers: Vec<(&'a str, i64)> = ranked
        .iter()
        .map(|&(score, _)| score)
        .filter(|score| !score.is_time_capped)
        .filter_map(|score| score.value.map(|value| (score.user_id.as_str(), value)))
        .collect();
    let values: Vec<i64> = finishers.iter().map(|(_, value)| *value).collect();

    finishers
        .iter()
        .map(|(user_id, _)| *user_id)
        .zip(p_scores(&values, direction, config))
        .collect()
}

pub fn apply_multiplier(points: Decimal, multiplier: i64, precision: u32) -> Decimal {
    (points * Decimal::from(multiplier) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use rstest::rstest;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn finisher(user_id: &str, rank: usize, value: i64) -> EventScore {
        EventScore {
            user_id: user_id.to_string(),
            rank: Some(rank),
            value: Some(value),
            is_time_capped: false,
            status: Some(ScoreStatus::Scored),
        }
    }

    fn unplaced(user_id: &str, status: ScoreStatus) -> EventScore {
        EventScore {
            user_id: user_id.to_string(),
            rank: None,
            value: None,
            is_time_capped: false,
            status: Some(status),
        }
    }

    fn p_score_scoring(config: PScoreConfig) -> CompetitionScoring {
        CompetitionScoring {
            algorithm: PointsAlgorithm::PScore(config),
            ..Default::default()
        }
    }

    fn summary(points: &[EventPoints]) -> Vec<(&str, usize, Decimal)> {
        points
            .iter()
            .map(|p| (p.user_id.as_str(), p.rank, p.points))
            .collect()
    }

    #[rstest]
    #[case(1, 100)]
    #[case(2, 95)]
    #[case(10, 55)]
    #[case(21, 0)]
    #[case(40, 0)]
    fn test_fixed_step_defaults(#[case] place: usize, #[case] expected: i64) {
        assert_eq!(fixed_step_points(place, 5, 100), Decimal::from(expected));
    }

    #[test]
    fn test_fixed_step_custom_step() {
        assert_eq!(fixed_step_points(3, 10, 100), d("80"));
        assert_eq!(fixed_step_points(2, 3, 50), d("47"));
    }

    #[rstest]
    #[case(1, 100)]
    #[case(2, 85)]
    #[case(3, 75)]
    #[case(28, 1)]
    #[case(29, 1)]
    #[case(100, 1)]
    fn test_winner_takes_more(#[case] place: usize, #[case] expected: i64) {
        assert_eq!(winner_takes_more_points(place), Decimal::from(expected));
    }

    #[rstest]
    #[case(1, 1, 100)]
    #[case(1, 5, 100)]
    #[case(2, 5, 75)]
    #[case(5, 5, 0)]
    #[case(2, 4, 67)]
    #[case(3, 4, 33)]
    #[case(6, 5, 0)]
    fn test_even_spread(#[case] place: usize, #[case] field: usize, #[case] expected: i64) {
        assert_eq!(even_spread_points(place, field), Decimal::from(expected));
    }

    #[test]
    fn test_p_scores_for_time() {
        let values = [300_000, 330_000, 360_000, 400_000, 420_000, 480_000];
        let scores = p_scores(&values, Direction::LowerIsBetter, &PScoreConfig::default());
        assert_eq!(
            scores,
            vec![d("100"), d("75"), d("50"), d("16.67"), d("0"), d("-50")]
        );
    }

    #[test]
    fn test_p_scores_round_to_two_decimals() {
        let values = [300, 340, 360, 380, 400, 420];
        let scores = p_scores(&values, Direction::LowerIsBetter, &PScoreConfig::default());
        assert_eq!(scores[1], d("66.67"));
    }

    #[test]
    fn test_p_scores_for_higher_is_better() {
        let values = [150, 200, 100, 180];
        let scores = p_scores(&values, Direction::HigherIsBetter, &PScoreConfig::default());
        assert_eq!(scores, vec![d("-25"), d("100"), d("-150"), d("50")]);
    }

    #[test]
    fn test_p_scores_clamp_when_negatives_disallowed() {
        let config = PScoreConfig {
            allow_negatives: false,
            ..Default::default()
        };
        let scores = p_scores(&[300, 330, 360, 480], Direction::LowerIsBetter, &config);
        assert_eq!(scores[3], Decimal::ZERO);
    }

    #[test]
    fn test_p_scores_median_of_all() {
        let config = PScoreConfig {
            median_field: MedianField::All,
            ..Default::default()
        };
        // median of 300, 330, 390, 400 is 360
        let scores = p_scores(&[300, 330, 390, 400], Direction::LowerIsBetter, &config);
        assert_eq!(scores[1], d("75"));
    }

    #[test]
    fn test_p_scores_edge_fields() {
        let config = PScoreConfig::default();
        assert!(p_scores(&[], Direction::LowerIsBetter, &config).is_empty());
        assert_eq!(
            p_scores(&[420], Direction::LowerIsBetter, &config),
            vec![d("100")]
        );
        assert_eq!(
            p_scores(&[300, 300, 300], Direction::LowerIsBetter, &config),
            vec![d("100"); 3]
        );
        assert_eq!(
            p_scores(&[300, 300, 360, 400], Direction::LowerIsBetter, &config),
            vec![d("100"), d("100"), d("0"), d("-66.67")]
        );
    }

    #[test]
    fn test_two_finishers_fall_back_to_full_median() {
        let scores = p_scores(&[300, 360], Direction::LowerIsBetter, &PScoreConfig::default());
        assert_eq!(scores, vec![d("100"), d("0")]);
    }

    #[test]
    fn test_score_event_fixed_step_with_statuses() {
        let scores = vec![
            finisher("a", 1, 300),
            finisher("b", 2, 330),
            unplaced("dns", ScoreStatus::Dns),
            finisher("c", 2, 330),
            unplaced("dnf", ScoreStatus::Dnf),
        ];

        let points = score_event(
            &scores,
            Direction::LowerIsBetter,
            &CompetitionScoring::default(),
            100,
        );
        assert_eq!(
            summary(&points),
            vec![
                ("a", 1, d("100")),
                ("b", 2, d("95")),
                ("c", 2, d("95")),
                ("dnf", 3, d("90")),
                ("dns", 4, d("0")),
            ]
        );
    }

    #[test]
    fn test_score_event_excludes_and_zeroes() {
        let mut scoring = CompetitionScoring::default();
        scoring.status_handling.dnf = StatusRule::Zero;
        scoring.status_handling.dns = StatusRule::Exclude;

        let scores = vec![
            finisher("a", 1, 300),
            unplaced("dnf", ScoreStatus::Dnf),
            unplaced("dns", ScoreStatus::Dns),
            EventScore {
                status: None,
                ..unplaced("empty", ScoreStatus::Scored)
            },
        ];

        let points = score_event(&scores, Direction::LowerIsBetter, &scoring, 100);
        assert_eq!(
            summary(&points),
            vec![("a", 1, d("100")), ("dnf", 2, d("0"))]
        );
    }

    #[test]
    fn test_score_event_p_score_statuses() {
        let mut capped = finisher("capped", 5, 600_000);
        capped.is_time_capped = true;
        let scores = vec![
            finisher("a", 1, 300),
            finisher("b", 2, 330),
            finisher("c", 3, 360),
            finisher("d", 4, 390),
            capped,
            unplaced("dnf", ScoreStatus::Dnf),
            unplaced("dns", ScoreStatus::Dns),
        ];

        let points = score_event(
            &scores,
            Direction::LowerIsBetter,
            &p_score_scoring(PScoreConfig::default()),
            100,
        );
        assert_eq!(
            summary(&points),
            vec![
                ("a", 1, d("100")),
                ("b", 2, d("50")),
                ("c", 3, d("0")),
                ("d", 4, d("-50")),
                ("capped", 5, d("-50")),
                ("dnf", 6, d("-50")),
                ("dns", 7, d("0")),
            ]
        );
    }

    #[test]
    fn test_multiplier_rounds_per_algorithm() {
        assert_eq!(apply_multiplier(d("95"), 150, 0), d("143"));
        assert_eq!(apply_multiplier(d("95"), 200, 0), d("190"));
        assert_eq!(apply_multiplier(d("66.67"), 150, 2), d("100.01"));
        assert_eq!(apply_multiplier(d("100"), 50, 0), d("50"));

        let points = score_event(
            &[finisher("a", 1, 300), finisher("b", 2, 330)],
            Direction::LowerIsBetter,
            &CompetitionScoring::default(),
            200,
        );
        assert_eq!(points[1].points, d("190"));
    }
}
