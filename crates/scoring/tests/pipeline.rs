use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use scoring::dto::{CompetitionRequest, LeaderboardRequest, RelevanceQuery};
use scoring::models::SetRow;
use scoring::{
    ScoreStatus, ScoringScheme, encode_rounds, get_competition_leaderboard,
    get_leaderboard_for_workout, get_relevant_workout_ids, parse_score,
};

fn request_json() -> serde_json::Value {
    serde_json::json!({
        "workout": {
            "workout_id": "fran",
            "scheme": "time-with-cap",
            "tiebreak_scheme": "reps",
            "time_cap_seconds": 600
        },
        "scaling_levels": [
            { "id": "lvl-rx", "label": "Rx", "position": 0 },
            { "id": "lvl-scaled", "label": "Scaled", "position": 1 }
        ],
        "results": [
            {
                "result_id": "r1",
                "athlete": { "user_id": "u1", "first_name": "Jordan", "last_name": "Lee" },
                "scaling_level_id": "lvl-scaled",
                "completed_at": "2025-03-01T09:00:00"
            },
            {
                "result_id": "r2",
                "athlete": { "user_id": "u2", "email": "casey@example.com" },
                "scaling_level_id": "lvl-rx",
                "as_rx": true,
                "status": "cap",
                "tiebreak_value": 3,
                "completed_at": "2025-03-01T09:10:00"
            },
            {
                "result_id": "r3",
                "athlete": { "user_id": "u3", "first_name": "Robin" },
                "scaling_level_id": "lvl-rx",
                "as_rx": true,
                "completed_at": "2025-03-01T09:20:00"
            },
            {
                "result_id": "r4",
                "athlete": { "user_id": "u4", "first_name": "Alex" },
                "scaling_level_id": "rx",
                "status": "dnf",
                "completed_at": "2025-03-01T09:30:00"
            },
            {
                "result_id": "r5",
                "athlete": { "user_id": "u5", "first_name": "Sam" },
                "scaling_level_id": "lvl-rx",
                "as_rx": true,
                "completed_at": "2025-03-01T09:40:00"
            }
        ]
    })
}

fn set_from_input(input: &str, scheme: ScoringScheme, cap: i64) -> SetRow {
    let parsed = parse_score(input, scheme, Some(cap), None);
    assert!(parsed.is_valid, "{} did not parse: {:?}", input, parsed.error);

    SetRow {
        set_number: 1,
        time: parsed.raw_value,
        time_capped: parsed.score_status == Some(ScoreStatus::Cap),
        ..Default::default()
    }
}

#[test]
fn test_parse_aggregate_rank() {
    let mut request: LeaderboardRequest =
        serde_json::from_value(request_json()).expect("request should deserialize");
    let scheme = request.workout.scheme;

    request.sets_by_result = HashMap::from([
        ("r1".to_string(), vec![set_from_input("3:12", scheme, 600)]),
        ("r2".to_string(), vec![set_from_input("cap", scheme, 600)]),
        ("r3".to_string(), vec![set_from_input("4:05.5", scheme, 600)]),
        ("r4".to_string(), vec![set_from_input("2:00", scheme, 600)]),
        (
            "r5".to_string(),
            vec![SetRow {
                set_number: 1,
                reps: Some(150),
                ..Default::default()
            }],
        ),
    ]);

    let entries = get_leaderboard_for_workout(&request);
    let summary: Vec<(&str, &str, Option<usize>)> = entries
        .iter()
        .map(|e| (e.user_name.as_str(), e.formatted_score.as_str(), e.rank))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Robin", "4:05.500", Some(1)),
            ("Sam", "150 reps (capped)", Some(2)),
            ("casey@example.com", "CAP (10:00)", Some(3)),
            ("Jordan Lee", "3:12", Some(4)),
            ("Alex", "DNF", None),
        ]
    );
    assert_eq!(entries[2].aggregated_score, Some(600_000));
    assert!(entries[2].is_capped_at_time);
    assert_eq!(entries[2].formatted_tiebreak.as_deref(), Some("3"));
    assert_eq!(entries[4].scaling_level_position, Some(1));
    assert_eq!(entries[4].scaling_level_label.as_deref(), Some("Rx"));
}

#[test]
fn test_multi_round_encoding_feeds_aggregate() {
    let encoded = encode_rounds(&["5+10", "6+2", "5+18"], ScoringScheme::RoundsReps, None, None);

    assert!(encoded.report.is_valid());
    assert_eq!(encoded.aggregated.value, Some(600_002));
    assert_eq!(
        encoded.aggregated.formatted(ScoringScheme::RoundsReps, None),
        "6+2"
    );
}

#[test]
fn test_relevance_query_from_json() {
    let query: RelevanceQuery = serde_json::from_value(serde_json::json!({
        "heats": [
            { "heat_id": "h1", "track_workout_id": "w1", "division_id": "open" },
            { "heat_id": "h2", "track_workout_id": "w2", "division_id": null },
            { "heat_id": "h3", "track_workout_id": "w3", "division_id": null }
        ],
        "mixed_heat_assignments": [
            { "heat_id": "h2", "division_id": "masters" }
        ],
        "division_id": "masters"
    }))
    .expect("query should deserialize");

    let relevant = get_relevant_workout_ids(&query).expect("heats exist");
    assert_eq!(relevant.into_iter().collect::<Vec<_>>(), vec!["w2".to_string()]);
}

#[test]
fn test_competition_p_scores_from_json() {
    let athletes = [
        ("u1", "Ana", 300),
        ("u2", "Ben", 330),
        ("u3", "Cy", 360),
        ("u4", "Dee", 480),
    ];
    let results: Vec<serde_json::Value> = athletes
        .iter()
        .map(|(user_id, name, _)| {
            serde_json::json!({
                "result_id": format!("r-{}", user_id),
                "athlete": { "user_id": user_id, "first_name": name },
                "scaling_level_id": "rx",
                "as_rx": true,
                "completed_at": "2025-05-10T10:00:00"
            })
        })
        .collect();
    let sets: serde_json::Map<String, serde_json::Value> = athletes
        .iter()
        .map(|(user_id, _, seconds)| {
            (
                format!("r-{}", user_id),
                serde_json::json!([{ "set_number": 1, "time": seconds * 1000 }]),
            )
        })
        .collect();
    let registrations: Vec<serde_json::Value> = athletes
        .iter()
        .map(|(user_id, name, _)| {
            serde_json::json!({
                "athlete": { "user_id": user_id, "first_name": name },
                "division_id": "open"
            })
        })
        .collect();

    let request: CompetitionRequest = serde_json::from_value(serde_json::json!({
        "events": [{
            "track_workout_id": "ev1",
            "name": "Sprint",
            "leaderboard": {
                "workout": { "workout_id": "sprint", "scheme": "time" },
                "results": results,
                "sets_by_result": sets
            }
        }],
        "registrations": registrations,
        "scoring": {
            "algorithm": { "type": "p_score", "allow_negatives": false, "median_field": "all" }
        }
    }))
    .expect("competition request should deserialize");

    let entries = get_competition_leaderboard(&request).expect("valid scoring config");
    let totals: Vec<(&str, usize, Decimal)> = entries
        .iter()
        .map(|e| (e.user_name.as_str(), e.overall_rank, e.total_points))
        .collect();
    let points = |s: &str| Decimal::from_str(s).unwrap();

    // median of 330 and 360 is 345, so 45 seconds is worth 50 points
    assert_eq!(
        totals,
        vec![
            ("Ana", 1, points("100")),
            ("Ben", 2, points("66.67")),
            ("Cy", 3, points("33.33")),
            ("Dee", 4, points("0")),
        ]
    );
    assert_eq!(entries[3].event_results[0].formatted_score, "8:00");
    assert_eq!(entries[3].event_results[0].rank, Some(4));
}
