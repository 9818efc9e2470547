//! End-to-end pipeline tests: JSON records in, resolved mission out.

use deconflict_core::{
    scan_for_conflicts, FlightSchedule, Mission, ResolutionEngine, Suggestion,
    ConflictSolution,
};

fn primary_mission() -> Mission {
    serde_json::from_value(serde_json::json!({
        "waypoints": [
            {"x": 0.0, "y": 0.0, "z": 100.0, "time": 1, "timestamp": "2024-06-01T10:10:00Z"},
            {"x": 200.0, "y": 0.0, "z": 100.0, "time": 2, "timestamp": "2024-06-01T10:20:00Z"}
        ],
        "time_window": {"start": "2024-06-01T10:00:00Z", "end": "2024-06-01T12:00:00Z"}
    }))
    .unwrap()
}

fn schedule() -> FlightSchedule {
    serde_json::from_value(serde_json::json!({
        "flights": [
            {
                "drone_id": "DRONE-7",
                "waypoints": [{"x": 0.0, "y": 0.0, "z": 100.0, "time": 1}],
                "time_window": {"start": "2024-06-01T10:00:00Z", "end": "2024-06-01T11:00:00Z"}
            },
            {
                "drone_id": "DRONE-9",
                "waypoints": [{"x": 500.0, "y": 500.0}],
                "time_window": {"start": "2024-06-01T10:00:00Z", "end": "2024-06-01T11:00:00Z"}
            }
        ]
    }))
    .unwrap()
}

#[test]
fn detection_finds_the_colocated_waypoint_once() {
    let conflicts = scan_for_conflicts(&primary_mission(), &schedule().flights);
    assert_eq!(conflicts.len(), 1);

    let conflict = &conflicts[0];
    assert_eq!(conflict.location, "(0, 0, 100)");
    assert_eq!(conflict.involved_flights, ["DRONE-7", "primary"]);
    // Both detectors fire; the deduplicated record keeps a time.
    assert!(conflict.time.is_some());
}

#[test]
fn conflict_record_serializes_to_the_interchange_shape() {
    let conflicts = scan_for_conflicts(&primary_mission(), &schedule().flights);
    let encoded = serde_json::to_value(&conflicts[0]).unwrap();
    assert_eq!(encoded["location"], "(0, 0, 100)");
    assert!(encoded["time"].is_string());
    assert_eq!(encoded["involved_flights"][1], "primary");
}

#[test]
fn resolution_applies_all_three_edit_types_with_minimums_enforced() {
    let primary = primary_mission();
    let conflicts = scan_for_conflicts(&primary, &schedule().flights);
    assert_eq!(conflicts.len(), 1);

    let suggestion: Suggestion = serde_json::from_value(serde_json::json!({
        "altitude": "105 meters",
        "delay": "2 minutes",
        "path": "(5, 5)",
        "reason": "Climb above the crossing traffic."
    }))
    .unwrap();
    let solutions: Vec<ConflictSolution> = conflicts
        .into_iter()
        .map(|conflict| ConflictSolution {
            conflict,
            suggestion: suggestion.clone(),
        })
        .collect();

    let outcome = ResolutionEngine::default()
        .resolve(&primary, &solutions)
        .unwrap();

    let edited = &outcome.mission.waypoints[0];
    // 105 is within 20 of the conflict altitude: clamped to 120.
    assert_eq!(edited.z, 120.0);
    // (5, 5) is ~7.07 from the conflict: scaled out to exactly 10.
    let horizontal = (edited.x * edited.x + edited.y * edited.y).sqrt();
    assert!((horizontal - 10.0).abs() < 1e-9);
    // 2 minutes clamps to 5, and the window shifts with it.
    assert_eq!(
        edited.timestamp.unwrap().to_rfc3339(),
        "2024-06-01T10:15:00+00:00"
    );
    let window = outcome.mission.time_window.unwrap();
    assert_eq!(window.start.to_rfc3339(), "2024-06-01T10:05:00+00:00");

    // The second waypoint is outside the affected radius; the only
    // change it sees is the smoothing pass halving the 20-unit climb.
    assert_eq!(outcome.mission.waypoints[1].z, 110.0);
    assert!(outcome.unresolved.is_empty());

    // The original mission is never mutated.
    assert_eq!(primary.waypoints[0].z, 100.0);
}

#[test]
fn conflict_free_mission_round_trips_unchanged() {
    let primary = primary_mission();
    let far_schedule: FlightSchedule = serde_json::from_value(serde_json::json!({
        "flights": [{
            "drone_id": "DRONE-9",
            "waypoints": [{"x": 500.0, "y": 500.0, "z": 0.0}],
            "time_window": {"start": "2024-06-01T10:00:00Z", "end": "2024-06-01T11:00:00Z"}
        }]
    }))
    .unwrap();

    let conflicts = scan_for_conflicts(&primary, &far_schedule.flights);
    assert!(conflicts.is_empty());

    let outcome = ResolutionEngine::default().resolve(&primary, &[]).unwrap();
    assert_eq!(outcome.mission, primary);
}
