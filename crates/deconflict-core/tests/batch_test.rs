//! End-to-end checks of the public deconfliction API.

use deconflict_core::{
    check_all, detect_conflicts, CheckError, ConflictDetector, ConflictGrouping, Mission,
    MissionPlan, SeparationRules, Waypoint,
};

fn waypoints(points: &[(f64, f64, f64, f64)]) -> Vec<Waypoint> {
    points
        .iter()
        .map(|&(x, y, z, t)| Waypoint::new(x, y, z, t))
        .collect()
}

/// Primary mission flying east along y = 100 at constant altitude.
fn primary() -> Mission {
    Mission::new(
        "Primary",
        waypoints(&[
            (0.0, 100.0, 15.0, 0.0),
            (100.0, 100.0, 15.0, 60.0),
            (200.0, 100.0, 15.0, 120.0),
        ]),
    )
    .unwrap()
}

fn schedule() -> Vec<MissionPlan> {
    vec![
        // Head-on along the same corridor.
        MissionPlan::new(
            "Drone2",
            waypoints(&[(200.0, 100.0, 15.0, 30.0), (100.0, 100.0, 15.0, 60.0)]),
        ),
        // Crosses the corridor while the primary is far away.
        MissionPlan::new(
            "Drone3",
            waypoints(&[(50.0, 0.0, 12.0, 0.0), (50.0, 150.0, 12.0, 120.0)]),
        ),
        // High and far away.
        MissionPlan::new(
            "Drone4",
            waypoints(&[(0.0, 200.0, 20.0, 60.0), (200.0, 200.0, 20.0, 180.0)]),
        ),
    ]
}

#[test]
fn test_head_on_traffic_conflicts_at_meeting_point() {
    let conflicts = check_all(&primary(), &schedule(), 20.0, 1.0).unwrap();

    assert!(!conflicts.is_empty());
    assert!(conflicts.iter().all(|c| c.mission_b.as_str() == "Drone2"));

    let closest = conflicts
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .unwrap();
    assert_eq!(closest.time, 60.0);
    assert!(closest.distance < 1e-9);
    assert!((closest.location().x - 100.0).abs() < 1e-9);
}

#[test]
fn test_no_conflicts_with_small_safety_distance_and_offset_traffic() {
    let others = vec![MissionPlan::new(
        "Offset",
        waypoints(&[(0.0, 110.0, 15.0, 0.0), (200.0, 110.0, 15.0, 120.0)]),
    )];
    assert!(check_all(&primary(), &others, 5.0, 1.0).unwrap().is_empty());
    assert_eq!(check_all(&primary(), &others, 15.0, 1.0).unwrap().len(), 122);
}

#[test]
fn test_invalid_schedule_entry_is_rejected() {
    let mut others = schedule();
    others.push(MissionPlan::new(
        "Hover",
        waypoints(&[(0.0, 0.0, 10.0, 5.0)]),
    ));

    let err = check_all(&primary(), &others, 20.0, 1.0).unwrap_err();
    assert!(matches!(err, CheckError::InvalidMission { index: 3, ref id, .. } if id == "Hover"));
    assert!(err.to_string().contains("Hover"));
}

#[test]
fn test_runs_summarise_per_sample_conflicts() {
    let primary = primary();
    let others: Vec<Mission> = schedule()
        .into_iter()
        .map(|plan| plan.validate().unwrap())
        .collect();

    let rules = SeparationRules::new(20.0, 1.0).unwrap();
    let samples = ConflictDetector::new(rules).unwrap().check_all(&primary, &others);
    let runs = ConflictDetector::new(rules.with_grouping(ConflictGrouping::Runs))
        .unwrap()
        .check_all(&primary, &others);

    assert!(runs.len() <= samples.len());
    for run in &runs {
        let covered: Vec<_> = samples
            .iter()
            .filter(|s| {
                s.mission_b == run.mission_b
                    && s.segment_a == run.segment_a
                    && s.segment_b == run.segment_b
                    && s.time >= run.start_time
                    && s.time <= run.end_time
            })
            .collect();
        assert!(!covered.is_empty());
        let min = covered
            .iter()
            .map(|s| s.distance)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(run.distance, min);
    }
}

#[test]
fn test_detection_is_symmetric_in_distance() {
    let a = primary();
    let b = schedule().remove(0).validate().unwrap();

    let ab = detect_conflicts(&a, &b, 20.0, 0.5).unwrap();
    let ba = detect_conflicts(&b, &a, 20.0, 0.5).unwrap();

    let mut times_ab: Vec<f64> = ab.iter().map(|c| c.time).collect();
    let mut times_ba: Vec<f64> = ba.iter().map(|c| c.time).collect();
    times_ab.sort_by(f64::total_cmp);
    times_ba.sort_by(f64::total_cmp);
    assert_eq!(times_ab, times_ba);
}

#[test]
fn test_conflict_serializes_for_reporting() {
    let a = primary();
    let b = schedule().remove(0).validate().unwrap();
    let conflicts = detect_conflicts(&a, &b, 20.0, 5.0).unwrap();

    let json = serde_json::to_value(&conflicts[0]).unwrap();
    assert_eq!(json["mission_a"], "Primary");
    assert_eq!(json["mission_b"], "Drone2");
    assert!(json["position_a"]["x"].is_number());
    assert!(json["distance"].is_number());
}
