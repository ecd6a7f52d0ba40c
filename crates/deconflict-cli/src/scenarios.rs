//! Pre-defined mission schedules for demos and testing.
//!
//! The first mission of every scenario is the default primary mission.
//! Coordinates are meters in a local frame; timestamps are seconds.

use clap::ValueEnum;
use deconflict_core::{MissionPlan, Waypoint};
use std::f64::consts::PI;

/// 2025-04-02T10:00:00Z, start of the demo schedule.
const DEMO_START_S: f64 = 1_743_588_000.0;

const SCENARIO_OFFSET_M: f64 = 300.0;
const SCENARIO_ALTITUDE_M: f64 = 50.0;
const SCENARIO_SPEED_MPS: f64 = 10.0;

/// Available schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioType {
    /// Sample traffic around a user-supplied mission
    Demo,
    /// Two drones crossing at the same point and time
    Crossing,
    /// Two drones flying parallel tracks 100 m apart
    Parallel,
    /// Four drones converging on a central point
    Converging,
}

/// A named set of missions.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub missions: Vec<MissionPlan>,
}

pub fn scenario(kind: ScenarioType) -> Scenario {
    match kind {
        ScenarioType::Demo => create_demo_scenario(),
        ScenarioType::Crossing => create_crossing_scenario(),
        ScenarioType::Parallel => create_parallel_scenario(),
        ScenarioType::Converging => create_converging_scenario(),
    }
}

fn at(minute: u32, second: u32) -> f64 {
    DEMO_START_S + f64::from(minute * 60 + second)
}

/// Straight flight from `start` to `end` at constant speed, departing at `depart_s`.
fn linear_mission(
    id: &str,
    start: (f64, f64),
    end: (f64, f64),
    speed_mps: f64,
    depart_s: f64,
) -> MissionPlan {
    let length_m = (end.0 - start.0).hypot(end.1 - start.1);
    MissionPlan::new(
        id,
        vec![
            Waypoint::new(start.0, start.1, SCENARIO_ALTITUDE_M, depart_s),
            Waypoint::new(end.0, end.1, SCENARIO_ALTITUDE_M, depart_s + length_m / speed_mps),
        ],
    )
}

/// Point at `distance_m` from the origin along `bearing_rad` (0 = north, clockwise).
fn offset_by_bearing(distance_m: f64, bearing_rad: f64) -> (f64, f64) {
    (distance_m * bearing_rad.sin(), distance_m * bearing_rad.cos())
}

/// Sample traffic: a primary mission plus three scheduled drones.
///
/// Drone2 flies head-on into the primary mission around 10:01.
pub fn create_demo_scenario() -> Scenario {
    let primary = MissionPlan::new(
        "Drone1",
        vec![
            Waypoint::new(0.0, 100.0, 15.0, at(0, 0)),
            Waypoint::new(100.0, 100.0, 15.0, at(1, 0)),
            Waypoint::new(200.0, 100.0, 15.0, at(2, 0)),
        ],
    );

    let drone2 = MissionPlan::new(
        "Drone2",
        vec![
            Waypoint::new(200.0, 100.0, 15.0, at(0, 30)),
            Waypoint::new(100.0, 100.0, 15.0, at(1, 0)),
            Waypoint::new(0.0, 100.0, 15.0, at(2, 0)),
            Waypoint::new(100.0, 100.0, 15.0, at(3, 0)),
        ],
    );

    let drone3 = MissionPlan::new(
        "Drone3",
        vec![
            Waypoint::new(50.0, 0.0, 12.0, at(0, 0)),
            Waypoint::new(50.0, 150.0, 12.0, at(2, 0)),
            Waypoint::new(150.0, 150.0, 12.0, at(4, 0)),
        ],
    );

    let drone4 = MissionPlan::new(
        "Drone4",
        vec![
            Waypoint::new(0.0, 200.0, 20.0, at(1, 0)),
            Waypoint::new(100.0, 200.0, 20.0, at(3, 0)),
            Waypoint::new(200.0, 200.0, 20.0, at(5, 0)),
        ],
    );

    Scenario {
        name: "demo".to_string(),
        missions: vec![primary, drone2, drone3, drone4],
    }
}

/// Two drones on collision course (crossing at the origin).
///
/// - DRONE001: flying west to east
/// - DRONE002: flying south to north
pub fn create_crossing_scenario() -> Scenario {
    let west = offset_by_bearing(SCENARIO_OFFSET_M, 1.5 * PI);
    let east = offset_by_bearing(SCENARIO_OFFSET_M, 0.5 * PI);
    let south = offset_by_bearing(SCENARIO_OFFSET_M, PI);
    let north = offset_by_bearing(SCENARIO_OFFSET_M, 0.0);

    Scenario {
        name: "crossing".to_string(),
        missions: vec![
            linear_mission("DRONE001", west, east, SCENARIO_SPEED_MPS, 0.0),
            linear_mission("DRONE002", south, north, SCENARIO_SPEED_MPS, 0.0),
        ],
    }
}

/// Two drones flying parallel tracks (no conflict).
pub fn create_parallel_scenario() -> Scenario {
    let separation_m = 100.0;

    Scenario {
        name: "parallel".to_string(),
        missions: vec![
            linear_mission(
                "DRONE001",
                (-SCENARIO_OFFSET_M, 0.0),
                (SCENARIO_OFFSET_M, 0.0),
                SCENARIO_SPEED_MPS,
                0.0,
            ),
            linear_mission(
                "DRONE002",
                (-SCENARIO_OFFSET_M, separation_m),
                (SCENARIO_OFFSET_M, separation_m),
                SCENARIO_SPEED_MPS,
                0.0,
            ),
        ],
    }
}

/// Four drones converging on the origin from the cardinal directions.
pub fn create_converging_scenario() -> Scenario {
    let bearings: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

    let missions = bearings
        .iter()
        .enumerate()
        .map(|(i, bearing)| {
            let start = offset_by_bearing(SCENARIO_OFFSET_M, bearing.to_radians());
            linear_mission(&format!("DRONE{:03}", i + 1), start, (0.0, 0.0), 8.0, 0.0)
        })
        .collect();

    Scenario {
        name: "converging".to_string(),
        missions,
    }
}
