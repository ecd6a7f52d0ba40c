//! Core data models for mission deconfliction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MissionError;
use crate::geometry::{self, Position};

/// Identifier of a drone mission.
///
/// Accepts either a JSON string or a JSON integer and always serializes
/// back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawMissionId")]
pub struct MissionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMissionId {
    Text(String),
    Number(i64),
}

impl From<RawMissionId> for MissionId {
    fn from(raw: RawMissionId) -> Self {
        match raw {
            RawMissionId::Text(text) => Self(text),
            RawMissionId::Number(n) => Self(n.to_string()),
        }
    }
}

impl MissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MissionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A timestamped point on a planned path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Seconds, either elapsed or since the Unix epoch.
    pub timestamp: f64,
}

impl Waypoint {
    pub const fn new(x: f64, y: f64, z: f64, timestamp: f64) -> Self {
        Self { x, y, z, timestamp }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.timestamp.is_finite()
    }
}

/// Unvalidated mission as supplied by an input source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    pub id: MissionId,
    pub waypoints: Vec<Waypoint>,
}

impl MissionPlan {
    pub fn new(id: impl Into<MissionId>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            id: id.into(),
            waypoints,
        }
    }

    /// Check the mission invariants and build a [`Mission`].
    pub fn validate(self) -> Result<Mission, MissionError> {
        Mission::new(self.id, self.waypoints)
    }
}

/// A validated drone mission: an identifier plus at least two waypoints
/// with strictly increasing timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MissionPlan")]
pub struct Mission {
    id: MissionId,
    waypoints: Vec<Waypoint>,
}

impl TryFrom<MissionPlan> for Mission {
    type Error = MissionError;

    fn try_from(plan: MissionPlan) -> Result<Self, Self::Error> {
        plan.validate()
    }
}

impl Mission {
    pub fn new(id: impl Into<MissionId>, waypoints: Vec<Waypoint>) -> Result<Self, MissionError> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(MissionError::EmptyId);
        }
        if waypoints.len() < 2 {
            return Err(MissionError::TooFewWaypoints {
                id: id.to_string(),
                count: waypoints.len(),
            });
        }
        if let Some(index) = waypoints.iter().position(|wp| !wp.is_finite()) {
            return Err(MissionError::NonFiniteValue {
                id: id.to_string(),
                index,
            });
        }
        for (index, pair) in waypoints.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(MissionError::NonIncreasingTimestamp {
                    id: id.to_string(),
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }

        Ok(Self { id, waypoints })
    }

    pub fn id(&self) -> &MissionId {
        &self.id
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Consecutive waypoint pairs, in order.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = (&Waypoint, &Waypoint)> + '_ {
        self.waypoints.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn start_time(&self) -> f64 {
        self.waypoints[0].timestamp
    }

    pub fn end_time(&self) -> f64 {
        self.waypoints[self.waypoints.len() - 1].timestamp
    }

    /// Interpolated position at `t`, or `None` outside the mission's time range.
    pub fn position_at(&self, t: f64) -> Option<Position> {
        if !(self.start_time()..=self.end_time()).contains(&t) {
            return None;
        }
        let upper = self.waypoints.partition_point(|wp| wp.timestamp <= t);
        let idx = upper.saturating_sub(1).min(self.segment_count() - 1);
        Some(geometry::interpolate(
            &self.waypoints[idx],
            &self.waypoints[idx + 1],
            t,
        ))
    }
}

/// Close approach between two missions.
///
/// `time` is the instant of minimum separation inside
/// `[start_time, end_time]`; positions and `distance` are taken at `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub mission_a: MissionId,
    pub mission_b: MissionId,
    /// Segment index within `mission_a`
    pub segment_a: usize,
    /// Segment index within `mission_b`
    pub segment_b: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub time: f64,
    pub position_a: Position,
    pub position_b: Position,
    pub distance: f64,
}

impl Conflict {
    /// Midpoint between the two drones at `time`.
    pub fn location(&self) -> Position {
        geometry::midpoint(self.position_a, self.position_b)
    }

    /// Length of the close-approach window in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<Waypoint> {
        vec![
            Waypoint::new(0.0, 0.0, 0.0, 0.0),
            Waypoint::new(10.0, 0.0, 0.0, 10.0),
            Waypoint::new(10.0, 10.0, 0.0, 20.0),
        ]
    }

    #[test]
    fn test_valid_mission() {
        let mission = Mission::new("M1", line()).unwrap();
        assert_eq!(mission.id().as_str(), "M1");
        assert_eq!(mission.segment_count(), 2);
        assert_eq!(mission.segments().len(), 2);
        assert_eq!(mission.start_time(), 0.0);
        assert_eq!(mission.end_time(), 20.0);
    }

    #[test]
    fn test_rejects_single_waypoint() {
        let err = Mission::new("M1", vec![Waypoint::new(0.0, 0.0, 0.0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            MissionError::TooFewWaypoints {
                id: "M1".into(),
                count: 1
            }
        );
    }

    #[test]
    fn test_rejects_repeated_timestamp() {
        let err = Mission::new(
            "M1",
            vec![
                Waypoint::new(0.0, 0.0, 0.0, 0.0),
                Waypoint::new(5.0, 0.0, 0.0, 5.0),
                Waypoint::new(9.0, 0.0, 0.0, 5.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MissionError::NonIncreasingTimestamp { index: 2, .. }
        ));
    }

    #[test]
    fn test_rejects_decreasing_timestamp() {
        let err = Mission::new(
            "M1",
            vec![
                Waypoint::new(0.0, 0.0, 0.0, 10.0),
                Waypoint::new(5.0, 0.0, 0.0, 0.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MissionError::NonIncreasingTimestamp { index: 1, .. }
        ));
    }

    #[test]
    fn test_rejects_nan_and_empty_id() {
        let err = Mission::new(
            "M1",
            vec![
                Waypoint::new(0.0, f64::NAN, 0.0, 0.0),
                Waypoint::new(5.0, 0.0, 0.0, 1.0),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, MissionError::NonFiniteValue { index: 0, .. }));

        let err = Mission::new("  ", line()).unwrap_err();
        assert_eq!(err, MissionError::EmptyId);
    }

    #[test]
    fn test_position_at() {
        let mission = Mission::new("M1", line()).unwrap();
        assert_eq!(mission.position_at(5.0), Some(Position::new(5.0, 0.0, 0.0)));
        assert_eq!(mission.position_at(10.0), Some(Position::new(10.0, 0.0, 0.0)));
        assert_eq!(mission.position_at(15.0), Some(Position::new(10.0, 5.0, 0.0)));
        assert_eq!(mission.position_at(20.0), Some(Position::new(10.0, 10.0, 0.0)));
        assert_eq!(mission.position_at(-1.0), None);
        assert_eq!(mission.position_at(20.5), None);
    }

    #[test]
    fn test_mission_id_from_json_string_or_integer() {
        let text: MissionId = serde_json::from_str("\"Drone2\"").unwrap();
        let number: MissionId = serde_json::from_str("42").unwrap();
        assert_eq!(text.as_str(), "Drone2");
        assert_eq!(number.as_str(), "42");
        assert_eq!(serde_json::to_string(&number).unwrap(), "\"42\"");
    }

    #[test]
    fn test_mission_deserialize_validates() {
        let ok: Mission = serde_json::from_str(
            r#"{"id": 7, "waypoints": [
                {"x": 0, "y": 0, "z": 0, "timestamp": 0},
                {"x": 1, "y": 0, "z": 0, "timestamp": 1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(ok.id().as_str(), "7");

        let bad = serde_json::from_str::<Mission>(
            r#"{"id": "X", "waypoints": [{"x": 0, "y": 0, "z": 0, "timestamp": 0}]}"#,
        );
        assert!(bad.is_err());
    }
}
