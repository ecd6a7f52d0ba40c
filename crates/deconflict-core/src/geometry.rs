//! Geometry helpers for separation checks in a local Cartesian frame.

use serde::{Deserialize, Serialize};

use crate::models::Waypoint;

/// A point in the local frame (same units as waypoint coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Position, p2: Position) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let dz = p2.z - p1.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Midpoint between two points.
pub fn midpoint(p1: Position, p2: Position) -> Position {
    Position {
        x: (p1.x + p2.x) / 2.0,
        y: (p1.y + p2.y) / 2.0,
        z: (p1.z + p2.z) / 2.0,
    }
}

/// Position on the straight segment from `start` to `end` at time `t`.
///
/// A segment with zero or negative duration always yields the start
/// position. Times outside `[start.timestamp, end.timestamp]` are
/// extrapolated along the same line.
pub fn interpolate(start: &Waypoint, end: &Waypoint, t: f64) -> Position {
    let span = end.timestamp - start.timestamp;
    if span <= 0.0 {
        return start.position();
    }

    let ratio = (t - start.timestamp) / span;
    Position {
        x: start.x + (end.x - start.x) * ratio,
        y: start.y + (end.y - start.y) * ratio,
        z: start.z + (end.z - start.z) * ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_known_triangle() {
        let d = distance(Position::new(0.0, 0.0, 0.0), Position::new(3.0, 4.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_same_point_and_symmetry() {
        let p = Position::new(12.5, -3.0, 40.0);
        let q = Position::new(-7.0, 8.25, 11.0);
        assert_eq!(distance(p, p), 0.0);
        assert_eq!(distance(p, q), distance(q, p));
    }

    #[test]
    fn test_interpolate_midpoint() {
        let a = Waypoint::new(0.0, 0.0, 0.0, 0.0);
        let b = Waypoint::new(10.0, 10.0, 10.0, 600.0);
        let pos = interpolate(&a, &b, 300.0);
        assert_eq!(pos, Position::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_interpolate_zero_duration_returns_start() {
        let a = Waypoint::new(1.0, 2.0, 3.0, 50.0);
        let b = Waypoint::new(9.0, 9.0, 9.0, 50.0);
        assert_eq!(interpolate(&a, &b, 50.0), a.position());
        assert_eq!(interpolate(&a, &b, 75.0), a.position());
    }

    #[test]
    fn test_interpolate_negative_duration_returns_start() {
        let a = Waypoint::new(1.0, 2.0, 3.0, 60.0);
        let b = Waypoint::new(9.0, 9.0, 9.0, 50.0);
        assert_eq!(interpolate(&a, &b, 55.0), a.position());
    }

    #[test]
    fn test_interpolate_extrapolates_outside_segment() {
        let a = Waypoint::new(0.0, 0.0, 0.0, 0.0);
        let b = Waypoint::new(10.0, 0.0, 0.0, 10.0);
        assert_eq!(interpolate(&a, &b, 15.0), Position::new(15.0, 0.0, 0.0));
        assert_eq!(interpolate(&a, &b, -5.0), Position::new(-5.0, 0.0, 0.0));
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(Position::new(0.0, 0.0, 10.0), Position::new(4.0, -2.0, 20.0));
        assert_eq!(m, Position::new(2.0, -1.0, 15.0));
    }
}
