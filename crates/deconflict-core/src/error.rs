//! Error types for mission validation and conflict checks.

use thiserror::Error;

/// A mission failed its construction invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissionError {
    #[error("mission id must not be empty")]
    EmptyId,

    #[error("mission {id} has {count} waypoint(s); at least 2 are required")]
    TooFewWaypoints { id: String, count: usize },

    #[error("mission {id}: waypoint {index} at t={current} does not come after t={previous}")]
    NonIncreasingTimestamp {
        id: String,
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("mission {id}: waypoint {index} has a non-finite coordinate or timestamp")]
    NonFiniteValue { id: String, index: usize },
}

/// A detector parameter is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("safety distance must be a positive finite number, got {0}")]
    SafetyDistance(f64),

    #[error("time step must be a positive finite number, got {0}")]
    TimeStep(f64),

    #[error("time step {time_step} is too small for a {window}s window")]
    TooManySamples { window: f64, time_step: f64 },
}

/// Failure of a batch check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("mission #{index} ({id}) is invalid: {source}")]
    InvalidMission {
        index: usize,
        id: String,
        #[source]
        source: MissionError,
    },
}
