//! Strategic deconfliction for planned drone missions.
//!
//! Checks timestamped 3D waypoint missions against each other and reports
//! every sampled instant (or run of instants) where two drones are closer
//! than a safety distance.

pub mod batch;
pub mod conflict;
pub mod error;
pub mod geometry;
pub mod models;
pub mod rules;

pub use batch::{check_all, validate_missions};
pub use conflict::{detect_conflicts, ConflictDetector};
pub use error::{CheckError, MissionError, ParameterError};
pub use geometry::{distance, interpolate, midpoint, Position};
pub use models::{Conflict, Mission, MissionId, MissionPlan, Waypoint};
pub use rules::{ConflictGrouping, SeparationRules};
