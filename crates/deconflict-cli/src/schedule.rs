//! JSON mission and schedule files.
//!
//! Waypoint timestamps may be plain seconds or RFC 3339 instants; instants
//! are converted to Unix seconds with millisecond precision.

use chrono::{DateTime, Utc};
use deconflict_core::{MissionId, MissionPlan, Waypoint};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Waypoint time as written in a file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeSpec {
    Seconds(f64),
    Instant(DateTime<Utc>),
}

impl TimeSpec {
    pub fn as_seconds(&self) -> f64 {
        match self {
            TimeSpec::Seconds(seconds) => *seconds,
            TimeSpec::Instant(instant) => instant.timestamp_millis() as f64 / 1000.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaypointRecord {
    x: f64,
    y: f64,
    z: f64,
    #[serde(alias = "time")]
    timestamp: TimeSpec,
}

#[derive(Debug, Deserialize)]
struct MissionRecord {
    #[serde(alias = "drone_id")]
    id: MissionId,
    waypoints: Vec<WaypointRecord>,
}

impl From<MissionRecord> for MissionPlan {
    fn from(record: MissionRecord) -> Self {
        let waypoints = record
            .waypoints
            .into_iter()
            .map(|wp| Waypoint::new(wp.x, wp.y, wp.z, wp.timestamp.as_seconds()))
            .collect();
        MissionPlan::new(record.id, waypoints)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScheduleDocument {
    Wrapped { missions: Vec<MissionRecord> },
    Bare(Vec<MissionRecord>),
}

/// Parse a schedule: either `{"missions": [...]}` or a bare array.
pub fn parse_schedule(json: &str) -> Result<Vec<MissionPlan>, serde_json::Error> {
    let records = match serde_json::from_str(json)? {
        ScheduleDocument::Wrapped { missions } => missions,
        ScheduleDocument::Bare(missions) => missions,
    };
    Ok(records.into_iter().map(MissionPlan::from).collect())
}

/// Parse a single mission object.
pub fn parse_mission(json: &str) -> Result<MissionPlan, serde_json::Error> {
    let record: MissionRecord = serde_json::from_str(json)?;
    Ok(record.into())
}

pub fn load_schedule(path: &Path) -> Result<Vec<MissionPlan>, ScheduleError> {
    let json = read(path)?;
    let plans = parse_schedule(&json).map_err(|source| ScheduleError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded {} mission(s) from {}", plans.len(), path.display());
    Ok(plans)
}

pub fn load_mission(path: &Path) -> Result<MissionPlan, ScheduleError> {
    let json = read(path)?;
    parse_mission(&json).map_err(|source| ScheduleError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ScheduleError> {
    std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
        path: path.to_path_buf(),
        source,
    })
}
