//! CLI configuration from environment.

use std::env;
use std::path::PathBuf;

/// Default minimum separation, in meters.
const DEFAULT_SAFETY_DISTANCE: f64 = 20.0;
const DEFAULT_TIME_STEP_S: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub safety_distance: f64,
    pub time_step: f64,
    pub schedule_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (environment, test map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            safety_distance: lookup("DECONFLICT_SAFETY_DISTANCE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SAFETY_DISTANCE),
            time_step: lookup("DECONFLICT_TIME_STEP")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIME_STEP_S),
            schedule_path: lookup("DECONFLICT_SCHEDULE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}
