//! Separation rules applied by the conflict detector.

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// How violating samples are turned into conflict records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictGrouping {
    /// One conflict per sampled instant below the safety distance
    #[default]
    PerSample,
    /// One conflict per contiguous run of violating samples within a segment pair
    Runs,
}

/// Thresholds for a deconfliction run.
///
/// There are no defaults: both values must come from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeparationRules {
    /// Minimum allowed distance between two drones
    pub safety_distance: f64,
    /// Sampling interval (seconds) used to scan overlapping time windows
    pub time_step: f64,
    #[serde(default)]
    pub grouping: ConflictGrouping,
}

impl SeparationRules {
    /// Build validated rules with per-sample grouping.
    pub fn new(safety_distance: f64, time_step: f64) -> Result<Self, ParameterError> {
        let rules = Self {
            safety_distance,
            time_step,
            grouping: ConflictGrouping::PerSample,
        };
        rules.validate()?;
        Ok(rules)
    }

    pub fn with_grouping(mut self, grouping: ConflictGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.safety_distance.is_finite() && self.safety_distance > 0.0) {
            return Err(ParameterError::SafetyDistance(self.safety_distance));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ParameterError::TimeStep(self.time_step));
        }
        Ok(())
    }
}
