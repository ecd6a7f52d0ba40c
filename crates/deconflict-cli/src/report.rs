//! Conflict reports for the terminal or for other tools.

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use deconflict_core::{Conflict, MissionId, SeparationRules};
use serde::Serialize;
use std::fmt::Write;

/// Timestamps at or above this are rendered as calendar instants.
const ABSOLUTE_TIME_THRESHOLD_S: f64 = 1.0e9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of a deconfliction run.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// `None` when every mission was checked against every other
    pub primary: Option<&'a MissionId>,
    pub rules: SeparationRules,
    pub missions_checked: usize,
    pub clear: bool,
    pub conflicts: &'a [Conflict],
}

impl<'a> Report<'a> {
    pub fn new(
        primary: Option<&'a MissionId>,
        rules: SeparationRules,
        missions_checked: usize,
        conflicts: &'a [Conflict],
    ) -> Self {
        Self {
            primary,
            rules,
            missions_checked,
            clear: conflicts.is_empty(),
            conflicts,
        }
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let subject = match self.primary {
            Some(id) => format!("Mission {}", id),
            None => "Schedule".to_string(),
        };

        if self.conflicts.is_empty() {
            let _ = writeln!(
                out,
                "{} is CLEAR: no conflicts with {} mission(s) (safety distance {}, time step {}s).",
                subject, self.missions_checked, self.rules.safety_distance, self.rules.time_step
            );
            return out;
        }

        let _ = writeln!(
            out,
            "{} is REJECTED: {} conflict(s) detected (safety distance {}, time step {}s):",
            subject,
            self.conflicts.len(),
            self.rules.safety_distance,
            self.rules.time_step
        );
        for conflict in self.conflicts {
            let location = conflict.location();
            let _ = write!(
                out,
                "  Conflict between {} and {} at ({:.1}, {:.1}, {:.1}) at time {}",
                conflict.mission_a,
                conflict.mission_b,
                location.x,
                location.y,
                location.z,
                format_time(conflict.time)
            );
            if conflict.duration() > 0.0 {
                let _ = write!(
                    out,
                    " (window {} to {})",
                    format_time(conflict.start_time),
                    format_time(conflict.end_time)
                );
            }
            let _ = writeln!(out, ": separation {:.2}", conflict.distance);
        }
        out
    }
}

/// Render a timestamp either as seconds or, for Unix times, as RFC 3339.
pub fn format_time(seconds: f64) -> String {
    if seconds >= ABSOLUTE_TIME_THRESHOLD_S {
        let millis = (seconds * 1000.0).round() as i64;
        if let Some(instant) = DateTime::<Utc>::from_timestamp_millis(millis) {
            return instant.to_rfc3339_opts(SecondsFormat::Millis, true);
        }
    }
    format!("{:.2}s", seconds)
}
