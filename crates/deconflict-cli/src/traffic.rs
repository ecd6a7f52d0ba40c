//! Where scheduled traffic comes from and which mission is the primary.

use deconflict_core::MissionPlan;
use std::path::PathBuf;

use crate::config::Config;
use crate::scenarios::{scenario, ScenarioType};
use crate::schedule::{load_schedule, ScheduleError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrafficSource {
    File(PathBuf),
    Scenario(ScenarioType),
}

impl TrafficSource {
    /// Resolve the source from command-line flags and the environment.
    ///
    /// `--schedule` wins, then `--scenario`, then `DECONFLICT_SCHEDULE`,
    /// then the demo scenario.
    pub fn resolve(
        schedule: Option<PathBuf>,
        scenario: Option<ScenarioType>,
        config: &Config,
    ) -> Self {
        match (schedule, scenario) {
            (Some(path), _) => Self::File(path),
            (None, Some(kind)) => Self::Scenario(kind),
            (None, None) => match &config.schedule_path {
                Some(path) => Self::File(path.clone()),
                None => Self::Scenario(ScenarioType::Demo),
            },
        }
    }

    pub fn load(&self) -> Result<Vec<MissionPlan>, ScheduleError> {
        match self {
            Self::File(path) => load_schedule(path),
            Self::Scenario(kind) => {
                let scenario = scenario(*kind);
                tracing::info!("Using built-in scenario: {}", scenario.name);
                Ok(scenario.missions)
            }
        }
    }
}

/// The primary mission and the traffic it is checked against.
#[derive(Debug, Clone)]
pub struct Selection {
    pub primary: MissionPlan,
    pub traffic: Vec<MissionPlan>,
}

/// Pick the primary mission and its traffic.
///
/// Without a supplied primary the first scheduled mission is used. A
/// built-in scenario's first mission is its own primary, so it is dropped
/// when the caller supplies one. Traffic sharing the primary's id is
/// skipped. Returns `None` when there is no primary to check.
pub fn select(
    source: &TrafficSource,
    supplied: Option<MissionPlan>,
    mut traffic: Vec<MissionPlan>,
) -> Option<Selection> {
    let primary = match supplied {
        Some(primary) => {
            if matches!(source, TrafficSource::Scenario(_)) && !traffic.is_empty() {
                let replaced = traffic.remove(0);
                tracing::debug!("Replacing scenario primary {}", replaced.id);
            }
            primary
        }
        None if traffic.is_empty() => return None,
        None => traffic.remove(0),
    };

    let traffic = traffic
        .into_iter()
        .filter(|plan| {
            let duplicate = plan.id == primary.id;
            if duplicate {
                tracing::warn!("Skipping scheduled mission {} (same id as primary)", plan.id);
            }
            !duplicate
        })
        .collect();

    Some(Selection { primary, traffic })
}
