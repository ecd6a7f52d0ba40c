//! Batch checks: one primary mission against scheduled traffic, or every
//! mission against every other.

use rayon::prelude::*;

use crate::conflict::ConflictDetector;
use crate::error::CheckError;
use crate::models::{Conflict, Mission, MissionPlan};
use crate::rules::SeparationRules;

/// Check `primary` against every mission in `others`.
///
/// All other missions are validated up front; the first invalid one is
/// reported by index and id and no conflicts are returned. Results are
/// concatenated in the order of `others`. A time step that would oversample
/// the longest segment is rejected.
pub fn check_all(
    primary: &Mission,
    others: &[MissionPlan],
    safety_distance: f64,
    time_step: f64,
) -> Result<Vec<Conflict>, CheckError> {
    let detector = ConflictDetector {
        rules: SeparationRules::new(safety_distance, time_step)?,
    };
    let others = validate_missions(others.iter().cloned())?;
    detector.check_sampling(std::iter::once(primary).chain(&others))?;
    Ok(detector.check_all(primary, &others))
}

/// Validate a batch of plans, identifying the first one that fails.
pub fn validate_missions(
    plans: impl IntoIterator<Item = MissionPlan>,
) -> Result<Vec<Mission>, CheckError> {
    plans
        .into_iter()
        .enumerate()
        .map(|(index, plan)| {
            let id = plan.id.to_string();
            plan.validate()
                .map_err(|source| CheckError::InvalidMission { index, id, source })
        })
        .collect()
}

impl ConflictDetector {
    /// Check `primary` against each of `others`, preserving input order.
    pub fn check_all(&self, primary: &Mission, others: &[Mission]) -> Vec<Conflict> {
        let per_mission: Vec<Vec<Conflict>> = others
            .par_iter()
            .map(|other| {
                tracing::info!("Checking conflicts between {} and {}", primary.id(), other.id());
                self.detect(primary, other)
            })
            .collect();

        let conflicts: Vec<Conflict> = per_mission.into_iter().flatten().collect();
        tracing::info!(
            "Mission {} checked against {} other mission(s): {} conflict(s)",
            primary.id(),
            others.len(),
            conflicts.len()
        );
        conflicts
    }

    /// Check every unordered pair of missions, in index order.
    pub fn check_pairwise(&self, missions: &[Mission]) -> Vec<Conflict> {
        let pairs: Vec<(usize, usize)> = (0..missions.len())
            .flat_map(|i| (i + 1..missions.len()).map(move |j| (i, j)))
            .collect();

        let per_pair: Vec<Vec<Conflict>> = pairs
            .par_iter()
            .map(|&(i, j)| {
                tracing::info!(
                    "Checking conflicts between {} and {}",
                    missions[i].id(),
                    missions[j].id()
                );
                self.detect(&missions[i], &missions[j])
            })
            .collect();

        let conflicts: Vec<Conflict> = per_pair.into_iter().flatten().collect();
        tracing::info!(
            "Checked {} mission pair(s): {} conflict(s)",
            pairs.len(),
            conflicts.len()
        );
        conflicts
    }
}
