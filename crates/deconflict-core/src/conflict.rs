//! Conflict detection between two planned missions.
//!
//! Every segment of one mission is paired with every segment of the other.
//! Pairs whose time windows overlap are sampled at a fixed time step and
//! each sample closer than the safety distance is reported.

use rayon::prelude::*;

use crate::error::ParameterError;
use crate::geometry::{distance, interpolate};
use crate::models::{Conflict, Mission};
use crate::rules::{ConflictGrouping, SeparationRules};

/// Relative tolerance (in time steps) below which a sample is treated as
/// coincident with the end of the overlap window.
const SAMPLE_EPS: f64 = 1e-9;

/// Upper bound on the samples taken in one overlap window.
pub const MAX_SAMPLES_PER_WINDOW: f64 = 1.0e7;

/// Detect every close approach between `mission_a` and `mission_b`.
///
/// Produces one conflict per violating sample. Fails before any work is
/// done if `safety_distance` or `time_step` is not a positive number, or if
/// `time_step` would need more than [`MAX_SAMPLES_PER_WINDOW`] samples.
pub fn detect_conflicts(
    mission_a: &Mission,
    mission_b: &Mission,
    safety_distance: f64,
    time_step: f64,
) -> Result<Vec<Conflict>, ParameterError> {
    let detector = ConflictDetector {
        rules: SeparationRules::new(safety_distance, time_step)?,
    };
    detector.check_sampling([mission_a, mission_b])?;
    Ok(detector.detect(mission_a, mission_b))
}

/// Stateless mission-vs-mission conflict detector.
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector {
    pub(crate) rules: SeparationRules,
}

impl ConflictDetector {
    pub fn new(rules: SeparationRules) -> Result<Self, ParameterError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Fail if the longest segment of `missions` would take more than
    /// [`MAX_SAMPLES_PER_WINDOW`] samples at this time step.
    pub fn check_sampling<'m>(
        &self,
        missions: impl IntoIterator<Item = &'m Mission>,
    ) -> Result<(), ParameterError> {
        let window = missions
            .into_iter()
            .flat_map(|mission| mission.segments())
            .map(|(start, end)| end.timestamp - start.timestamp)
            .fold(0.0, f64::max);

        if window / self.rules.time_step > MAX_SAMPLES_PER_WINDOW {
            return Err(ParameterError::TooManySamples {
                window,
                time_step: self.rules.time_step,
            });
        }
        Ok(())
    }

    /// Check two missions against each other.
    ///
    /// Segment pairs are evaluated in parallel; results are ordered by
    /// segment of `mission_a`, then segment of `mission_b`, then time.
    /// Does not bound the sample count; run [`Self::check_sampling`] first
    /// when the time step comes from user input.
    pub fn detect(&self, mission_a: &Mission, mission_b: &Mission) -> Vec<Conflict> {
        let segments_a = mission_a.segment_count();
        let segments_b = mission_b.segment_count();

        let per_pair: Vec<Vec<Conflict>> = (0..segments_a * segments_b)
            .into_par_iter()
            .map(|k| {
                self.check_segment_pair(mission_a, k / segments_b, mission_b, k % segments_b)
            })
            .collect();

        let conflicts: Vec<Conflict> = per_pair.into_iter().flatten().collect();
        if !conflicts.is_empty() {
            tracing::debug!(
                "{} conflict(s) between {} and {}",
                conflicts.len(),
                mission_a.id(),
                mission_b.id()
            );
        }
        conflicts
    }

    fn check_segment_pair(
        &self,
        mission_a: &Mission,
        seg_a: usize,
        mission_b: &Mission,
        seg_b: usize,
    ) -> Vec<Conflict> {
        let (a0, a1) = (&mission_a.waypoints()[seg_a], &mission_a.waypoints()[seg_a + 1]);
        let (b0, b1) = (&mission_b.waypoints()[seg_b], &mission_b.waypoints()[seg_b + 1]);

        let lo = a0.timestamp.max(b0.timestamp);
        let hi = a1.timestamp.min(b1.timestamp);
        // Zero-width overlaps (segments that only touch) are skipped.
        if lo >= hi {
            return Vec::new();
        }

        let mut conflicts = Vec::new();
        let mut run: Option<Conflict> = None;

        for t in sample_times(lo, hi, self.rules.time_step) {
            let position_a = interpolate(a0, a1, t);
            let position_b = interpolate(b0, b1, t);
            let separation = distance(position_a, position_b);

            if separation >= self.rules.safety_distance {
                if let Some(done) = run.take() {
                    conflicts.push(done);
                }
                continue;
            }

            tracing::trace!(
                "{}[{}] vs {}[{}]: t={} distance={:.3}",
                mission_a.id(),
                seg_a,
                mission_b.id(),
                seg_b,
                t,
                separation
            );

            if let (ConflictGrouping::Runs, Some(current)) = (self.rules.grouping, run.as_mut()) {
                current.end_time = t;
                if separation < current.distance {
                    current.time = t;
                    current.position_a = position_a;
                    current.position_b = position_b;
                    current.distance = separation;
                }
                continue;
            }

            let sample = Conflict {
                mission_a: mission_a.id().clone(),
                mission_b: mission_b.id().clone(),
                segment_a: seg_a,
                segment_b: seg_b,
                start_time: t,
                end_time: t,
                time: t,
                position_a,
                position_b,
                distance: separation,
            };
            match self.rules.grouping {
                ConflictGrouping::PerSample => conflicts.push(sample),
                ConflictGrouping::Runs => run = Some(sample),
            }
        }

        if let Some(done) = run {
            conflicts.push(done);
        }
        conflicts
    }
}

/// Sample instants covering `[lo, hi]`: `lo`, `lo + step`, ... while below
/// `hi`, followed by `hi` itself.
fn sample_times(lo: f64, hi: f64, step: f64) -> impl Iterator<Item = f64> {
    let interior = ((hi - lo) / step).ceil() as usize;
    (0..interior)
        .map(move |k| lo + k as f64 * step)
        .filter(move |t| hi - t > step * SAMPLE_EPS)
        .chain(std::iter::once(hi))
}
