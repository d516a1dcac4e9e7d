// src/motion/smoother.rs - Iterative parabolic time parameterization
use rayon::prelude::*;
use serde::Serialize;

use crate::config::SmootherConfig;
use crate::motion::acceleration::{apply_acceleration_constraints, Convergence};
use crate::motion::budget::IterationBudget;
use crate::motion::limits::resolve_all;
use crate::motion::materialize::update_trajectory;
use crate::motion::report::log_trajectory;
use crate::motion::velocity::apply_velocity_constraints;
use crate::trajectory::{JointLimit, Trajectory, TrajectoryError};

/// Result of one smoother run.
#[derive(Debug, Clone, Serialize)]
pub struct SmoothingOutcome {
    /// Copy of the input with time stamps and derivatives filled in
    pub trajectory: Trajectory,
    /// Final duration of each segment
    pub intervals: Vec<f64>,
    pub status: Convergence,
    /// Relaxation passes performed
    pub iterations: u32,
}

impl SmoothingOutcome {
    /// The run completed. Always true; see [`Self::converged`] for whether
    /// the acceleration limits were actually met.
    pub fn success(&self) -> bool {
        true
    }

    pub fn converged(&self) -> bool {
        self.status == Convergence::Converged
    }

    /// Time stamp of the last waypoint.
    pub fn duration(&self) -> f64 {
        self.trajectory
            .waypoints
            .last()
            .map_or(0.0, |w| w.time_from_start)
    }
}

/// Assigns segment durations to an unclocked joint path so that joint
/// velocities and accelerations stay within their limits.
///
/// The result is feasible but not time-optimal. Positions are never changed.
#[derive(Debug, Clone, Default)]
pub struct IterativeSmoother {
    config: SmootherConfig,
}

impl IterativeSmoother {
    pub fn new(config: SmootherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }

    /// Budget derived from the configured iteration cap and time limit.
    pub fn default_budget(&self) -> IterationBudget {
        let budget = IterationBudget::new(self.config.max_iterations);
        match self.config.time_limit() {
            Some(limit) => budget.with_time_limit(limit),
            None => budget,
        }
    }

    pub fn smooth(
        &self,
        trajectory: &Trajectory,
        limits: &[JointLimit],
    ) -> Result<SmoothingOutcome, TrajectoryError> {
        self.smooth_with_budget(trajectory, limits, self.default_budget())
    }

    /// Like [`Self::smooth`], but bounded by a caller-supplied budget.
    pub fn smooth_with_budget(
        &self,
        trajectory: &Trajectory,
        limits: &[JointLimit],
        mut budget: IterationBudget,
    ) -> Result<SmoothingOutcome, TrajectoryError> {
        trajectory.validate(limits)?;

        let mut output = trajectory.clone();
        let effective = resolve_all(limits);
        let mut intervals = apply_velocity_constraints(&mut output, &effective);
        let summary = apply_acceleration_constraints(
            &output,
            &mut intervals,
            &effective,
            &self.config.relaxation_params(),
            &mut budget,
        );

        match summary.convergence {
            Convergence::Converged => tracing::debug!(
                "Smoothed {} waypoints in {} passes ({} corrections)",
                output.len(),
                summary.iterations,
                summary.corrections
            ),
            status => tracing::warn!(
                "Smoother stopped before converging ({:?}) after {} passes; accelerations may exceed limits",
                status,
                summary.iterations
            ),
        }

        update_trajectory(&mut output, &intervals);
        log_trajectory(&output, limits);

        Ok(SmoothingOutcome {
            trajectory: output,
            intervals,
            status: summary.convergence,
            iterations: summary.iterations,
        })
    }

    /// Smooth independent trajectories in parallel. Results keep input order.
    pub fn smooth_batch(
        &self,
        jobs: &[(Trajectory, Vec<JointLimit>)],
    ) -> Vec<Result<SmoothingOutcome, TrajectoryError>> {
        jobs.par_iter()
            .map(|(trajectory, limits)| self.smooth(trajectory, limits))
            .collect()
    }
}
