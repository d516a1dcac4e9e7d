// src/motion/acceleration.rs - Iterative acceleration relaxation
//!
//! Grows segment durations until every waypoint's estimated acceleration is
//! within its joint limit. Each outer pass walks the joints in order and, for
//! each joint, sweeps the waypoints forwards and then backwards. A forward
//! sweep can only stretch the segment after a waypoint and a backward sweep
//! the segment before it, so alternating lets a correction reach both
//! neighbours over successive passes.
//!
//! Intervals only ever grow. Each correction is capped at
//! `max_time_change_per_iteration` so one violation cannot swamp the others
//! before they have been looked at.

use serde::Serialize;
use tracing::{debug, trace};

use crate::motion::budget::{BudgetExhausted, IterationBudget};
use crate::motion::limits::EffectiveLimits;
use crate::motion::stencil::{central_acceleration, NeighborPolicy, Stencil};
use crate::trajectory::Trajectory;

/// Factor applied to an interval on each step of the minimal-interval search.
pub const GROWTH_RATIO: f64 = 1.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationParams {
    /// Largest increase of one interval by a single correction (seconds)
    pub max_time_change_per_iteration: f64,
    /// Slack above the acceleration limit tolerated before correcting
    pub rounding_tolerance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Forward,
    Backward,
}

impl SweepDirection {
    /// Waypoint indices visited by a sweep. Forward skips the last waypoint,
    /// backward skips the first.
    pub fn visit_order(self, num_points: usize) -> impl Iterator<Item = usize> {
        let last = num_points.saturating_sub(1);
        (0..last).map(move |i| match self {
            SweepDirection::Forward => i,
            SweepDirection::Backward => last - i,
        })
    }
}

/// How the relaxation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Convergence {
    /// A full pass needed no correction.
    Converged,
    /// Stopped by the iteration cap while corrections were still being made.
    IterationLimitReached,
    /// Stopped by the wall-clock deadline while corrections were still being made.
    DeadlineReached,
}

impl From<BudgetExhausted> for Convergence {
    fn from(reason: BudgetExhausted) -> Self {
        match reason {
            BudgetExhausted::Iterations => Convergence::IterationLimitReached,
            BudgetExhausted::Deadline => Convergence::DeadlineReached,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxationSummary {
    pub convergence: Convergence,
    /// Outer passes performed
    pub iterations: u32,
    /// Interval corrections made across all passes
    pub corrections: usize,
}

/// Smallest `dt2` (searched by [`GROWTH_RATIO`] steps) bringing the
/// acceleration within `a_max`, holding `dt1` fixed.
pub fn minimal_trailing_interval(dq1: f64, dq2: f64, dt1: f64, mut dt2: f64, a_max: f64) -> f64 {
    if dt2 <= 0.0 {
        return dt2;
    }
    while central_acceleration(dq1, dq2, dt1, dt2).abs() > a_max {
        dt2 *= GROWTH_RATIO;
    }
    dt2
}

/// Smallest `dt1` (searched by [`GROWTH_RATIO`] steps) bringing the
/// acceleration within `a_max`, holding `dt2` fixed.
pub fn minimal_leading_interval(dq1: f64, dq2: f64, mut dt1: f64, dt2: f64, a_max: f64) -> f64 {
    if dt1 <= 0.0 {
        return dt1;
    }
    while central_acceleration(dq1, dq2, dt1, dt2).abs() > a_max {
        dt1 *= GROWTH_RATIO;
    }
    dt1
}

/// One sweep over the waypoints for a single joint. Returns the number of
/// intervals corrected.
pub fn sweep(
    trajectory: &Trajectory,
    intervals: &mut [f64],
    joint: usize,
    limits: &EffectiveLimits,
    direction: SweepDirection,
    params: &RelaxationParams,
) -> usize {
    let a_max = limits.max_acceleration;
    let mut corrections = 0;

    for index in direction.visit_order(trajectory.len()) {
        let stencil = Stencil::gather(trajectory, intervals, index, joint);
        let acceleration = stencil.estimate().acceleration;
        if acceleration.abs() <= a_max + params.rounding_tolerance {
            continue;
        }

        let (dq1, dq2) = (stencil.dq1(), stencil.dq2());
        match direction {
            SweepDirection::Forward => {
                debug_assert_ne!(stencil.policy, NeighborPolicy::Last);
                let dt2 = (stencil.dt2 + params.max_time_change_per_iteration)
                    .min(minimal_trailing_interval(dq1, dq2, stencil.dt1, stencil.dt2, a_max));
                intervals[index] = dt2;
            }
            SweepDirection::Backward => {
                debug_assert_ne!(stencil.policy, NeighborPolicy::First);
                let dt1 = (stencil.dt1 + params.max_time_change_per_iteration)
                    .min(minimal_leading_interval(dq1, dq2, stencil.dt1, stencil.dt2, a_max));
                intervals[index - 1] = dt1;
            }
        }
        corrections += 1;
    }

    corrections
}

/// One outer pass: every joint in order, forward then backward.
pub fn relax_pass(
    trajectory: &Trajectory,
    intervals: &mut [f64],
    limits: &[EffectiveLimits],
    params: &RelaxationParams,
) -> usize {
    let mut corrections = 0;
    for (joint, joint_limits) in limits.iter().enumerate() {
        for direction in [SweepDirection::Forward, SweepDirection::Backward] {
            let made = sweep(trajectory, intervals, joint, joint_limits, direction, params);
            trace!(joint, ?direction, corrections = made, "acceleration sweep");
            corrections += made;
        }
    }
    corrections
}

/// Run outer passes until one makes no correction or `budget` runs out.
///
/// Running out of budget is not an error: the intervals are left as the last
/// pass produced them and may still violate acceleration limits.
pub fn apply_acceleration_constraints(
    trajectory: &Trajectory,
    intervals: &mut [f64],
    limits: &[EffectiveLimits],
    params: &RelaxationParams,
    budget: &mut IterationBudget,
) -> RelaxationSummary {
    let mut total = 0;
    loop {
        if let Err(reason) = budget.try_begin_iteration() {
            return RelaxationSummary {
                convergence: reason.into(),
                iterations: budget.used(),
                corrections: total,
            };
        }
        let corrections = relax_pass(trajectory, intervals, limits, params);
        debug!(iteration = budget.used(), corrections, "acceleration pass");
        total += corrections;
        if corrections == 0 {
            return RelaxationSummary {
                convergence: Convergence::Converged,
                iterations: budget.used(),
                corrections: total,
            };
        }
    }
}
