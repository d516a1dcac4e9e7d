// src/motion/verify.rs
//! Post-hoc limit checks for a materialized trajectory.
//!
//! A smoother run that hit its budget can hand back a trajectory that still
//! exceeds acceleration limits. Callers that need a guarantee re-check here.

use serde::Serialize;

use crate::motion::limits::resolve_all;
use crate::trajectory::{JointLimit, Trajectory};

/// Relative slack on every limit. Velocities are rebuilt from differences of
/// accumulated time stamps, which can come out a few ulps short.
const RELATIVE_EPSILON: f64 = 1e-9;

fn exceeds(value: f64, limit: f64, tolerance: f64) -> bool {
    value.abs() > limit * (1.0 + RELATIVE_EPSILON) + tolerance
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Velocity,
    Acceleration,
}

/// One joint exceeding one of its effective limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitViolation {
    pub quantity: Quantity,
    /// Segment index for velocity, waypoint index for acceleration
    pub index: usize,
    pub joint: usize,
    pub value: f64,
    pub limit: f64,
}

/// Check average segment velocities and interior-waypoint accelerations
/// against the effective limits.
///
/// Velocities are measured from positions and time stamps, accelerations
/// are the values stored on the waypoints. Assumes `trajectory` has passed
/// [`Trajectory::validate`] against `limits`.
pub fn check_limits(trajectory: &Trajectory, limits: &[JointLimit], tolerance: f64) -> Vec<LimitViolation> {
    let effective = resolve_all(limits);
    let mut violations = Vec::new();

    for (segment, pair) in trajectory.waypoints.windows(2).enumerate() {
        let dt = pair[1].time_from_start - pair[0].time_from_start;
        if dt <= 0.0 {
            continue;
        }
        for (joint, limit) in effective.iter().enumerate() {
            let velocity = (pair[1].positions[joint] - pair[0].positions[joint]) / dt;
            if exceeds(velocity, limit.max_velocity, tolerance) {
                violations.push(LimitViolation {
                    quantity: Quantity::Velocity,
                    index: segment,
                    joint,
                    value: velocity,
                    limit: limit.max_velocity,
                });
            }
        }
    }

    let num_points = trajectory.len();
    for index in 1..num_points.saturating_sub(1) {
        let waypoint = &trajectory.waypoints[index];
        for (joint, limit) in effective.iter().enumerate() {
            let Some(&acceleration) = waypoint.accelerations.get(joint) else {
                continue;
            };
            if exceeds(acceleration, limit.max_acceleration, tolerance) {
                violations.push(LimitViolation {
                    quantity: Quantity::Acceleration,
                    index,
                    joint,
                    value: acceleration,
                    limit: limit.max_acceleration,
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clocked() -> Trajectory {
        let mut traj = Trajectory::from_positions(["a"], vec![vec![0.0], vec![2.0], vec![2.5]]);
        for (wp, (t, acc)) in traj.waypoints.iter_mut().zip([(0.2, 0.0), (1.2, 3.0), (2.2, 0.0)]) {
            wp.time_from_start = t;
            wp.velocities = vec![0.0];
            wp.accelerations = vec![acc];
        }
        traj
    }

    #[test]
    fn test_reports_velocity_and_acceleration() {
        let traj = clocked();
        let violations = check_limits(&traj, &[JointLimit::new("a", 1.0, 2.0)], 0.01);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].quantity, Quantity::Velocity);
        assert_eq!(violations[0].index, 0);
        assert!((violations[0].value - 2.0).abs() < 1e-9);
        assert_eq!(violations[1].quantity, Quantity::Acceleration);
        assert_eq!(violations[1].index, 1);
        assert_eq!(violations[1].limit, 2.0);
    }

    #[test]
    fn test_segment_at_velocity_limit_with_zero_tolerance() {
        use crate::motion::smoother::IterativeSmoother;

        let traj = Trajectory::from_positions(["a"], vec![vec![0.0], vec![0.1], vec![0.3], vec![0.6]]);
        let limits = [JointLimit::new("a", 1.0, 100.0)];
        let outcome = IterativeSmoother::default().smooth(&traj, &limits).unwrap();
        assert!(outcome.converged());
        assert!(check_limits(&outcome.trajectory, &limits, 0.0).is_empty());
    }

    #[test]
    fn test_zero_tolerance_still_flags_real_excess() {
        let traj = clocked();
        let violations = check_limits(&traj, &[JointLimit::new("a", 1.999, 3.0)], 0.0);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].quantity, Quantity::Velocity);
    }

    #[test]
    fn test_within_limits() {
        let traj = clocked();
        assert!(check_limits(&traj, &[JointLimit::new("a", 3.0, 5.0)], 0.01).is_empty());
    }

    #[test]
    fn test_inactive_limits_checked_against_default() {
        let traj = clocked();
        let violations = check_limits(&traj, &[JointLimit::unlimited("a")], 0.0);
        // velocity 2.0 > 1.0 and acceleration 3.0 > 1.0
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.limit == 1.0));
    }
}
