// src/motion/stencil.rs
//! Three-point finite-difference stencil shared by the relaxation loop and
//! trajectory materialization.
//!
//! Interior waypoints use both neighbours. The first and last waypoints only
//! have one neighbour, which is reflected to stand in for the missing one so
//! the same formula applies everywhere.

use crate::trajectory::Trajectory;

/// Which neighbours a waypoint has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborPolicy {
    First,
    Interior,
    Last,
}

impl NeighborPolicy {
    /// Policy for waypoint `index` of a trajectory with `num_points >= 2` waypoints.
    pub fn at(index: usize, num_points: usize) -> Self {
        debug_assert!(num_points >= 2 && index < num_points);
        if index == 0 {
            NeighborPolicy::First
        } else if index + 1 < num_points {
            NeighborPolicy::Interior
        } else {
            NeighborPolicy::Last
        }
    }
}

/// Estimated acceleration over two segments of durations `dt1` and `dt2`.
///
/// Returns 0.0 when either duration is zero.
#[inline]
pub fn central_acceleration(dq1: f64, dq2: f64, dt1: f64, dt2: f64) -> f64 {
    FiniteDifference::compute(dq1, dq2, dt1, dt2).acceleration
}

/// Segment velocities around a waypoint and the resulting acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FiniteDifference {
    pub v1: f64,
    pub v2: f64,
    pub acceleration: f64,
}

impl FiniteDifference {
    pub fn compute(dq1: f64, dq2: f64, dt1: f64, dt2: f64) -> Self {
        if dt1 == 0.0 || dt2 == 0.0 {
            return Self::default();
        }
        let v1 = dq1 / dt1;
        let v2 = dq2 / dt2;
        Self {
            v1,
            v2,
            acceleration: 2.0 * (v2 - v1) / (dt1 + dt2),
        }
    }

    /// Waypoint velocity, the mean of the two segment velocities.
    pub fn velocity(&self) -> f64 {
        (self.v1 + self.v2) / 2.0
    }
}

/// Positions `q1, q2, q3` around one waypoint (`q2` is the waypoint itself)
/// and the durations `dt1`, `dt2` of the segments joining them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    pub policy: NeighborPolicy,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub dt1: f64,
    pub dt2: f64,
}

impl Stencil {
    /// Gather the stencil for `joint` at waypoint `index`.
    ///
    /// `intervals[k]` is the duration between waypoints `k` and `k + 1`.
    pub fn gather(trajectory: &Trajectory, intervals: &[f64], index: usize, joint: usize) -> Self {
        let num_points = trajectory.len();
        debug_assert_eq!(intervals.len() + 1, num_points);
        let policy = NeighborPolicy::at(index, num_points);
        let q2 = trajectory.position(index, joint);
        match policy {
            NeighborPolicy::First => {
                let next = trajectory.position(index + 1, joint);
                Self {
                    policy,
                    q1: next,
                    q2,
                    q3: next,
                    dt1: intervals[index],
                    dt2: intervals[index],
                }
            }
            NeighborPolicy::Interior => Self {
                policy,
                q1: trajectory.position(index - 1, joint),
                q2,
                q3: trajectory.position(index + 1, joint),
                dt1: intervals[index - 1],
                dt2: intervals[index],
            },
            NeighborPolicy::Last => {
                let prev = trajectory.position(index - 1, joint);
                Self {
                    policy,
                    q1: prev,
                    q2,
                    q3: prev,
                    dt1: intervals[index - 1],
                    dt2: intervals[index - 1],
                }
            }
        }
    }

    pub fn dq1(&self) -> f64 {
        self.q2 - self.q1
    }

    pub fn dq2(&self) -> f64 {
        self.q3 - self.q2
    }

    pub fn estimate(&self) -> FiniteDifference {
        FiniteDifference::compute(self.dq1(), self.dq2(), self.dt1, self.dt2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Trajectory {
        Trajectory::from_positions(["j"], vec![vec![0.0], vec![1.0], vec![3.0], vec![2.0]])
    }

    #[test]
    fn test_policy_at() {
        assert_eq!(NeighborPolicy::at(0, 4), NeighborPolicy::First);
        assert_eq!(NeighborPolicy::at(1, 4), NeighborPolicy::Interior);
        assert_eq!(NeighborPolicy::at(2, 4), NeighborPolicy::Interior);
        assert_eq!(NeighborPolicy::at(3, 4), NeighborPolicy::Last);
        assert_eq!(NeighborPolicy::at(1, 2), NeighborPolicy::Last);
    }

    #[test]
    fn test_interior_stencil() {
        let traj = path();
        let intervals = [1.0, 2.0, 0.5];
        let s = Stencil::gather(&traj, &intervals, 1, 0);
        assert_eq!(s.policy, NeighborPolicy::Interior);
        assert_eq!((s.q1, s.q2, s.q3), (0.0, 1.0, 3.0));
        assert_eq!((s.dt1, s.dt2), (1.0, 2.0));
        let fd = s.estimate();
        assert_eq!(fd.v1, 1.0);
        assert_eq!(fd.v2, 1.0);
        assert_eq!(fd.acceleration, 0.0);
        assert_eq!(fd.velocity(), 1.0);
    }

    #[test]
    fn test_boundary_stencils_mirror_neighbor() {
        let traj = path();
        let intervals = [1.0, 2.0, 0.5];

        let first = Stencil::gather(&traj, &intervals, 0, 0);
        assert_eq!((first.q1, first.q2, first.q3), (1.0, 0.0, 1.0));
        assert_eq!((first.dt1, first.dt2), (1.0, 1.0));
        // v1 = -1, v2 = 1 -> a = 2 * 2 / 2
        assert_eq!(first.estimate().acceleration, 2.0);
        assert_eq!(first.estimate().velocity(), 0.0);

        let last = Stencil::gather(&traj, &intervals, 3, 0);
        assert_eq!((last.q1, last.q2, last.q3), (3.0, 2.0, 3.0));
        assert_eq!((last.dt1, last.dt2), (0.5, 0.5));
        // v1 = -2, v2 = 2 -> a = 2 * 4 / 1
        assert_eq!(last.estimate().acceleration, 8.0);
    }

    #[test]
    fn test_zero_interval_guard() {
        let fd = FiniteDifference::compute(1.0, 2.0, 0.0, 1.0);
        assert_eq!(fd, FiniteDifference::default());
        assert_eq!(central_acceleration(1.0, -1.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_central_acceleration() {
        // v1 = 1, v2 = -1 over dt1 + dt2 = 2
        assert_eq!(central_acceleration(1.0, -1.0, 1.0, 1.0), -2.0);
    }
}
