// src/motion/velocity.rs
use crate::motion::limits::EffectiveLimits;
use crate::trajectory::Trajectory;

/// Seed the interval array with the shortest duration per segment that keeps
/// every joint's average velocity within its limit.
///
/// Also zero-fills the derivative vectors of every waypoint. Returns an empty
/// array for a trajectory with fewer than two waypoints.
pub fn apply_velocity_constraints(trajectory: &mut Trajectory, limits: &[EffectiveLimits]) -> Vec<f64> {
    let num_joints = trajectory.num_joints();
    for waypoint in &mut trajectory.waypoints {
        waypoint.velocities = vec![0.0; num_joints];
        waypoint.accelerations = vec![0.0; num_joints];
    }

    trajectory
        .waypoints
        .windows(2)
        .map(|pair| {
            pair[0]
                .positions
                .iter()
                .zip(&pair[1].positions)
                .zip(limits)
                .map(|((q1, q2), limit)| (q2 - q1).abs() / limit.max_velocity)
                .fold(0.0, f64::max)
        })
        .collect()
}
