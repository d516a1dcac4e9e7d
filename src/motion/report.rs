// src/motion/report.rs - Debug dump of a smoothed trajectory
use tracing::debug;

use crate::trajectory::{JointLimit, Trajectory};

pub fn log_trajectory(trajectory: &Trajectory, limits: &[JointLimit]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    debug!("joint names = {:?}", trajectory.joint_names);
    let max_velocities: Vec<Option<f64>> = limits
        .iter()
        .map(|l| l.has_velocity_limits.then_some(l.max_velocity))
        .collect();
    let max_accelerations: Vec<Option<f64>> = limits
        .iter()
        .map(|l| l.has_acceleration_limits.then_some(l.max_acceleration))
        .collect();
    debug!("max velocities = {:?}", max_velocities);
    debug!("max accelerations = {:?}", max_accelerations);

    for (i, point) in trajectory.waypoints.iter().enumerate() {
        debug!(
            "[{}] t={:.4} pos={:.4?} vel={:.4?} acc={:.4?}",
            i, point.time_from_start, point.positions, point.velocities, point.accelerations
        );
    }
}
