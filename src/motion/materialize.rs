// src/motion/materialize.rs
use crate::motion::stencil::Stencil;
use crate::trajectory::Trajectory;

/// Time stamp of the first waypoint (seconds).
pub const START_TIME_OFFSET: f64 = 0.2;

/// Write time stamps, velocities and accelerations for every waypoint from
/// the final interval array.
///
/// Expects the derivative vectors to have been sized by the velocity pass.
/// A single-waypoint trajectory only gets its start time.
pub fn update_trajectory(trajectory: &mut Trajectory, intervals: &[f64]) {
    let mut time = START_TIME_OFFSET;
    for (i, waypoint) in trajectory.waypoints.iter_mut().enumerate() {
        if i > 0 {
            time += intervals[i - 1];
        }
        waypoint.time_from_start = time;
    }

    if intervals.is_empty() {
        return;
    }

    let num_joints = trajectory.num_joints();
    for i in 0..trajectory.len() {
        for j in 0..num_joints {
            let fd = Stencil::gather(trajectory, intervals, i, j).estimate();
            let waypoint = &mut trajectory.waypoints[i];
            waypoint.velocities[j] = fd.velocity();
            waypoint.accelerations[j] = fd.acceleration;
        }
    }
}
