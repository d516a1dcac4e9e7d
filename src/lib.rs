//! Time parameterization for joint-space paths.
//!
//! Given waypoints with positions only, [`IterativeSmoother`] assigns a
//! duration to every segment so that joint velocities and accelerations stay
//! within per-joint limits, then stamps each waypoint with its time offset,
//! velocity and acceleration.
//!
//! ```
//! use trajectory_timing::{IterativeSmoother, JointLimit, Trajectory};
//!
//! let path = Trajectory::from_positions(["pan"], vec![vec![0.0], vec![1.0], vec![0.0]]);
//! let limits = vec![JointLimit::new("pan", 1.0, 1.0)];
//! let outcome = IterativeSmoother::default().smooth(&path, &limits).unwrap();
//! assert!(outcome.success());
//! assert_eq!(outcome.trajectory.waypoints[0].time_from_start, 0.2);
//! ```

pub mod config;
pub mod input;
pub mod motion;
pub mod trajectory;

pub use config::{load_config, Config, ConfigError, SmootherConfig};
pub use motion::{Convergence, IterationBudget, IterativeSmoother, SmoothingOutcome};
pub use trajectory::{JointLimit, Trajectory, TrajectoryError, Waypoint};
