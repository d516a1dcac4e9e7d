// src/trajectory.rs - Joint-space trajectory data model
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single point of a joint-space path.
///
/// Positions are supplied by the caller and never modified by the smoother.
/// `velocities`, `accelerations` and `time_from_start` are derived outputs.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Waypoint {
    /// Joint positions, one entry per trajectory joint
    pub positions: Vec<f64>,
    /// Joint velocities (derived)
    #[serde(default)]
    pub velocities: Vec<f64>,
    /// Joint accelerations (derived)
    #[serde(default)]
    pub accelerations: Vec<f64>,
    /// Offset from the start of the trajectory in seconds (derived)
    #[serde(default)]
    pub time_from_start: f64,
}

impl Waypoint {
    pub fn new(positions: Vec<f64>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }
}

/// Ordered waypoints sharing one joint ordering.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Trajectory {
    pub joint_names: Vec<String>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// Velocity and acceleration bounds of one joint.
///
/// An inactive flag does not mean "unconstrained": the smoother falls back to
/// [`crate::motion::limits::DEFAULT_LIMIT`] for that quantity.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct JointLimit {
    #[serde(default)]
    pub joint_name: Option<String>,
    #[serde(default)]
    pub max_velocity: f64,
    #[serde(default)]
    pub has_velocity_limits: bool,
    #[serde(default)]
    pub max_acceleration: f64,
    #[serde(default)]
    pub has_acceleration_limits: bool,
}

impl JointLimit {
    /// Limit record with both bounds active.
    pub fn new(joint_name: impl Into<String>, max_velocity: f64, max_acceleration: f64) -> Self {
        Self {
            joint_name: Some(joint_name.into()),
            max_velocity,
            has_velocity_limits: true,
            max_acceleration,
            has_acceleration_limits: true,
        }
    }

    /// Limit record with both flags cleared.
    pub fn unlimited(joint_name: impl Into<String>) -> Self {
        Self {
            joint_name: Some(joint_name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TrajectoryError {
    #[error("Trajectory has no waypoints")]
    Empty,
    #[error("Waypoint {waypoint} has {found} positions, expected {expected}")]
    PositionCount {
        waypoint: usize,
        expected: usize,
        found: usize,
    },
    #[error("Waypoint {waypoint} joint {joint} has non-finite position {value}")]
    NonFinitePosition { waypoint: usize, joint: usize, value: f64 },
    #[error("Got {found} joint limits for {expected} joints")]
    LimitCount { expected: usize, found: usize },
    #[error("Limit {index} is for joint '{limit}' but trajectory joint is '{joint}'")]
    LimitNameMismatch {
        index: usize,
        joint: String,
        limit: String,
    },
    #[error("Joint '{joint}' has invalid {quantity} limit {value}, must be finite and > 0")]
    InvalidLimit {
        joint: String,
        quantity: &'static str,
        value: f64,
    },
}

impl Trajectory {
    pub fn new(joint_names: Vec<String>) -> Self {
        Self {
            joint_names,
            waypoints: Vec::new(),
        }
    }

    /// Build an unclocked trajectory from rows of joint positions.
    pub fn from_positions<S, I>(joint_names: I, rows: Vec<Vec<f64>>) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            joint_names: joint_names.into_iter().map(Into::into).collect(),
            waypoints: rows.into_iter().map(Waypoint::new).collect(),
        }
    }

    pub fn num_joints(&self) -> usize {
        self.joint_names.len()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Position of `joint` at waypoint `index`.
    #[inline]
    pub fn position(&self, index: usize, joint: usize) -> f64 {
        self.waypoints[index].positions[joint]
    }

    /// Check that the trajectory and `limits` can be fed to the smoother.
    pub fn validate(&self, limits: &[JointLimit]) -> Result<(), TrajectoryError> {
        if self.is_empty() {
            return Err(TrajectoryError::Empty);
        }
        let num_joints = self.num_joints();
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            if waypoint.positions.len() != num_joints {
                return Err(TrajectoryError::PositionCount {
                    waypoint: i,
                    expected: num_joints,
                    found: waypoint.positions.len(),
                });
            }
            if let Some((j, &value)) = waypoint
                .positions
                .iter()
                .enumerate()
                .find(|(_, p)| !p.is_finite())
            {
                return Err(TrajectoryError::NonFinitePosition {
                    waypoint: i,
                    joint: j,
                    value,
                });
            }
        }
        if limits.len() != num_joints {
            return Err(TrajectoryError::LimitCount {
                expected: num_joints,
                found: limits.len(),
            });
        }
        for (index, (joint, limit)) in self.joint_names.iter().zip(limits).enumerate() {
            if let Some(name) = &limit.joint_name {
                if name != joint {
                    return Err(TrajectoryError::LimitNameMismatch {
                        index,
                        joint: joint.clone(),
                        limit: name.clone(),
                    });
                }
            }
            if limit.has_velocity_limits && !is_positive(limit.max_velocity) {
                return Err(TrajectoryError::InvalidLimit {
                    joint: joint.clone(),
                    quantity: "velocity",
                    value: limit.max_velocity,
                });
            }
            if limit.has_acceleration_limits && !is_positive(limit.max_acceleration) {
                return Err(TrajectoryError::InvalidLimit {
                    joint: joint.clone(),
                    quantity: "acceleration",
                    value: limit.max_acceleration,
                });
            }
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_joint() -> Trajectory {
        Trajectory::from_positions(["shoulder", "elbow"], vec![vec![0.0, 0.0], vec![1.0, 0.5]])
    }

    #[test]
    fn test_from_positions() {
        let traj = two_joint();
        assert_eq!(traj.num_joints(), 2);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.position(1, 1), 0.5);
        assert!(traj.waypoints[0].velocities.is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let traj = two_joint();
        let limits = vec![JointLimit::new("shoulder", 1.0, 2.0), JointLimit::unlimited("elbow")];
        assert!(traj.validate(&limits).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let traj = Trajectory::new(vec!["a".to_string()]);
        assert_eq!(traj.validate(&[JointLimit::default()]), Err(TrajectoryError::Empty));
    }

    #[test]
    fn test_validate_position_count() {
        let mut traj = two_joint();
        traj.waypoints[1].positions.pop();
        let limits = vec![JointLimit::default(), JointLimit::default()];
        assert_eq!(
            traj.validate(&limits),
            Err(TrajectoryError::PositionCount { waypoint: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_validate_non_finite_position() {
        let mut traj = two_joint();
        traj.waypoints[0].positions[1] = f64::NAN;
        let limits = vec![JointLimit::default(), JointLimit::default()];
        assert!(matches!(
            traj.validate(&limits),
            Err(TrajectoryError::NonFinitePosition { waypoint: 0, joint: 1, .. })
        ));
    }

    #[test]
    fn test_validate_limit_count() {
        let traj = two_joint();
        assert_eq!(
            traj.validate(&[JointLimit::default()]),
            Err(TrajectoryError::LimitCount { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_validate_limit_name_mismatch() {
        let traj = two_joint();
        let limits = vec![JointLimit::new("elbow", 1.0, 1.0), JointLimit::new("shoulder", 1.0, 1.0)];
        assert!(matches!(
            traj.validate(&limits),
            Err(TrajectoryError::LimitNameMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_active_limit() {
        let traj = two_joint();
        let limits = vec![JointLimit::new("shoulder", 0.0, 1.0), JointLimit::default()];
        assert!(matches!(
            traj.validate(&limits),
            Err(TrajectoryError::InvalidLimit { quantity: "velocity", .. })
        ));

        let limits = vec![JointLimit::default(), JointLimit::new("elbow", 1.0, -2.0)];
        assert!(matches!(
            traj.validate(&limits),
            Err(TrajectoryError::InvalidLimit { quantity: "acceleration", .. })
        ));
    }

    #[test]
    fn test_inactive_limit_value_is_ignored() {
        let traj = two_joint();
        let mut limit = JointLimit::unlimited("shoulder");
        limit.max_velocity = -5.0;
        assert!(traj.validate(&[limit, JointLimit::default()]).is_ok());
    }
}
