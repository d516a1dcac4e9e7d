// src/motion/limits.rs
use crate::trajectory::JointLimit;

/// Bound substituted for any limit whose flag is not set.
pub const DEFAULT_LIMIT: f64 = 1.0;

/// Velocity and acceleration bounds actually enforced for one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveLimits {
    pub max_velocity: f64,
    pub max_acceleration: f64,
}

impl Default for EffectiveLimits {
    fn default() -> Self {
        Self {
            max_velocity: DEFAULT_LIMIT,
            max_acceleration: DEFAULT_LIMIT,
        }
    }
}

impl EffectiveLimits {
    pub fn resolve(limit: &JointLimit) -> Self {
        let defaults = Self::default();
        Self {
            max_velocity: if limit.has_velocity_limits {
                limit.max_velocity
            } else {
                defaults.max_velocity
            },
            max_acceleration: if limit.has_acceleration_limits {
                limit.max_acceleration
            } else {
                defaults.max_acceleration
            },
        }
    }
}

/// Resolve every joint once, keeping joint order.
pub fn resolve_all(limits: &[JointLimit]) -> Vec<EffectiveLimits> {
    limits.iter().map(EffectiveLimits::resolve).collect()
}
