//! # Smoother Configuration
//!
//! Engine parameters and an optional per-joint limit table, loaded from TOML.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [smoother]
//! max_iterations = 200
//! max_time_change_per_iteration = 0.05
//! time_limit_ms = 50
//!
//! [joints.shoulder_pan]
//! max_velocity = 2.0
//! max_acceleration = 1.5
//!
//! [joints.elbow]
//! max_velocity = 3.0
//! ```
//!
//! - A joint table entry only activates the bounds it names. Anything missing
//!   falls back to the 1.0 default during smoothing.
//! - Joints not listed at all are treated the same way.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::motion::acceleration::RelaxationParams;
use crate::trajectory::{JointLimit, Trajectory};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub smoother: SmootherConfig,
    #[serde(default)]
    pub joints: HashMap<String, JointLimitConfig>,
}

/// Construction-time parameters of [`crate::IterativeSmoother`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SmootherConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_max_time_change_per_iteration")]
    pub max_time_change_per_iteration: f64,
    #[serde(default = "default_rounding_tolerance")]
    pub rounding_tolerance: f64,
    /// Optional wall-clock bound on the relaxation loop
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            max_time_change_per_iteration: default_max_time_change_per_iteration(),
            rounding_tolerance: default_rounding_tolerance(),
            time_limit_ms: None,
        }
    }
}

impl SmootherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid("max_iterations must be > 0".to_string()));
        }
        if !(self.max_time_change_per_iteration.is_finite() && self.max_time_change_per_iteration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_time_change_per_iteration must be finite and > 0, got {}",
                self.max_time_change_per_iteration
            )));
        }
        if !(self.rounding_tolerance.is_finite() && self.rounding_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rounding_tolerance must be finite and >= 0, got {}",
                self.rounding_tolerance
            )));
        }
        Ok(())
    }

    pub fn relaxation_params(&self) -> RelaxationParams {
        RelaxationParams {
            max_time_change_per_iteration: self.max_time_change_per_iteration,
            rounding_tolerance: self.rounding_tolerance,
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

/// Limits for one named joint. Unset bounds stay inactive.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct JointLimitConfig {
    #[serde(default)]
    pub max_velocity: Option<f64>,
    #[serde(default)]
    pub max_acceleration: Option<f64>,
}

impl JointLimitConfig {
    pub fn to_joint_limit(&self, joint_name: &str) -> JointLimit {
        JointLimit {
            joint_name: Some(joint_name.to_string()),
            max_velocity: self.max_velocity.unwrap_or_default(),
            has_velocity_limits: self.max_velocity.is_some(),
            max_acceleration: self.max_acceleration.unwrap_or_default(),
            has_acceleration_limits: self.max_acceleration.is_some(),
        }
    }
}

impl Config {
    pub fn parse_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.smoother.validate()?;
        for (joint, limits) in &self.joints {
            for (quantity, value) in [
                ("max_velocity", limits.max_velocity),
                ("max_acceleration", limits.max_acceleration),
            ] {
                if let Some(v) = value {
                    if !(v.is_finite() && v > 0.0) {
                        return Err(ConfigError::Invalid(format!(
                            "{} for joint '{}' must be finite and > 0, got {}",
                            quantity, joint, v
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Limit records aligned with the joint order of `trajectory`.
    pub fn limits_for(&self, trajectory: &Trajectory) -> Vec<JointLimit> {
        trajectory
            .joint_names
            .iter()
            .map(|name| match self.joints.get(name) {
                Some(limits) => limits.to_joint_limit(name),
                None => {
                    tracing::debug!("No limits configured for joint '{}', using defaults", name);
                    JointLimit::unlimited(name.as_str())
                }
            })
            .collect()
    }
}

// Default value functions
fn default_max_iterations() -> u32 { 100 }
fn default_max_time_change_per_iteration() -> f64 { 0.01 }
fn default_rounding_tolerance() -> f64 { 0.01 }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match Config::parse_toml(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to load config '{}': {}", path, e);
                Err(e)
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}
