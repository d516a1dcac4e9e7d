// src/input.rs - Waypoint files for the command-line tool
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::config::Config;
use crate::trajectory::{JointLimit, Trajectory, Waypoint};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unclocked path plus optional inline limits.
///
/// ```toml
/// joint_names = ["pan", "tilt"]
///
/// [[waypoints]]
/// positions = [0.0, 0.0]
///
/// [[waypoints]]
/// positions = [0.5, -0.2]
///
/// [[limits]]
/// joint_name = "pan"
/// max_velocity = 1.0
/// has_velocity_limits = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PathFile {
    pub joint_names: Vec<String>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub limits: Option<Vec<JointLimit>>,
}

impl PathFile {
    pub fn parse_toml(contents: &str) -> Result<Self, InputError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn parse_json(contents: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Read a `.json` file as JSON and anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&contents),
            _ => Self::parse_toml(&contents),
        }
    }

    /// Split into the trajectory and its limits. Inline limits win over the
    /// config joint table.
    pub fn into_parts(self, config: &Config) -> (Trajectory, Vec<JointLimit>) {
        let trajectory = Trajectory {
            joint_names: self.joint_names,
            waypoints: self.waypoints,
        };
        let limits = match self.limits {
            Some(limits) => limits,
            None => config.limits_for(&trajectory),
        };
        (trajectory, limits)
    }
}
