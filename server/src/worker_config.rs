use std::{default::Default, time::Duration};

use keel_shared::{check_interval, check_tolerance, ConfigError};

/// Per-field tolerances used to decide whether a quantity changed since it
/// was last sent. Zero means any difference at all counts as a change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaConfig {
    /// World units, compared per axis
    pub position_epsilon: f32,
    /// Compared per quaternion component
    pub rotation_epsilon: f32,
    /// Units per second, compared per axis
    pub linear_velocity_epsilon: f32,
    /// Radians per second, compared per axis
    pub angular_velocity_epsilon: f32,
}

impl DeltaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_tolerance("position_epsilon", self.position_epsilon)?;
        check_tolerance("rotation_epsilon", self.rotation_epsilon)?;
        check_tolerance("linear_velocity_epsilon", self.linear_velocity_epsilon)?;
        check_tolerance("angular_velocity_epsilon", self.angular_velocity_epsilon)?;
        Ok(())
    }
}

/// Contains Config properties which will be used by a simulation worker
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerConfig {
    /// Change detection tolerances for the quantized fast path
    pub delta: DeltaConfig,
    /// How often the absolute position is broadcast on the coarse channel
    pub coordinates_interval: Duration,
}

impl WorkerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delta.validate()?;
        check_interval("coordinates_interval", self.coordinates_interval)?;
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            delta: DeltaConfig::default(),
            coordinates_interval: Duration::from_secs(1),
        }
    }
}
