use std::default::Default;

use keel_shared::{check_percent, check_positive, ConfigError};

/// Contains Config properties which will be used by a viewer to present a
/// remotely simulated body
#[derive(Clone, Debug, PartialEq)]
pub struct ReconciliationConfig {
    /// Percentage (0..=99) of the previous position offset retained when a
    /// new error is measured
    pub position_smoothing: u8,
    /// Percentage (0..=99) of the previous rotation offset retained when a
    /// new error is measured
    pub rotation_smoothing: u8,
    /// Offset length, in world units, at which `max_position_reduction`
    /// fully applies
    pub max_reduction_at_distance: f32,
    /// Percentage (0..=100) of the position offset removed per frame when
    /// the offset is near zero
    pub min_position_reduction: u8,
    /// Percentage (0..=100) of the position offset removed per frame at or
    /// beyond `max_reduction_at_distance`
    pub max_position_reduction: u8,
    /// Offset angle, in radians, at which `max_rotation_reduction` fully
    /// applies
    pub max_reduction_at_angle: f32,
    /// Percentage (0..=100) of the rotation offset removed per frame when
    /// the offset is near zero
    pub min_rotation_reduction: u8,
    /// Percentage (0..=100) of the rotation offset removed per frame at or
    /// beyond `max_reduction_at_angle`
    pub max_rotation_reduction: u8,
    /// Queue decoded samples and play them back one per fixed tick. When
    /// false, samples are written to the shadow body as they arrive.
    pub use_buffering: bool,
    /// Track error magnitudes and log them every frame
    pub diagnostics: bool,
}

impl ReconciliationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percent("position_smoothing", self.position_smoothing, 0, 99)?;
        check_percent("rotation_smoothing", self.rotation_smoothing, 0, 99)?;
        check_positive("max_reduction_at_distance", self.max_reduction_at_distance)?;
        check_percent("min_position_reduction", self.min_position_reduction, 0, 100)?;
        check_percent("max_position_reduction", self.max_position_reduction, 0, 100)?;
        check_positive("max_reduction_at_angle", self.max_reduction_at_angle)?;
        check_percent("min_rotation_reduction", self.min_rotation_reduction, 0, 100)?;
        check_percent("max_rotation_reduction", self.max_rotation_reduction, 0, 100)?;
        Ok(())
    }
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            position_smoothing: 0,
            rotation_smoothing: 0,
            max_reduction_at_distance: 1.0,
            min_position_reduction: 100,
            max_position_reduction: 100,
            max_reduction_at_angle: 0.28,
            min_rotation_reduction: 100,
            max_rotation_reduction: 100,
            use_buffering: true,
            diagnostics: false,
        }
    }
}
