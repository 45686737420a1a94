use log::debug;

use keel_shared::{Pose, Quat, Vec3};

use crate::reconciliation_config::ReconciliationConfig;

/// Error magnitudes observed by the last correction, plus running peaks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CorrectionDiagnostics {
    pub frames: u64,
    /// Distance between the presented pose and the shadow before correction
    pub position_error: f32,
    /// Angle, in radians, between the presented pose and the shadow before
    /// correction
    pub rotation_error: f32,
    pub peak_position_error: f32,
    pub peak_rotation_error: f32,
    /// Fraction of the position offset removed this frame
    pub position_reduction: f32,
    /// Fraction of the rotation offset removed this frame
    pub rotation_reduction: f32,
}

/// Linear interpolation between the retention factor used near zero error
/// and the one used at the reference magnitude
#[derive(Clone, Copy, Debug, PartialEq)]
struct Decay {
    keep_near: f32,
    keep_far: f32,
    reference: f32,
}

impl Decay {
    fn new(min_reduction: u8, max_reduction: u8, reference: f32) -> Self {
        Self {
            keep_near: 1.0 - f32::from(min_reduction) / 100.0,
            keep_far: 1.0 - f32::from(max_reduction) / 100.0,
            reference,
        }
    }

    fn keep(&self, magnitude: f32) -> f32 {
        let t = (magnitude / self.reference).clamp(0.0, 1.0);
        self.keep_near + (self.keep_far - self.keep_near) * t
    }
}

/// Exponential error correction between where a body is presented and where
/// its shadow says it is. The offset carried from frame to frame is blended
/// towards each newly measured error, then decayed by a retention factor
/// that depends on how large the offset is.
#[derive(Clone, Debug)]
pub struct ErrorCorrection {
    position_smoothing: f32,
    rotation_smoothing: f32,
    position_decay: Decay,
    rotation_decay: Decay,
    position_offset: Vec3,
    rotation_offset: Quat,
    diagnostics: Option<CorrectionDiagnostics>,
}

impl ErrorCorrection {
    /// Expects a validated config
    pub fn new(config: &ReconciliationConfig) -> Self {
        Self {
            position_smoothing: f32::from(config.position_smoothing) / 100.0,
            rotation_smoothing: f32::from(config.rotation_smoothing) / 100.0,
            position_decay: Decay::new(
                config.min_position_reduction,
                config.max_position_reduction,
                config.max_reduction_at_distance,
            ),
            rotation_decay: Decay::new(
                config.min_rotation_reduction,
                config.max_rotation_reduction,
                config.max_reduction_at_angle,
            ),
            position_offset: Vec3::ZERO,
            rotation_offset: Quat::IDENTITY,
            diagnostics: config.diagnostics.then(CorrectionDiagnostics::default),
        }
    }

    pub fn position_offset(&self) -> Vec3 {
        self.position_offset
    }

    /// Offset in the shadow's local frame
    pub fn rotation_offset(&self) -> Quat {
        self.rotation_offset
    }

    /// `None` unless diagnostics were enabled
    pub fn diagnostics(&self) -> Option<&CorrectionDiagnostics> {
        self.diagnostics.as_ref()
    }

    /// Measures the error between the pose presented last frame and the
    /// current shadow pose, updates the carried offsets and returns the pose
    /// to present this frame.
    pub fn correct(&mut self, presented: Pose, shadow: Pose) -> Pose {
        let position_error = presented.position - shadow.position;
        let rotation_error = (shadow.rotation.inverse() * presented.rotation).normalize();

        self.position_offset +=
            (1.0 - self.position_smoothing) * (position_error - self.position_offset);
        let remaining = self.rotation_offset.inverse() * rotation_error;
        self.rotation_offset = (self.rotation_offset
            * Quat::IDENTITY.slerp(remaining, 1.0 - self.rotation_smoothing))
        .normalize();

        let position_keep = self.position_decay.keep(self.position_offset.length());
        let rotation_keep = self.rotation_decay.keep(offset_angle(self.rotation_offset));

        self.position_offset *= position_keep;
        self.rotation_offset = Quat::IDENTITY.slerp(self.rotation_offset, rotation_keep).normalize();

        if let Some(diagnostics) = self.diagnostics.as_mut() {
            let position_magnitude = position_error.length();
            let rotation_magnitude = offset_angle(rotation_error);
            diagnostics.frames += 1;
            diagnostics.position_error = position_magnitude;
            diagnostics.rotation_error = rotation_magnitude;
            diagnostics.peak_position_error = diagnostics.peak_position_error.max(position_magnitude);
            diagnostics.peak_rotation_error = diagnostics.peak_rotation_error.max(rotation_magnitude);
            diagnostics.position_reduction = 1.0 - position_keep;
            diagnostics.rotation_reduction = 1.0 - rotation_keep;
            debug!(
                "frame {}: position error {:.4} (peak {:.4}, reduced {:.0}%), rotation error {:.4} rad (peak {:.4}, reduced {:.0}%)",
                diagnostics.frames,
                position_magnitude,
                diagnostics.peak_position_error,
                diagnostics.position_reduction * 100.0,
                rotation_magnitude,
                diagnostics.peak_rotation_error,
                diagnostics.rotation_reduction * 100.0,
            );
        }

        Pose {
            position: shadow.position + self.position_offset,
            rotation: (shadow.rotation * self.rotation_offset).normalize(),
        }
    }

    /// Drops any carried offset so the next frame presents the shadow as is
    pub fn reset(&mut self) {
        self.position_offset = Vec3::ZERO;
        self.rotation_offset = Quat::IDENTITY;
    }
}

// q and -q are the same rotation
fn offset_angle(rotation: Quat) -> f32 {
    2.0 * rotation.w.abs().min(1.0).acos()
}
