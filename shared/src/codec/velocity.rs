use glam::Vec3;

use keel_serde::{BitReader, BitWriter, Serde, SignedInteger};

use crate::{
    codec::error::{check_length, DecodeError},
    types::QuantityKind,
};

type VelocityAxis = SignedInteger<15>;

pub const VELOCITY_BYTES: usize = 6;

const VELOCITY_STEPS: f32 = VelocityAxis::MAX_MAGNITUDE as f32;

/// Largest per-axis error of a velocity encoded against `max`
pub fn velocity_epsilon(max: f32) -> f32 {
    if max > 0.0 {
        max / (2.0 * VELOCITY_STEPS)
    } else {
        0.0
    }
}

/// Encodes each axis as a fraction of `max`, so precision follows the
/// observed range. Axes beyond `±max` are clamped; a non-positive or
/// non-finite `max` encodes zero.
///
/// The receiver must decode with the same `max`. That `max` has to reach it
/// no later than this payload; decoding against an older, smaller value
/// silently scales the result down.
pub fn encode_velocity(value: Vec3, max: f32) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for axis in value.to_array() {
        let steps = if max > 0.0 && max.is_finite() {
            (axis / max * VELOCITY_STEPS).round() as i64
        } else {
            0
        };
        VelocityAxis::saturating(steps).ser(&mut writer);
    }
    writer.to_bytes()
}

pub fn decode_velocity(bytes: &[u8], max: f32, kind: QuantityKind) -> Result<Vec3, DecodeError> {
    check_length(kind, bytes, VELOCITY_BYTES)?;
    if !max.is_finite() {
        return Err(DecodeError::NonFiniteMax { kind });
    }

    let max = max.max(0.0);
    let mut reader = BitReader::new(bytes);
    let mut axes = [0f32; 3];
    for axis in axes.iter_mut() {
        let steps = VelocityAxis::de(&mut reader)
            .map_err(|source| DecodeError::Truncated { kind, source })?;
        *axis = steps.get() as f32 / VELOCITY_STEPS * max;
    }
    Ok(Vec3::from_array(axes))
}
