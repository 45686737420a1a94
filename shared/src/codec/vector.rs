use glam::Vec3;

use keel_serde::{BitReader, BitWriter, Serde, SignedInteger};

use crate::{
    codec::error::{check_length, DecodeError},
    types::QuantityKind,
};

type PositionAxis = SignedInteger<31>;

/// Quantization steps per world unit
pub const POSITION_SCALE: f64 = 1024.0;
/// Largest difference between an axis and its decoded value
pub const POSITION_EPSILON: f32 = 0.5 / 1024.0;
pub const VECTOR3_BYTES: usize = 12;

/// Encodes a vector at a fixed 1/1024 unit precision. Axes beyond
/// ±2^31/1024 are clamped and NaN encodes as zero.
pub fn encode_vector3(value: Vec3) -> Vec<u8> {
    let mut writer = BitWriter::new();
    for axis in value.to_array() {
        let steps = (f64::from(axis) * POSITION_SCALE).round() as i64;
        PositionAxis::saturating(steps).ser(&mut writer);
    }
    writer.to_bytes()
}

pub fn decode_vector3(bytes: &[u8]) -> Result<Vec3, DecodeError> {
    let kind = QuantityKind::Position;
    check_length(kind, bytes, VECTOR3_BYTES)?;

    let mut reader = BitReader::new(bytes);
    let mut axes = [0f32; 3];
    for axis in axes.iter_mut() {
        let steps = PositionAxis::de(&mut reader)
            .map_err(|source| DecodeError::Truncated { kind, source })?;
        *axis = (steps.get() as f64 / POSITION_SCALE) as f32;
    }
    Ok(Vec3::from_array(axes))
}
