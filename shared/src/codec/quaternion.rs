use std::f32::consts::FRAC_1_SQRT_2;

use glam::Quat;

use keel_serde::{BitReader, BitWriter, Serde, SerdeErr, SignedInteger, UnsignedInteger};

use crate::{
    codec::error::{check_length, DecodeError},
    types::QuantityKind,
};

type LargestIndex = UnsignedInteger<2>;
type SmallComponent = SignedInteger<15>;

pub const QUATERNION_BYTES: usize = 7;

// The three smaller components of a unit quaternion never exceed 1/sqrt(2)
const SMALL_COMPONENT_STEPS: f32 = SmallComponent::MAX_MAGNITUDE as f32;

/// Encodes a rotation with the "smallest three" scheme: the index of the
/// largest component is stored, and the other three are quantized after
/// flipping the sign of the whole quaternion so the dropped one is positive.
/// Non-finite or zero-length input encodes the identity rotation.
pub fn encode_quaternion(value: Quat) -> Vec<u8> {
    let components = normalized_or_identity(value).to_array();

    let mut largest = 0;
    for index in 1..4 {
        if components[index].abs() > components[largest].abs() {
            largest = index;
        }
    }
    let sign = if components[largest] < 0.0 { -1.0 } else { 1.0 };

    let mut writer = BitWriter::new();
    LargestIndex::saturating(largest as i64).ser(&mut writer);
    for (index, component) in components.iter().enumerate() {
        if index == largest {
            continue;
        }
        let steps = (component * sign / FRAC_1_SQRT_2 * SMALL_COMPONENT_STEPS).round() as i64;
        SmallComponent::saturating(steps).ser(&mut writer);
    }
    writer.to_bytes()
}

/// Decodes a rotation and re-normalizes it. The result may be the negation
/// of the encoded quaternion, which describes the same rotation.
pub fn decode_quaternion(bytes: &[u8]) -> Result<Quat, DecodeError> {
    let kind = QuantityKind::Rotation;
    check_length(kind, bytes, QUATERNION_BYTES)?;

    let mut reader = BitReader::new(bytes);
    let truncated = |source: SerdeErr| DecodeError::Truncated { kind, source };

    let largest = LargestIndex::de(&mut reader).map_err(truncated)?.get() as usize;

    let mut components = [0f32; 4];
    let mut sum_of_squares = 0.0;
    for (index, component) in components.iter_mut().enumerate() {
        if index == largest {
            continue;
        }
        let steps = SmallComponent::de(&mut reader).map_err(truncated)?;
        *component = steps.get() as f32 / SMALL_COMPONENT_STEPS * FRAC_1_SQRT_2;
        sum_of_squares += *component * *component;
    }
    components[largest] = (1.0 - sum_of_squares).max(0.0).sqrt();

    Ok(Quat::from_array(components).normalize())
}

fn normalized_or_identity(value: Quat) -> Quat {
    if !value.is_finite() || value.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    value.normalize()
}
