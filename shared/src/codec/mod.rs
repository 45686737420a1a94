//! Quantized encodings of the replicated physical quantities.
//!
//! Every function here is pure: the same input always produces the same
//! bytes, and decoding never touches any state. Payload sizes are fixed per
//! quantity, so a payload of any other length is rejected before reading.
//!
//! | quantity  | layout                                    | bytes | max error            |
//! |-----------|-------------------------------------------|-------|----------------------|
//! | vector    | 3 × (sign + 31 bits) at 1/1024 unit       | 12    | 1/2048 unit per axis |
//! | rotation  | 2-bit index + 3 × (sign + 15 bits)        | 7     | ~1.1e-5 per component|
//! | velocity  | 3 × (sign + 15 bits) as fraction of `max` | 6     | max/65534 per axis   |

mod error;
mod quaternion;
mod vector;
mod velocity;

pub use error::DecodeError;
pub use quaternion::{decode_quaternion, encode_quaternion, QUATERNION_BYTES};
pub use vector::{
    decode_vector3, encode_vector3, POSITION_EPSILON, POSITION_SCALE, VECTOR3_BYTES,
};
pub use velocity::{decode_velocity, encode_velocity, velocity_epsilon, VELOCITY_BYTES};
