use thiserror::Error;

use keel_serde::SerdeErr;

use crate::types::QuantityKind;

/// Errors that can occur while decoding a quantized payload.
/// A payload that fails to decode must be discarded as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload has the wrong size for its quantity
    #[error("{kind} payload must be {expected} bytes, got {actual}")]
    InvalidLength {
        kind: QuantityKind,
        expected: usize,
        actual: usize,
    },

    /// Payload ended before every field could be read
    #[error("{kind} payload ended early")]
    Truncated {
        kind: QuantityKind,
        #[source]
        source: SerdeErr,
    },

    /// Velocity scale is NaN or infinite
    #[error("max {kind} is not a finite number")]
    NonFiniteMax { kind: QuantityKind },
}

impl DecodeError {
    /// Which quantity failed to decode
    pub fn kind(&self) -> QuantityKind {
        match self {
            DecodeError::InvalidLength { kind, .. }
            | DecodeError::Truncated { kind, .. }
            | DecodeError::NonFiniteMax { kind } => *kind,
        }
    }
}

pub(crate) fn check_length(
    kind: QuantityKind,
    bytes: &[u8],
    expected: usize,
) -> Result<(), DecodeError> {
    if bytes.len() != expected {
        return Err(DecodeError::InvalidLength {
            kind,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
