use thiserror::Error;

use keel_shared::DecodeError;

/// Errors raised by the viewer side reconciliation sink
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    /// An update payload could not be decoded and was discarded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The sink was torn down and accepts no further input
    #[error("reconciliation sink is torn down, refused {operation}")]
    TornDown { operation: &'static str },
}
