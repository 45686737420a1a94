//! # Keel Client
//! Viewer side of keel. Replicated samples of a remotely simulated rigid
//! body are buffered, played back into a shadow body, and presented through
//! exponential error correction.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod error;
mod error_correction;
mod playback;
mod reconciliation_config;
mod remote_sink;
mod sample_buffer;

pub use error::ReconcileError;
pub use error_correction::{CorrectionDiagnostics, ErrorCorrection};
pub use playback::PlaybackBuffers;
pub use reconciliation_config::ReconciliationConfig;
pub use remote_sink::RemoteReconciliationSink;
pub use sample_buffer::{SampleBuffer, SAMPLE_BUFFER_CAPACITY};
