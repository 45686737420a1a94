//! # Keel Server
//! Simulation-worker roles: the authoritative publisher, which turns a rigid
//! body's state into quantized updates, and the non-authoritative sink,
//! which applies those updates to a kinematic copy of the body.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod error;
mod publisher;
mod worker_config;
mod worker_sink;

pub use error::{PublishError, SinkError};
pub use publisher::{
    AbsolutePositionRequest, AbsolutePositionResponse, AuthoritativePublisher,
    CoordinatesRecord, CoordinatesUpdate, DeltaTracker,
};
pub use worker_config::{DeltaConfig, WorkerConfig};
pub use worker_sink::{NonAuthoritativeSink, SinkOutcome};
