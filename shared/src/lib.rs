//! # Keel Shared
//! Quantized physics codec, replicated record types and authority primitives
//! shared between keel-server & keel-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use glam::{DVec3, Quat, Vec3};
pub use keel_serde::{BitReader, BitWriter, Serde, SerdeErr};

mod authority;
pub mod codec;
mod config;
mod record;
mod rigid_body;
mod timer;
mod types;

pub use authority::{
    Authority, AuthorityAccessor, AuthorityChannel, AuthorityError, AuthorityMutator,
    AuthorityRole, AuthoritySnapshot, AuthorityTransition,
};
pub use codec::DecodeError;
pub use config::{check_interval, check_percent, check_positive, check_tolerance, ConfigError};
pub use record::{DecodedUpdate, PhysicsUpdate, ReplicatedPhysicsRecord};
pub use rigid_body::{DetachedBody, Pose, RigidBody, RigidBodyState};
pub use timer::RepeatingTimer;
pub use types::QuantityKind;
