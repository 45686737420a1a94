use log::{trace, warn};

use keel_shared::{
    codec::{decode_quaternion, decode_vector3, decode_velocity},
    Authority, AuthorityAccessor, AuthorityError, AuthorityRole, AuthorityTransition, DecodeError,
    DecodedUpdate, PhysicsUpdate, QuantityKind, ReplicatedPhysicsRecord, RigidBody,
};

use crate::error::SinkError;

/// What a sink did with an incoming payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkOutcome {
    Applied,
    /// The local solver owns the body; the payload was dropped
    Ignored,
}

/// Applies replicated updates to a simulation worker's copy of the body
/// while another worker is authoritative for it.
///
/// While not authoritative the body is kinematic and every decoded value is
/// written straight into it. Once authority is gained the body returns to
/// the solver and updates are ignored.
pub struct NonAuthoritativeSink {
    role: AuthorityRole,
}

impl NonAuthoritativeSink {
    pub fn new(accessor: AuthorityAccessor) -> Self {
        Self {
            role: AuthorityRole::new("NonAuthoritativeSink", accessor),
        }
    }

    pub fn authority(&self) -> Authority {
        self.role.authority()
    }

    /// Picks up any pending authority change and hands the body to the
    /// matching owner. Called by every event handler; hosts may also call it
    /// at the start of a tick.
    pub fn sync_authority<B: RigidBody>(
        &mut self,
        body: &mut B,
    ) -> Result<Option<AuthorityTransition>, AuthorityError> {
        let transition = self.role.refresh()?;
        match transition {
            Some(AuthorityTransition::Gained) => body.set_kinematic(false),
            Some(AuthorityTransition::Lost) => body.set_kinematic(true),
            None => {}
        }
        Ok(transition)
    }

    /// Brings a body that just joined the simulation up to the published
    /// state. Decodes the whole record first and writes nothing if any
    /// field is malformed.
    pub fn on_enable<B: RigidBody>(
        &mut self,
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<SinkOutcome, SinkError> {
        self.receive(body, QuantityKind::Position, || {
            let state = record.decode()?;
            Ok(DecodedUpdate {
                position: Some(state.position),
                rotation: Some(state.rotation),
                linear_velocity: Some(state.linear_velocity),
                angular_velocity: Some(state.angular_velocity),
            })
        })
    }

    pub fn on_position_updated<B: RigidBody>(
        &mut self,
        bytes: &[u8],
        body: &mut B,
    ) -> Result<SinkOutcome, SinkError> {
        self.receive(body, QuantityKind::Position, || {
            Ok(DecodedUpdate {
                position: Some(decode_vector3(bytes)?),
                ..DecodedUpdate::default()
            })
        })
    }

    pub fn on_rotation_updated<B: RigidBody>(
        &mut self,
        bytes: &[u8],
        body: &mut B,
    ) -> Result<SinkOutcome, SinkError> {
        self.receive(body, QuantityKind::Rotation, || {
            Ok(DecodedUpdate {
                rotation: Some(decode_quaternion(bytes)?),
                ..DecodedUpdate::default()
            })
        })
    }

    /// Decodes against the record's current max, which may have been raised
    /// by the same message that carried these bytes
    pub fn on_linear_velocity_updated<B: RigidBody>(
        &mut self,
        bytes: &[u8],
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<SinkOutcome, SinkError> {
        let max = record.max_linear_velocity;
        self.receive(body, QuantityKind::LinearVelocity, || {
            Ok(DecodedUpdate {
                linear_velocity: Some(decode_velocity(bytes, max, QuantityKind::LinearVelocity)?),
                ..DecodedUpdate::default()
            })
        })
    }

    pub fn on_angular_velocity_updated<B: RigidBody>(
        &mut self,
        bytes: &[u8],
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<SinkOutcome, SinkError> {
        let max = record.max_angular_velocity;
        self.receive(body, QuantityKind::AngularVelocity, || {
            Ok(DecodedUpdate {
                angular_velocity: Some(decode_velocity(
                    bytes,
                    max,
                    QuantityKind::AngularVelocity,
                )?),
                ..DecodedUpdate::default()
            })
        })
    }

    /// Applies every field of a multi-field update, or none of them
    pub fn on_update<B: RigidBody>(
        &mut self,
        update: &PhysicsUpdate,
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<SinkOutcome, SinkError> {
        let kind = QuantityKind::ALL
            .into_iter()
            .find(|kind| update.has(*kind))
            .unwrap_or(QuantityKind::Position);
        self.receive(body, kind, || update.decode(record))
    }

    /// Stops reacting to updates for good
    pub fn teardown(&mut self) {
        self.role.teardown();
    }

    fn receive<B: RigidBody>(
        &mut self,
        body: &mut B,
        kind: QuantityKind,
        decode: impl FnOnce() -> Result<DecodedUpdate, DecodeError>,
    ) -> Result<SinkOutcome, SinkError> {
        self.sync_authority(body)?;

        match self.role.require_not_authoritative("apply a remote update") {
            Ok(()) => {}
            Err(AuthorityError::Authoritative { .. }) => {
                trace!("ignoring remote {} while authoritative", kind);
                return Ok(SinkOutcome::Ignored);
            }
            Err(error) => return Err(error.into()),
        }

        let decoded = decode().map_err(|error| {
            warn!("discarding malformed {} update: {}", error.kind(), error);
            error
        })?;
        decoded.apply_to(body);
        Ok(SinkOutcome::Applied)
    }
}
