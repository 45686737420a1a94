use glam::{Quat, Vec3};
use log::trace;

use crate::{
    codec::{
        decode_quaternion, decode_vector3, decode_velocity, encode_quaternion, encode_vector3,
        encode_velocity, DecodeError,
    },
    rigid_body::{RigidBody, RigidBodyState},
    types::QuantityKind,
};

/// Wire-visible physics properties of one entity, as last seen by this
/// process. The max velocity fields never decrease.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplicatedPhysicsRecord {
    pub position: Vec<u8>,
    pub rotation: Vec<u8>,
    pub linear_velocity: Vec<u8>,
    pub angular_velocity: Vec<u8>,
    pub max_linear_velocity: f32,
    pub max_angular_velocity: f32,
}

impl ReplicatedPhysicsRecord {
    /// Builds the initial record of a freshly spawned entity
    pub fn from_state(state: &RigidBodyState) -> Self {
        let max_linear_velocity = state.linear_velocity.abs().max_element();
        let max_angular_velocity = state.angular_velocity.abs().max_element();
        Self {
            position: encode_vector3(state.position),
            rotation: encode_quaternion(state.rotation),
            linear_velocity: encode_velocity(state.linear_velocity, max_linear_velocity),
            angular_velocity: encode_velocity(state.angular_velocity, max_angular_velocity),
            max_linear_velocity,
            max_angular_velocity,
        }
    }

    /// Merges an update into the record, max fields first
    pub fn apply(&mut self, update: &PhysicsUpdate) {
        if let Some(max) = update.max_linear_velocity {
            self.max_linear_velocity = self.max_linear_velocity.max(max);
        }
        if let Some(max) = update.max_angular_velocity {
            self.max_angular_velocity = self.max_angular_velocity.max(max);
        }
        if let Some(bytes) = &update.position {
            self.position.clone_from(bytes);
        }
        if let Some(bytes) = &update.rotation {
            self.rotation.clone_from(bytes);
        }
        if let Some(bytes) = &update.linear_velocity {
            self.linear_velocity.clone_from(bytes);
        }
        if let Some(bytes) = &update.angular_velocity {
            self.angular_velocity.clone_from(bytes);
        }
    }

    /// Decodes all four fields. Fails as a whole if any field is malformed.
    pub fn decode(&self) -> Result<RigidBodyState, DecodeError> {
        Ok(RigidBodyState {
            position: decode_vector3(&self.position)?,
            rotation: decode_quaternion(&self.rotation)?,
            linear_velocity: decode_velocity(
                &self.linear_velocity,
                self.max_linear_velocity,
                QuantityKind::LinearVelocity,
            )?,
            angular_velocity: decode_velocity(
                &self.angular_velocity,
                self.max_angular_velocity,
                QuantityKind::AngularVelocity,
            )?,
        })
    }

    pub fn encoded(&self, kind: QuantityKind) -> &[u8] {
        match kind {
            QuantityKind::Position => &self.position,
            QuantityKind::Rotation => &self.rotation,
            QuantityKind::LinearVelocity => &self.linear_velocity,
            QuantityKind::AngularVelocity => &self.angular_velocity,
        }
    }
}

impl Default for ReplicatedPhysicsRecord {
    fn default() -> Self {
        Self::from_state(&RigidBodyState::default())
    }
}

/// One outgoing physics message. Only dirty fields are present; a raised
/// max velocity travels in the same message as the sample that needs it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicsUpdate {
    pub position: Option<Vec<u8>>,
    pub rotation: Option<Vec<u8>>,
    pub linear_velocity: Option<Vec<u8>>,
    pub angular_velocity: Option<Vec<u8>>,
    pub max_linear_velocity: Option<f32>,
    pub max_angular_velocity: Option<f32>,
}

impl PhysicsUpdate {
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.linear_velocity.is_none()
            && self.angular_velocity.is_none()
            && self.max_linear_velocity.is_none()
            && self.max_angular_velocity.is_none()
    }

    pub fn has(&self, kind: QuantityKind) -> bool {
        match kind {
            QuantityKind::Position => self.position.is_some(),
            QuantityKind::Rotation => self.rotation.is_some(),
            QuantityKind::LinearVelocity => self.linear_velocity.is_some(),
            QuantityKind::AngularVelocity => self.angular_velocity.is_some(),
        }
    }

    /// Decodes every present field. Velocities use the max carried by this
    /// update when there is one, otherwise the record's current max.
    /// Nothing is returned unless every present field decodes.
    pub fn decode(&self, record: &ReplicatedPhysicsRecord) -> Result<DecodedUpdate, DecodeError> {
        let max_linear = self
            .max_linear_velocity
            .unwrap_or(record.max_linear_velocity);
        let max_angular = self
            .max_angular_velocity
            .unwrap_or(record.max_angular_velocity);

        let decoded = DecodedUpdate {
            position: self.position.as_deref().map(decode_vector3).transpose()?,
            rotation: self.rotation.as_deref().map(decode_quaternion).transpose()?,
            linear_velocity: self
                .linear_velocity
                .as_deref()
                .map(|bytes| decode_velocity(bytes, max_linear, QuantityKind::LinearVelocity))
                .transpose()?,
            angular_velocity: self
                .angular_velocity
                .as_deref()
                .map(|bytes| decode_velocity(bytes, max_angular, QuantityKind::AngularVelocity))
                .transpose()?,
        };
        Ok(decoded)
    }
}

/// Decoded counterpart of a `PhysicsUpdate`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecodedUpdate {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub linear_velocity: Option<Vec3>,
    pub angular_velocity: Option<Vec3>,
}

impl DecodedUpdate {
    pub fn apply_to<B: RigidBody>(&self, body: &mut B) {
        if let Some(position) = self.position {
            body.set_position(position);
        }
        if let Some(rotation) = self.rotation {
            body.set_rotation(rotation);
        }
        if let Some(velocity) = self.linear_velocity {
            body.set_linear_velocity(velocity);
        }
        if let Some(velocity) = self.angular_velocity {
            body.set_angular_velocity(velocity);
        }
        trace!("applied decoded update {:?}", self);
    }
}
