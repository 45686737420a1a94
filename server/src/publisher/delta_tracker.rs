use log::{trace, warn};

use keel_shared::{
    codec::{
        decode_quaternion, decode_vector3, decode_velocity, encode_quaternion, encode_vector3,
        encode_velocity,
    },
    DecodeError, PhysicsUpdate, QuantityKind, RigidBody, RigidBodyState, Vec3,
};

use crate::worker_config::DeltaConfig;

/// Decides each tick which quantities go into the outgoing update.
///
/// `last_sent` holds what receivers can reconstruct, i.e. the re-decoded
/// value of every field sent so far. The live body is snapped to the same
/// quantized value, so later comparisons measure real motion instead of
/// quantization noise.
pub struct DeltaTracker {
    config: DeltaConfig,
    last_sent: RigidBodyState,
    max_linear_velocity: f32,
    max_angular_velocity: f32,
}

impl DeltaTracker {
    pub fn new(config: DeltaConfig) -> Self {
        Self {
            config,
            last_sent: RigidBodyState::default(),
            max_linear_velocity: 0.0,
            max_angular_velocity: 0.0,
        }
    }

    /// Starts a new authority period from the published state. A max that
    /// is negative or not finite cannot scale velocities, so it restarts
    /// from zero and grows again with the first observed velocity.
    pub fn reset(&mut self, last_sent: RigidBodyState, max_linear: f32, max_angular: f32) {
        self.last_sent = last_sent;
        self.max_linear_velocity = usable_max(max_linear, QuantityKind::LinearVelocity);
        self.max_angular_velocity = usable_max(max_angular, QuantityKind::AngularVelocity);
    }

    pub fn last_sent(&self) -> &RigidBodyState {
        &self.last_sent
    }

    pub fn max_linear_velocity(&self) -> f32 {
        self.max_linear_velocity
    }

    pub fn max_angular_velocity(&self) -> f32 {
        self.max_angular_velocity
    }

    /// Builds the update for this tick. Returns an empty update when no
    /// field changed beyond its tolerance. Neither the body nor the tracker
    /// is touched unless every dirty field encodes and decodes cleanly.
    pub fn collect<B: RigidBody>(&mut self, body: &mut B) -> Result<PhysicsUpdate, DecodeError> {
        let mut update = PhysicsUpdate::default();
        let mut sent = self.last_sent;
        let mut max_linear = self.max_linear_velocity;
        let mut max_angular = self.max_angular_velocity;

        let position = body.position();
        if changed(
            &position.to_array(),
            &sent.position.to_array(),
            self.config.position_epsilon,
        ) {
            let encoded = encode_vector3(position);
            sent.position = decode_vector3(&encoded)?;
            update.position = Some(encoded);
        }

        let rotation = body.rotation();
        if changed(
            &rotation.to_array(),
            &sent.rotation.to_array(),
            self.config.rotation_epsilon,
        ) {
            let encoded = encode_quaternion(rotation);
            sent.rotation = decode_quaternion(&encoded)?;
            update.rotation = Some(encoded);
        }

        let velocity = body.linear_velocity();
        if changed(
            &velocity.to_array(),
            &sent.linear_velocity.to_array(),
            self.config.linear_velocity_epsilon,
        ) {
            if raise_max(&mut max_linear, velocity) {
                update.max_linear_velocity = Some(max_linear);
            }
            let encoded = encode_velocity(velocity, max_linear);
            sent.linear_velocity =
                decode_velocity(&encoded, max_linear, QuantityKind::LinearVelocity)?;
            update.linear_velocity = Some(encoded);
        }

        let velocity = body.angular_velocity();
        if changed(
            &velocity.to_array(),
            &sent.angular_velocity.to_array(),
            self.config.angular_velocity_epsilon,
        ) {
            if raise_max(&mut max_angular, velocity) {
                update.max_angular_velocity = Some(max_angular);
            }
            let encoded = encode_velocity(velocity, max_angular);
            sent.angular_velocity =
                decode_velocity(&encoded, max_angular, QuantityKind::AngularVelocity)?;
            update.angular_velocity = Some(encoded);
        }

        if update.is_empty() {
            return Ok(update);
        }

        if update.position.is_some() {
            body.set_position(sent.position);
        }
        if update.rotation.is_some() {
            body.set_rotation(sent.rotation);
        }
        if update.linear_velocity.is_some() {
            body.set_linear_velocity(sent.linear_velocity);
        }
        if update.angular_velocity.is_some() {
            body.set_angular_velocity(sent.angular_velocity);
        }
        self.last_sent = sent;
        self.max_linear_velocity = max_linear;
        self.max_angular_velocity = max_angular;

        trace!(
            "dirty fields: position={} rotation={} linear={} angular={}",
            update.position.is_some(),
            update.rotation.is_some(),
            update.linear_velocity.is_some(),
            update.angular_velocity.is_some(),
        );
        Ok(update)
    }
}

// A NaN component always counts as changed
fn changed(current: &[f32], last: &[f32], epsilon: f32) -> bool {
    current.iter().zip(last).any(|(current, last)| {
        let difference = (current - last).abs();
        current != last && (difference.is_nan() || difference > epsilon)
    })
}

fn usable_max(max: f32, kind: QuantityKind) -> f32 {
    if max.is_finite() && max >= 0.0 {
        return max;
    }
    warn!("published {} max {} is unusable, restarting from zero", kind, max);
    0.0
}

fn raise_max(max: &mut f32, velocity: Vec3) -> bool {
    let observed = velocity.abs().max_element();
    if observed.is_finite() && observed > *max {
        *max = observed;
        return true;
    }
    false
}
