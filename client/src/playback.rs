use log::trace;

use keel_shared::{DecodedUpdate, Quat, RigidBody, Vec3};

use crate::sample_buffer::SampleBuffer;

/// One sample queue per replicated quantity. Each queue is drained
/// independently, one sample per fixed tick.
#[derive(Clone, Debug, Default)]
pub struct PlaybackBuffers {
    position: SampleBuffer<Vec3>,
    rotation: SampleBuffer<Quat>,
    linear_velocity: SampleBuffer<Vec3>,
    angular_velocity: SampleBuffer<Vec3>,
}

impl PlaybackBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
            && self.rotation.is_empty()
            && self.linear_velocity.is_empty()
            && self.angular_velocity.is_empty()
    }

    pub fn position(&self) -> &SampleBuffer<Vec3> {
        &self.position
    }

    pub fn rotation(&self) -> &SampleBuffer<Quat> {
        &self.rotation
    }

    pub fn linear_velocity(&self) -> &SampleBuffer<Vec3> {
        &self.linear_velocity
    }

    pub fn angular_velocity(&self) -> &SampleBuffer<Vec3> {
        &self.angular_velocity
    }

    pub(crate) fn push(&mut self, decoded: &DecodedUpdate) {
        if let Some(position) = decoded.position {
            if let Some(dropped) = self.position.push(position) {
                trace!("position buffer full, dropped {:?}", dropped);
            }
        }
        if let Some(rotation) = decoded.rotation {
            if let Some(dropped) = self.rotation.push(rotation) {
                trace!("rotation buffer full, dropped {:?}", dropped);
            }
        }
        if let Some(velocity) = decoded.linear_velocity {
            if let Some(dropped) = self.linear_velocity.push(velocity) {
                trace!("linear velocity buffer full, dropped {:?}", dropped);
            }
        }
        if let Some(velocity) = decoded.angular_velocity {
            if let Some(dropped) = self.angular_velocity.push(velocity) {
                trace!("angular velocity buffer full, dropped {:?}", dropped);
            }
        }
    }

    /// Pops the oldest sample of every non-empty queue into the body.
    /// Quantities with an empty queue keep their last applied value.
    pub(crate) fn play_next<B: RigidBody>(&mut self, body: &mut B) {
        let next = DecodedUpdate {
            position: self.position.pop(),
            rotation: self.rotation.pop(),
            linear_velocity: self.linear_velocity.pop(),
            angular_velocity: self.angular_velocity.pop(),
        };
        next.apply_to(body);
    }

    pub(crate) fn clear(&mut self) {
        self.position.clear();
        self.rotation.clear();
        self.linear_velocity.clear();
        self.angular_velocity.clear();
    }
}
