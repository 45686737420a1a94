use log::{info, warn};

use keel_shared::{
    codec::{decode_quaternion, decode_vector3, decode_velocity},
    ConfigError, DecodeError, DecodedUpdate, DetachedBody, PhysicsUpdate, Pose, QuantityKind,
    ReplicatedPhysicsRecord, RigidBody,
};

use crate::{
    error::ReconcileError, error_correction::ErrorCorrection, playback::PlaybackBuffers,
    reconciliation_config::ReconciliationConfig,
};

/// Viewer side presentation of a body simulated elsewhere.
///
/// Decoded samples drive a shadow body, either through the playback buffers
/// (drained one sample per fixed tick) or directly as they arrive. Every
/// render frame the presented pose is pulled towards the shadow by
/// [`ErrorCorrection`], so corrections from the network never show up as a
/// visible snap.
pub struct RemoteReconciliationSink<B: RigidBody = DetachedBody> {
    use_buffering: bool,
    buffers: PlaybackBuffers,
    shadow: B,
    correction: ErrorCorrection,
    presented: Pose,
    torn_down: bool,
}

impl<B: RigidBody> RemoteReconciliationSink<B> {
    /// Starts presenting the shadow exactly where it currently is
    pub fn new(config: &ReconciliationConfig, shadow: B) -> Result<Self, ConfigError> {
        config.validate()?;
        let presented = shadow.pose();
        Ok(Self {
            use_buffering: config.use_buffering,
            buffers: PlaybackBuffers::new(),
            shadow,
            correction: ErrorCorrection::new(config),
            presented,
            torn_down: false,
        })
    }

    pub fn on_position_updated(&mut self, bytes: &[u8]) -> Result<(), ReconcileError> {
        self.receive("position update", QuantityKind::Position, || {
            Ok(DecodedUpdate {
                position: Some(decode_vector3(bytes)?),
                ..DecodedUpdate::default()
            })
        })
    }

    pub fn on_rotation_updated(&mut self, bytes: &[u8]) -> Result<(), ReconcileError> {
        self.receive("rotation update", QuantityKind::Rotation, || {
            Ok(DecodedUpdate {
                rotation: Some(decode_quaternion(bytes)?),
                ..DecodedUpdate::default()
            })
        })
    }

    /// Decodes against the max currently held by `record`
    pub fn on_linear_velocity_updated(
        &mut self,
        bytes: &[u8],
        record: &ReplicatedPhysicsRecord,
    ) -> Result<(), ReconcileError> {
        let kind = QuantityKind::LinearVelocity;
        self.receive("linear velocity update", kind, || {
            Ok(DecodedUpdate {
                linear_velocity: Some(decode_velocity(bytes, record.max_linear_velocity, kind)?),
                ..DecodedUpdate::default()
            })
        })
    }

    /// Decodes against the max currently held by `record`
    pub fn on_angular_velocity_updated(
        &mut self,
        bytes: &[u8],
        record: &ReplicatedPhysicsRecord,
    ) -> Result<(), ReconcileError> {
        let kind = QuantityKind::AngularVelocity;
        self.receive("angular velocity update", kind, || {
            Ok(DecodedUpdate {
                angular_velocity: Some(decode_velocity(bytes, record.max_angular_velocity, kind)?),
                ..DecodedUpdate::default()
            })
        })
    }

    /// Accepts a whole update at once. If any field fails to decode, none of
    /// them are used.
    pub fn on_update(
        &mut self,
        update: &PhysicsUpdate,
        record: &ReplicatedPhysicsRecord,
    ) -> Result<(), ReconcileError> {
        if self.torn_down {
            return Err(ReconcileError::TornDown { operation: "update" });
        }
        match update.decode(record) {
            Ok(decoded) => {
                self.accept(&decoded);
                Ok(())
            }
            Err(error) => {
                warn!("discarding update: {}", error);
                Err(error.into())
            }
        }
    }

    /// Stage A, run once per fixed physics step. Plays back the oldest
    /// buffered sample of each quantity into the shadow body.
    pub fn fixed_tick(&mut self) {
        if self.torn_down || !self.use_buffering {
            return;
        }
        self.buffers.play_next(&mut self.shadow);
    }

    /// Stage B, run once per render frame. Returns the pose to present.
    pub fn frame(&mut self) -> Pose {
        if self.torn_down {
            return self.presented;
        }
        self.presented = self.correction.correct(self.presented, self.shadow.pose());
        self.presented
    }

    pub fn presented(&self) -> Pose {
        self.presented
    }

    /// Overrides the presented pose, e.g. after the host teleported the
    /// visual. The next frame measures its error from here.
    pub fn set_presented(&mut self, pose: Pose) {
        self.presented = pose;
    }

    pub fn shadow(&self) -> &B {
        &self.shadow
    }

    pub fn shadow_mut(&mut self) -> &mut B {
        &mut self.shadow
    }

    pub fn buffers(&self) -> &PlaybackBuffers {
        &self.buffers
    }

    pub fn correction(&self) -> &ErrorCorrection {
        &self.correction
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Stops consuming updates and drops anything still queued
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.buffers.clear();
        info!("reconciliation sink torn down");
    }

    fn receive(
        &mut self,
        operation: &'static str,
        kind: QuantityKind,
        decode: impl FnOnce() -> Result<DecodedUpdate, DecodeError>,
    ) -> Result<(), ReconcileError> {
        if self.torn_down {
            return Err(ReconcileError::TornDown { operation });
        }
        match decode() {
            Ok(decoded) => {
                self.accept(&decoded);
                Ok(())
            }
            Err(error) => {
                warn!("discarding {} payload: {}", kind, error);
                Err(error.into())
            }
        }
    }

    fn accept(&mut self, decoded: &DecodedUpdate) {
        if self.use_buffering {
            self.buffers.push(decoded);
        } else {
            decoded.apply_to(&mut self.shadow);
        }
    }
}
