use std::time::Duration;

use log::{info, trace, warn};

use keel_shared::{
    Authority, AuthorityAccessor, AuthorityRole, AuthorityTransition, ConfigError, PhysicsUpdate,
    RepeatingTimer, ReplicatedPhysicsRecord, RigidBody,
};

use crate::{
    error::PublishError,
    publisher::{
        coordinates::{
            AbsolutePositionRequest, AbsolutePositionResponse, CoordinatesRecord,
            CoordinatesUpdate,
        },
        delta_tracker::DeltaTracker,
    },
    worker_config::WorkerConfig,
};

/// Publishes an entity's rigid body state while this worker is
/// authoritative for it.
///
/// The host calls `tick` after every physics step and `advance_clock` with
/// wall-clock time; the two cadences are independent.
pub struct AuthoritativePublisher {
    role: AuthorityRole,
    tracker: DeltaTracker,
    coordinates_timer: RepeatingTimer,
}

impl AuthoritativePublisher {
    pub fn new(config: &WorkerConfig, accessor: AuthorityAccessor) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            role: AuthorityRole::new("AuthoritativePublisher", accessor),
            tracker: DeltaTracker::new(config.delta.clone()),
            coordinates_timer: RepeatingTimer::new(config.coordinates_interval),
        })
    }

    pub fn authority(&self) -> Authority {
        self.role.authority()
    }

    pub fn tracker(&self) -> &DeltaTracker {
        &self.tracker
    }

    /// Runs the dirty-field pass for one physics tick. Returns the update to
    /// write, or `None` when not authoritative or nothing changed.
    pub fn tick<B: RigidBody>(
        &mut self,
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<Option<PhysicsUpdate>, PublishError> {
        self.sync_authority(record, body)?;
        if !self.role.is_authoritative() {
            return Ok(None);
        }

        let update = self.tracker.collect(body)?;
        if update.is_empty() {
            trace!("nothing changed this tick");
            return Ok(None);
        }
        Ok(Some(update))
    }

    /// Feeds wall-clock time to the coarse position broadcast. Returns an
    /// update once per interval while authoritative, whether or not the
    /// body moved. Authority is re-read before broadcasting, so a worker
    /// that lost the entity since its last tick stays silent.
    pub fn advance_clock<B: RigidBody>(
        &mut self,
        delta: Duration,
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<Option<CoordinatesUpdate>, PublishError> {
        if !self.coordinates_timer.advance(delta) || self.role.is_torn_down() {
            return Ok(None);
        }
        self.sync_authority(record, body)?;
        if !self.role.is_authoritative() {
            return Ok(None);
        }

        let coords = body.position().as_dvec3();
        trace!("broadcasting coordinates {:?}", coords);
        Ok(Some(CoordinatesUpdate { coords }))
    }

    /// Answers an absolute position query from the published coarse record
    pub fn absolute_position(
        &self,
        record: &CoordinatesRecord,
        _request: &AbsolutePositionRequest,
    ) -> AbsolutePositionResponse {
        AbsolutePositionResponse {
            position: record.coords,
        }
    }

    /// Cancels the broadcast and stops publishing for good
    pub fn teardown(&mut self) {
        self.coordinates_timer.cancel();
        self.role.teardown();
    }

    fn sync_authority<B: RigidBody>(
        &mut self,
        record: &ReplicatedPhysicsRecord,
        body: &mut B,
    ) -> Result<(), PublishError> {
        match self.role.refresh()? {
            Some(AuthorityTransition::Gained) => self.on_authority_gained(record, body),
            Some(AuthorityTransition::Lost) => {
                info!("stopped publishing physics");
            }
            None => {}
        }
        Ok(())
    }

    // Picks up where the previous owner left off: the body takes the
    // published state and the max trackers keep the published maxima, so
    // velocities already on the wire stay decodable.
    fn on_authority_gained<B: RigidBody>(&mut self, record: &ReplicatedPhysicsRecord, body: &mut B) {
        body.set_kinematic(false);

        let last_sent = match record.decode() {
            Ok(state) => {
                body.set_state(&state);
                state
            }
            Err(error) => {
                warn!("published physics record is malformed, keeping local state: {}", error);
                body.state()
            }
        };
        self.tracker.reset(
            last_sent,
            record.max_linear_velocity,
            record.max_angular_velocity,
        );
        self.coordinates_timer.reset();
        info!("started publishing physics");
    }
}
