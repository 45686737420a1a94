use std::time::Duration;

use thiserror::Error;

use keel_client::{ReconcileError, ReconciliationConfig, RemoteReconciliationSink};
use keel_server::{
    AuthoritativePublisher, CoordinatesRecord, CoordinatesUpdate, NonAuthoritativeSink,
    PublishError, SinkError, WorkerConfig,
};
use keel_shared::{
    Authority, AuthorityChannel, AuthorityError, AuthorityMutator, ConfigError, DetachedBody,
    PhysicsUpdate, ReplicatedPhysicsRecord, RigidBodyState,
};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Authority(#[from] AuthorityError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("workers {first} and {second} both published in the same tick")]
    SplitBrain { first: usize, second: usize },
}

/// One simulation worker: its authority flag, both roles and its copy of
/// the body
pub struct TestWorker {
    pub mutator: AuthorityMutator,
    pub publisher: AuthoritativePublisher,
    pub sink: NonAuthoritativeSink,
    pub body: DetachedBody,
    pub torn_down: bool,
}

impl TestWorker {
    /// A worker whose body starts at rest at the origin and only learns the
    /// entity's state from the record it is enabled against
    fn enable(
        config: &WorkerConfig,
        record: &ReplicatedPhysicsRecord,
    ) -> Result<Self, HarnessError> {
        let (mutator, accessor) = AuthorityChannel::new_channel(Authority::NotAuthoritative);
        let mut worker = Self {
            mutator,
            publisher: AuthoritativePublisher::new(config, accessor.clone())?,
            sink: NonAuthoritativeSink::new(accessor),
            body: DetachedBody::default(),
            torn_down: false,
        };
        worker.sink.on_enable(record, &mut worker.body)?;
        Ok(worker)
    }
}

/// Loopback replication of a single entity. Updates written by the
/// authoritative worker are merged into the shared record and delivered to
/// every other worker and to one viewer, in order and without loss.
pub struct TestWorld {
    pub worker_config: WorkerConfig,
    pub record: ReplicatedPhysicsRecord,
    pub coordinates: CoordinatesRecord,
    pub workers: Vec<TestWorker>,
    pub viewer: RemoteReconciliationSink,
    pub published: Vec<PhysicsUpdate>,
}

impl TestWorld {
    pub fn new(
        initial: RigidBodyState,
        worker_count: usize,
        worker_config: &WorkerConfig,
        viewer_config: &ReconciliationConfig,
    ) -> Result<Self, HarnessError> {
        let record = ReplicatedPhysicsRecord::from_state(&initial);
        let workers = (0..worker_count)
            .map(|_| TestWorker::enable(worker_config, &record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            worker_config: worker_config.clone(),
            record,
            coordinates: CoordinatesRecord::new(initial.position.as_dvec3()),
            workers,
            viewer: RemoteReconciliationSink::new(viewer_config, DetachedBody::new(initial))?,
            published: Vec::new(),
        })
    }

    /// Default configs on both sides
    pub fn with_workers(initial: RigidBodyState, worker_count: usize) -> Result<Self, HarnessError> {
        Self::new(
            initial,
            worker_count,
            &WorkerConfig::default(),
            &ReconciliationConfig::default(),
        )
    }

    /// Adds a worker mid-simulation. Its body is brought up to the record as
    /// it stands now. Returns the new worker's index.
    pub fn join_worker(&mut self) -> Result<usize, HarnessError> {
        let worker = TestWorker::enable(&self.worker_config, &self.record)?;
        self.workers.push(worker);
        Ok(self.workers.len() - 1)
    }

    /// Moves authority to `owner`, or to nobody. The previous owner is
    /// demoted before the new one is promoted.
    pub fn grant(&mut self, owner: Option<usize>) -> Result<(), HarnessError> {
        for (index, worker) in self.workers.iter().enumerate() {
            if Some(index) != owner {
                worker.mutator.try_set_authority(Authority::NotAuthoritative)?;
            }
        }
        if let Some(worker) = owner.and_then(|index| self.workers.get(index)) {
            worker.mutator.try_set_authority(Authority::Authoritative)?;
        }
        Ok(())
    }

    /// Runs one physics tick on every live worker and delivers whatever was
    /// published. Returns the published update, if any.
    pub fn step(&mut self) -> Result<Option<PhysicsUpdate>, HarnessError> {
        let mut published: Option<(usize, PhysicsUpdate)> = None;

        for (index, worker) in self.workers.iter_mut().enumerate() {
            if worker.torn_down {
                continue;
            }
            let update = worker.publisher.tick(&self.record, &mut worker.body)?;
            worker.sink.sync_authority(&mut worker.body)?;
            if let Some(update) = update {
                if let Some((first, _)) = published {
                    return Err(HarnessError::SplitBrain {
                        first,
                        second: index,
                    });
                }
                published = Some((index, update));
            }
        }

        let Some((publisher, update)) = published else {
            return Ok(None);
        };

        self.record.apply(&update);
        for (index, worker) in self.workers.iter_mut().enumerate() {
            if index == publisher || worker.torn_down {
                continue;
            }
            worker.sink.on_update(&update, &self.record, &mut worker.body)?;
        }
        if !self.viewer.is_torn_down() {
            self.viewer.on_update(&update, &self.record)?;
        }
        self.published.push(update.clone());
        Ok(Some(update))
    }

    /// Feeds wall-clock time to every live worker and applies any
    /// coordinates broadcast to the coarse record
    pub fn advance_clock(
        &mut self,
        delta: Duration,
    ) -> Result<Vec<CoordinatesUpdate>, HarnessError> {
        let mut broadcasts = Vec::new();
        for worker in self.workers.iter_mut().filter(|worker| !worker.torn_down) {
            let update = worker
                .publisher
                .advance_clock(delta, &self.record, &mut worker.body)?;
            worker.sink.sync_authority(&mut worker.body)?;
            if let Some(update) = update {
                self.coordinates.apply(&update);
                broadcasts.push(update);
            }
        }
        Ok(broadcasts)
    }

    /// Tears down both roles of one worker
    pub fn teardown(&mut self, index: usize) {
        if let Some(worker) = self.workers.get_mut(index) {
            worker.publisher.teardown();
            worker.sink.teardown();
            worker.torn_down = true;
        }
    }

    pub fn worker(&self, index: usize) -> &TestWorker {
        &self.workers[index]
    }

    pub fn worker_mut(&mut self, index: usize) -> &mut TestWorker {
        &mut self.workers[index]
    }
}
