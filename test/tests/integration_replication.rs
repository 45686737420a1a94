/// Integration tests for the worker to worker and worker to viewer path:
/// dirty-field publishing, max velocity growth and malformed payloads.
use keel_server::SinkError;
use keel_shared::{codec::velocity_epsilon, DecodeError, RigidBody, RigidBodyState, Vec3};
use keel_test::{assert_vec3_near, TestWorld};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn owned_world(worker_count: usize) -> TestWorld {
    let mut world = TestWorld::with_workers(RigidBodyState::default(), worker_count)
        .expect("default configs are valid");
    world.grant(Some(0)).expect("authority flag");
    assert!(world.step().expect("gain tick").is_none());
    world
}

#[test]
fn moving_body_reaches_sinks_and_viewer() {
    init();
    let mut world = owned_world(2);

    let body = &mut world.worker_mut(0).body;
    body.set_position(Vec3::new(100.0, 2.5, -40.25));
    body.set_linear_velocity(Vec3::new(3.0, 0.0, 0.0));

    let update = world.step().expect("tick").expect("body moved");
    assert!(update.position.is_some());
    assert!(update.rotation.is_none());
    assert!(update.linear_velocity.is_some());
    assert_eq!(update.max_linear_velocity, Some(3.0));

    let owner = world.worker(0).body;
    let replica = world.worker(1).body;
    assert_eq!(replica.position(), owner.position());
    assert_eq!(replica.linear_velocity(), owner.linear_velocity());
    assert_eq!(world.record.max_linear_velocity, 3.0);

    assert_eq!(world.viewer.buffers().position().len(), 1);
    world.viewer.fixed_tick();
    assert_eq!(world.viewer.shadow().position(), owner.position());
}

#[test]
fn unchanged_body_publishes_nothing() {
    init();
    let mut world = owned_world(2);

    world.worker_mut(0).body.set_position(Vec3::new(1.0, 1.0, 1.0));
    assert!(world.step().expect("tick").is_some());

    for _ in 0..10 {
        assert!(world.step().expect("tick").is_none());
    }
    assert_eq!(world.published.len(), 1);
}

#[test]
fn tolerance_suppresses_small_motion() {
    init();
    let worker_config = keel_server::WorkerConfig {
        delta: keel_server::DeltaConfig {
            position_epsilon: 0.1,
            ..keel_server::DeltaConfig::default()
        },
        ..keel_server::WorkerConfig::default()
    };
    let mut world = TestWorld::new(
        RigidBodyState::default(),
        1,
        &worker_config,
        &keel_client::ReconciliationConfig::default(),
    )
    .expect("valid configs");
    world.grant(Some(0)).expect("authority flag");
    world.step().expect("gain tick");

    world.worker_mut(0).body.set_position(Vec3::new(0.05, 0.0, 0.0));
    assert!(world.step().expect("tick").is_none());

    world.worker_mut(0).body.set_position(Vec3::new(0.5, 0.0, 0.0));
    assert!(world.step().expect("tick").is_some());
}

#[test]
fn max_velocity_only_grows() {
    init();
    let mut world = owned_world(2);

    let mut expected_max: f32 = 0.0;
    for speed in [5.0, 2.0, 8.0, 1.0, 7.5] {
        world
            .worker_mut(0)
            .body
            .set_linear_velocity(Vec3::new(0.0, -speed, 0.0));
        world.step().expect("tick");
        expected_max = expected_max.max(speed);

        assert_eq!(world.record.max_linear_velocity, expected_max);
        assert_eq!(world.worker(0).publisher.tracker().max_linear_velocity(), expected_max);
        assert_vec3_near!(
            world.worker(1).body.linear_velocity(),
            Vec3::new(0.0, -speed, 0.0),
            velocity_epsilon(expected_max) * 1.01
        );
    }

    let raised: Vec<f32> = world
        .published
        .iter()
        .filter_map(|update| update.max_linear_velocity)
        .collect();
    assert_eq!(raised, vec![5.0, 8.0]);
}

#[test]
fn zero_velocity_keeps_max_at_zero() {
    init();
    let mut world = owned_world(2);

    world.worker_mut(0).body.set_position(Vec3::new(0.0, 0.0, 12.0));
    let update = world.step().expect("tick").expect("body moved");

    assert!(update.linear_velocity.is_none());
    assert!(update.max_linear_velocity.is_none());
    assert_eq!(world.record.max_linear_velocity, 0.0);
    assert_eq!(world.record.max_angular_velocity, 0.0);
    assert_eq!(world.worker(1).body.linear_velocity(), Vec3::ZERO);
    assert_eq!(world.worker(1).body.angular_velocity(), Vec3::ZERO);
}

#[test]
fn malformed_payload_is_not_applied() {
    init();
    let mut world = owned_world(2);
    let before = world.worker(1).body;

    let worker = world.worker_mut(1);
    let result = worker.sink.on_position_updated(&[0; 5], &mut worker.body);
    assert!(matches!(
        result,
        Err(SinkError::Decode(DecodeError::InvalidLength {
            expected: 12,
            actual: 5,
            ..
        }))
    ));
    assert_eq!(world.worker(1).body, before);

    assert!(world.viewer.on_rotation_updated(&[1, 2, 3]).is_err());
    assert!(world.viewer.buffers().is_empty());
}
