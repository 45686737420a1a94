/// Integration tests for authority: a single publisher at a time, and a new
/// owner continuing from the published state
use keel_server::SinkOutcome;
use keel_shared::{
    codec::{encode_vector3, velocity_epsilon},
    RigidBody, RigidBodyState, Vec3,
};
use keel_test::{assert_owned_by, assert_vec3_near, TestWorld};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn world(worker_count: usize) -> TestWorld {
    TestWorld::with_workers(RigidBodyState::default(), worker_count)
        .expect("default configs are valid")
}

#[test]
fn only_the_owner_publishes() {
    init();
    let mut world = world(3);
    world.grant(Some(1)).expect("authority flag");
    world.step().expect("gain tick");
    assert_owned_by!(world, Some(1));

    for worker in world.workers.iter_mut() {
        worker.body.set_position(Vec3::new(4.0, 4.0, 4.0));
    }
    world.step().expect("one publisher only");

    assert_eq!(world.published.len(), 1);
    assert_owned_by!(world, Some(1));
}

#[test]
fn nobody_owns_nobody_publishes() {
    init();
    let mut world = world(2);
    world.grant(None).expect("authority flag");

    for worker in world.workers.iter_mut() {
        worker.body.set_position(Vec3::ONE);
    }
    assert!(world.step().expect("tick").is_none());
    assert_owned_by!(world, None);
}

#[test]
fn handover_continues_from_published_state() {
    init();
    let mut world = world(2);
    world.grant(Some(0)).expect("authority flag");
    world.step().expect("gain tick");

    world.worker_mut(0).body.set_linear_velocity(Vec3::new(12.0, 0.0, 0.0));
    world.step().expect("tick");
    world.worker_mut(0).body.set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
    world.worker_mut(0).body.set_position(Vec3::new(-3.0, 0.5, 9.0));
    world.step().expect("tick");
    assert_eq!(world.record.max_linear_velocity, 12.0);

    world.grant(Some(1)).expect("authority flag");
    assert!(world.step().expect("handover tick").is_none());
    assert_owned_by!(world, Some(1));

    let new_owner = world.worker(1);
    assert_eq!(new_owner.publisher.tracker().max_linear_velocity(), 12.0);
    assert_eq!(new_owner.body.position(), world.worker(0).body.position());
    assert_vec3_near!(
        new_owner.body.linear_velocity(),
        Vec3::new(1.0, 0.0, 0.0),
        velocity_epsilon(12.0) * 1.01
    );

    world.worker_mut(1).body.set_linear_velocity(Vec3::new(2.0, 0.0, 0.0));
    let update = world.step().expect("tick").expect("velocity changed");
    assert!(update.max_linear_velocity.is_none());
    assert_eq!(world.record.max_linear_velocity, 12.0);
    assert_vec3_near!(
        world.worker(0).body.linear_velocity(),
        Vec3::new(2.0, 0.0, 0.0),
        velocity_epsilon(12.0) * 1.01
    );
}

#[test]
fn late_joiner_starts_from_the_record() {
    init();
    let mut world = world(1);
    world.grant(Some(0)).expect("authority flag");
    world.step().expect("gain tick");

    let body = &mut world.worker_mut(0).body;
    body.set_position(Vec3::new(40.0, -8.0, 2.5));
    body.set_linear_velocity(Vec3::new(0.0, 5.0, 0.0));
    world.step().expect("tick").expect("body moved");

    let joined = world.join_worker().expect("worker joins");
    let joiner = world.worker(joined);
    assert!(joiner.body.is_kinematic());
    assert_eq!(joiner.body.state(), world.worker(0).body.state());

    world.grant(Some(joined)).expect("authority flag");
    assert!(world.step().expect("handover tick").is_none());
    assert_owned_by!(world, Some(joined));
    assert_eq!(world.worker(joined).body.position(), Vec3::new(40.0, -8.0, 2.5));
}

#[test]
fn regained_authority_reloads_the_record() {
    init();
    let mut world = world(1);
    world.grant(Some(0)).expect("authority flag");
    world.step().expect("gain tick");
    world.worker_mut(0).body.set_position(Vec3::new(2.0, 0.0, 0.0));
    world.step().expect("tick");

    // drift that never got published, then a lose and regain between ticks
    world.worker_mut(0).body.set_position(Vec3::new(50.0, 0.0, 0.0));
    world.grant(None).expect("authority flag");
    world.grant(Some(0)).expect("authority flag");

    assert!(world.step().expect("regain tick").is_none());
    assert_eq!(world.worker(0).body.position(), Vec3::new(2.0, 0.0, 0.0));
    assert_owned_by!(world, Some(0));
}

#[test]
fn owner_ignores_remote_updates() {
    init();
    let mut world = world(2);
    world.grant(Some(0)).expect("authority flag");
    world.step().expect("gain tick");

    let worker = world.worker_mut(0);
    let outcome = worker
        .sink
        .on_position_updated(&encode_vector3(Vec3::splat(30.0)), &mut worker.body)
        .expect("authority readable");

    assert_eq!(outcome, SinkOutcome::Ignored);
    assert_eq!(world.worker(0).body.position(), Vec3::ZERO);
}
