use glam::{Quat, Vec3};

/// Snapshot of the replicated physical state of one rigid body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBodyState {
    pub position: Vec3,
    pub rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }
}

/// Position and rotation handed to rendering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Accessor for a rigid body owned by the physics solver.
///
/// Kinematic bodies are positioned from outside and are not moved by the
/// solver.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);

    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, velocity: Vec3);

    fn is_kinematic(&self) -> bool;
    fn set_kinematic(&mut self, kinematic: bool);

    fn state(&self) -> RigidBodyState {
        RigidBodyState {
            position: self.position(),
            rotation: self.rotation(),
            linear_velocity: self.linear_velocity(),
            angular_velocity: self.angular_velocity(),
        }
    }

    fn set_state(&mut self, state: &RigidBodyState) {
        self.set_position(state.position);
        self.set_rotation(state.rotation);
        self.set_linear_velocity(state.linear_velocity);
        self.set_angular_velocity(state.angular_velocity);
    }

    fn pose(&self) -> Pose {
        Pose {
            position: self.position(),
            rotation: self.rotation(),
        }
    }
}

/// A rigid body no solver is attached to. It holds whatever was last
/// written to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetachedBody {
    state: RigidBodyState,
    kinematic: bool,
}

impl DetachedBody {
    pub fn new(state: RigidBodyState) -> Self {
        Self {
            state,
            kinematic: false,
        }
    }

    pub fn from_pose(pose: Pose) -> Self {
        Self::new(RigidBodyState {
            position: pose.position,
            rotation: pose.rotation,
            ..RigidBodyState::default()
        })
    }
}

impl RigidBody for DetachedBody {
    fn position(&self) -> Vec3 {
        self.state.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    fn rotation(&self) -> Quat {
        self.state.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.state.rotation = rotation;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.state.linear_velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.state.linear_velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.state.angular_velocity
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.state.angular_velocity = velocity;
    }

    fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }
}
