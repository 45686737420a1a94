use std::fmt;

/// The four replicated physical quantities of a rigid body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Position,
    Rotation,
    LinearVelocity,
    AngularVelocity,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 4] = [
        QuantityKind::Position,
        QuantityKind::Rotation,
        QuantityKind::LinearVelocity,
        QuantityKind::AngularVelocity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuantityKind::Position => "position",
            QuantityKind::Rotation => "rotation",
            QuantityKind::LinearVelocity => "linear velocity",
            QuantityKind::AngularVelocity => "angular velocity",
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
