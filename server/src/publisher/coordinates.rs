use keel_shared::DVec3;

/// Coarse, unquantized world position used for large-scale spatial queries
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordinatesRecord {
    pub coords: DVec3,
}

impl CoordinatesRecord {
    pub fn new(coords: DVec3) -> Self {
        Self { coords }
    }

    pub fn apply(&mut self, update: &CoordinatesUpdate) {
        self.coords = update.coords;
    }
}

/// Periodic broadcast on the coarse position channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinatesUpdate {
    pub coords: DVec3,
}

/// "Where is this entity" query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsolutePositionRequest;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsolutePositionResponse {
    pub position: DVec3,
}
