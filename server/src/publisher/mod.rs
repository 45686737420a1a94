mod authoritative_publisher;
mod coordinates;
mod delta_tracker;

pub use authoritative_publisher::AuthoritativePublisher;
pub use coordinates::{
    AbsolutePositionRequest, AbsolutePositionResponse, CoordinatesRecord, CoordinatesUpdate,
};
pub use delta_tracker::DeltaTracker;
