mod plane;
mod segment;

pub use plane::Plane;
pub use segment::Segment3;
