pub mod error;
pub mod geodesy;
pub mod geometry;
pub mod hatching;
pub mod math;

pub use error::{HatchError, Result};
pub use geodesy::{DirectSolution, GeoPoint, GeodeticModel, Wgs84};
pub use hatching::{
    create_parallel_hatching, DegeneratePolicy, HatchLine, HatchSegment, HatchingOptions,
    ParallelHatching, RingClosure,
};
