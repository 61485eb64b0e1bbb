pub mod intersect_3d;

/// 3D point type (Earth-centred Cartesian, metres).
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Below this `|normal · direction|` an edge counts as parallel to a plane.
pub const PARALLEL_TOLERANCE: f64 = 1e-8;

/// Segments shorter than this (metres) have no usable direction.
///
/// ECEF coordinates are around 6.4e6 m, where one ulp is roughly 1e-9 m, so
/// points that should coincide can differ by a few nanometres.
pub const DEGENERATE_LENGTH: f64 = 1e-6;
