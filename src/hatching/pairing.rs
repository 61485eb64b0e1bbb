use crate::geometry::{Plane, Segment3};
use crate::math::Point3;

/// Turns the boundary crossings of one cutting plane into hatch segments.
///
/// Crossings arrive in edge traversal order. Implementations decide which
/// crossings bound the same interior span.
pub trait PairingStrategy {
    /// Pairs `crossings` found on `plane` into segments.
    fn pair(&self, crossings: &[Point3], plane: &Plane) -> Vec<Segment3>;
}

/// Pairs crossings in traversal order: `0-1`, `2-3`, ...
///
/// Exact for convex rings, where every cutting plane crosses the boundary
/// exactly twice. On concave rings it can join crossings that bound
/// different spans, or bridge a gap outside the polygon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPairing;

impl PairingStrategy for SequentialPairing {
    fn pair(&self, crossings: &[Point3], _plane: &Plane) -> Vec<Segment3> {
        let chunks = crossings.chunks_exact(2);
        if !chunks.remainder().is_empty() {
            tracing::warn!(
                crossings = crossings.len(),
                "odd number of boundary crossings, dropping the last one"
            );
        }
        chunks.map(|pair| Segment3::new(pair[0], pair[1])).collect()
    }
}
