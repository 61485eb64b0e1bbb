use crate::geometry::{Plane, Segment3};

use super::{Point3, Vector3, PARALLEL_TOLERANCE};

/// Relationship of a bounded segment with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentPlaneRelation {
    /// The segment crosses (or touches) the plane at a single point.
    Point { point: Point3, t: f64 },
    /// The supporting line crosses the plane outside `[0, 1]`.
    Outside,
    /// The segment is (nearly) parallel to the plane.
    Parallel,
}

impl SegmentPlaneRelation {
    /// Returns the crossing point, if the segment reaches the plane.
    #[must_use]
    pub fn point(&self) -> Option<Point3> {
        match self {
            Self::Point { point, .. } => Some(*point),
            Self::Outside | Self::Parallel => None,
        }
    }
}

/// Intersects the segment `start + t * (end - start)`, `t` in `[0, 1]`,
/// with a plane.
///
/// Solves `n · (start + t * d - p0) = 0`. When `|n · d|` is below
/// [`PARALLEL_TOLERANCE`] the segment is reported as parallel, whether or not
/// it lies in the plane.
#[must_use]
pub fn segment_plane_intersect(segment: &Segment3, plane: &Plane) -> SegmentPlaneRelation {
    let normal = plane.normal();
    let dir = segment.direction();
    let denom = normal.dot(&dir);

    if denom.abs() < PARALLEL_TOLERANCE {
        return SegmentPlaneRelation::Parallel;
    }

    let t = normal.dot(&(plane.origin() - segment.start())) / denom;
    if (0.0..=1.0).contains(&t) {
        SegmentPlaneRelation::Point {
            point: segment.point_at(t),
            t,
        }
    } else {
        SegmentPlaneRelation::Outside
    }
}

/// Signed distance from a point to a plane.
/// Positive = on the normal side, negative = opposite.
#[must_use]
pub fn signed_distance_to_plane(point: &Point3, plane: &Plane) -> f64 {
    let diff: Vector3 = point - plane.origin();
    plane.normal().dot(&diff)
}
