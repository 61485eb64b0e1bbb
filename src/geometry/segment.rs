use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, DEGENERATE_LENGTH};

/// A straight segment between two Cartesian points.
///
/// Polygon edges and hatch strokes (before back-projection) are both
/// represented this way. The parametric form is
/// `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    start: Point3,
    end: Point3,
}

impl Segment3 {
    /// Creates a new segment. Zero-length segments are allowed here and
    /// only rejected by operations that need a direction.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the unnormalized direction `end - start`.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    /// Returns the Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Evaluates the segment at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.start + self.direction() * t
    }

    /// Returns a copy pushed outward by `distance` at both ends, keeping the
    /// direction. The result is `length + 2 * distance` long.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateSegment`] if the endpoints coincide
    /// (shorter than [`DEGENERATE_LENGTH`]), since there is no direction to
    /// extend along.
    pub fn extended(&self, distance: f64) -> Result<Self> {
        let dir = self.direction();
        let length = dir.norm();
        if length < DEGENERATE_LENGTH || !length.is_finite() {
            return Err(GeometryError::DegenerateSegment { length }.into());
        }
        let unit = dir / length;
        Ok(Self {
            start: self.start - unit * distance,
            end: self.end + unit * distance,
        })
    }
}
