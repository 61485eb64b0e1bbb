use std::fmt;

use crate::error::{OperationError, Result};
use crate::geodesy::{GeoPoint, GeodeticModel};
use crate::geometry::{Plane, Segment3};
use crate::math::intersect_3d::segment_plane_intersect;
use crate::math::Point3;

use super::pairing::PairingStrategy;
use super::RingClosure;

/// Distance used to derive the plane normal for the pass through the start
/// point, where the sweep distance itself is zero.
const NORMAL_DISTANCE: f64 = 1.0;

/// One of the two opposite directions a sweep travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepDirection {
    /// Along `bearing + 90`. Its first pass goes through the start point.
    Forward,
    /// Along `bearing + 270`. Starts one step out, the start point is
    /// already covered by the forward sweep.
    Reverse,
}

impl SweepDirection {
    /// Azimuth of this sweep, degrees in `[0, 360)`.
    #[must_use]
    pub fn azimuth(self, bearing: f64) -> f64 {
        let perpendicular = (bearing + 90.0).rem_euclid(360.0);
        match self {
            Self::Forward => perpendicular,
            Self::Reverse => (perpendicular + 180.0).rem_euclid(360.0),
        }
    }

    /// Step index of the first pass.
    #[must_use]
    pub fn first_pass(self) -> usize {
        match self {
            Self::Forward => 0,
            Self::Reverse => 1,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for SweepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hatch segment as found by the sweep, before extension.
#[derive(Debug, Clone)]
pub(super) struct RawHatch {
    pub direction: SweepDirection,
    pub pass: usize,
    pub plane: Plane,
    pub segment: Segment3,
}

/// Builds the boundary edges of a projected ring.
///
/// With [`RingClosure::Close`] the edge from the last vertex back to the
/// first is added unless the ring already ends where it starts.
#[must_use]
pub(super) fn ring_edges(vertices: &[Point3], closure: RingClosure) -> Vec<Segment3> {
    let mut edges: Vec<Segment3> = vertices
        .windows(2)
        .map(|pair| Segment3::new(pair[0], pair[1]))
        .collect();

    if closure == RingClosure::Close {
        if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
            if vertices.len() > 1 && first != last {
                edges.push(Segment3::new(*last, *first));
            }
        }
    }
    edges
}

/// Steps cutting planes away from the first ring vertex and collects the
/// boundary crossings of each.
pub(super) struct PlaneSweep<'a, M: ?Sized> {
    model: &'a M,
    start: GeoPoint,
    start_cartesian: Point3,
    edges: &'a [Segment3],
}

impl<'a, M: GeodeticModel + ?Sized> PlaneSweep<'a, M> {
    pub fn new(model: &'a M, start: GeoPoint, edges: &'a [Segment3]) -> Result<Self> {
        let start = start.horizontal();
        Ok(Self {
            model,
            start_cartesian: model.to_cartesian(&start)?,
            start,
            edges,
        })
    }

    /// Builds the vertical cutting plane `distance` metres from the start
    /// point along `azimuth`.
    ///
    /// The normal is the chord from the start point to the destination.
    /// At distance zero a one metre chord supplies the normal and the
    /// plane stays anchored at the start point itself.
    pub fn cutting_plane(&self, azimuth: f64, distance: f64) -> Result<Plane> {
        let at_start = distance.abs() < f64::EPSILON;
        let chord = if at_start { NORMAL_DISTANCE } else { distance };

        let destination = self.model.direct(&self.start, azimuth, chord)?.destination;
        let destination = self.model.to_cartesian(&destination)?;
        let normal = destination - self.start_cartesian;
        let origin = if at_start {
            self.start_cartesian
        } else {
            destination
        };
        Plane::from_normal(origin, normal)
    }

    /// Crossings of `plane` with the ring edges, in edge order.
    pub fn crossings(&self, plane: &Plane) -> Vec<Point3> {
        self.edges
            .iter()
            .filter_map(|edge| segment_plane_intersect(edge, plane).point())
            .collect()
    }

    /// Runs one directional sweep, appending its segments to `out`.
    ///
    /// Stops at the first pass with fewer than two crossings, except the
    /// pass through the start point: an edge leaving the start vertex lies
    /// almost in that plane, so it may report a single crossing even though
    /// the ring extends further along the sweep.
    ///
    /// # Errors
    ///
    /// - [`OperationError::PassLimitExceeded`] if `max_passes` passes all
    ///   hit the ring
    /// - geodesy and geometry errors from building a cutting plane
    #[allow(clippy::cast_precision_loss)]
    pub fn run<P: PairingStrategy + ?Sized>(
        &self,
        direction: SweepDirection,
        bearing: f64,
        step: f64,
        max_passes: usize,
        pairing: &P,
        out: &mut Vec<RawHatch>,
    ) -> Result<()> {
        let azimuth = direction.azimuth(bearing);
        let first = direction.first_pass();

        for pass in first..first.saturating_add(max_passes) {
            let plane = self.cutting_plane(azimuth, step * pass as f64)?;
            let crossings = self.crossings(&plane);
            tracing::trace!(%direction, pass, crossings = crossings.len(), "sweep pass");

            if crossings.len() < 2 && pass == 0 {
                tracing::trace!(%direction, crossings = crossings.len(), "start plane grazes the ring");
                continue;
            }
            if crossings.len() < 2 {
                tracing::debug!(%direction, azimuth, passes = pass - first, "sweep left the ring");
                return Ok(());
            }

            out.extend(
                pairing
                    .pair(&crossings, &plane)
                    .into_iter()
                    .map(|segment| RawHatch {
                        direction,
                        pass,
                        plane: plane.clone(),
                        segment,
                    }),
            );
        }

        Err(OperationError::PassLimitExceeded {
            direction: direction.name(),
            limit: max_passes,
        }
        .into())
    }
}
