//! Parallel hatching of a geographic polygon.
//!
//! # Algorithm
//!
//! 1. Project the first ring onto the ellipsoid's Cartesian frame
//! 2. Sweep cutting planes perpendicular to the hatch bearing, one step
//!    apart, outward from the first vertex in both directions until a plane
//!    misses the ring
//! 3. Intersect each plane with the ring edges and pair the crossings
//! 4. Extend each pair by `offset` at both ends and project back to
//!    longitude/latitude

mod pairing;
mod sweep;

pub use pairing::{PairingStrategy, SequentialPairing};
pub use sweep::SweepDirection;

use crate::error::{GeometryError, HatchError, InputError, Result};
use crate::geodesy::{project_ring, GeoPoint, GeodeticModel, Wgs84};
use crate::geometry::{Plane, Segment3};

use sweep::{ring_edges, PlaneSweep, RawHatch};

/// How the last ring vertex connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RingClosure {
    /// Add the closing edge when the ring does not already end at its
    /// first vertex.
    #[default]
    Close,
    /// Walk only the edges between consecutive input vertices.
    AsGiven,
}

/// What to do with a crossing pair whose two points coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DegeneratePolicy {
    /// Drop the pair and keep hatching. A plane through a ring vertex
    /// that only touches the ring produces such a pair.
    #[default]
    Skip,
    /// Abort with [`GeometryError::DegenerateSegment`].
    Fail,
}

/// Parameters of a hatching run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HatchingOptions {
    /// Distance between consecutive cutting planes, metres.
    pub step: f64,
    /// Direction of the hatch strokes, degrees clockwise from north.
    pub bearing: f64,
    /// How far each stroke overshoots the ring at both ends, metres.
    pub offset: f64,
    /// Ring closure rule.
    pub closure: RingClosure,
    /// Handling of zero-length crossing pairs.
    pub degenerate: DegeneratePolicy,
    /// Maximum number of passes per sweep direction.
    pub max_passes: usize,
}

impl Default for HatchingOptions {
    fn default() -> Self {
        Self {
            step: 100.0,
            bearing: 0.0,
            offset: 50.0,
            closure: RingClosure::default(),
            degenerate: DegeneratePolicy::default(),
            max_passes: 10_000,
        }
    }
}

impl HatchingOptions {
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    #[must_use]
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = bearing;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_closure(mut self, closure: RingClosure) -> Self {
        self.closure = closure;
        self
    }

    #[must_use]
    pub fn with_degenerate(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Checks that the options describe a terminating sweep.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidParameter`] if `step` is not a positive
    /// finite number, `offset` is negative or non-finite, `bearing` is
    /// non-finite, or `max_passes` is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return invalid("step", "must be a positive finite distance");
        }
        if !self.offset.is_finite() || self.offset < 0.0 {
            return invalid("offset", "must be a non-negative finite distance");
        }
        if !self.bearing.is_finite() {
            return invalid("bearing", "must be finite");
        }
        if self.max_passes == 0 {
            return invalid("max_passes", "must be at least 1");
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &'static str) -> Result<()> {
    Err(InputError::InvalidParameter { name, reason }.into())
}

/// A finished hatch stroke in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HatchLine {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

/// A finished hatch stroke in Cartesian coordinates, with the cutting plane
/// and pass that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct HatchSegment {
    /// Sweep the stroke belongs to.
    pub direction: SweepDirection,
    /// Step index of the pass; the plane sits `pass * step` from the start.
    pub pass: usize,
    /// Cutting plane of the pass.
    pub plane: Plane,
    /// The stroke, already extended by the offset.
    pub segment: Segment3,
}

/// Fills a polygon ring with parallel hatch strokes.
///
/// Only convex rings are hatched exactly: crossings are paired in edge
/// order (see [`SequentialPairing`]), and a sweep stops at the first plane
/// that misses the ring.
///
/// # Example
///
/// ```
/// use geohatch::{GeoPoint, HatchingOptions, ParallelHatching};
///
/// let ring = [[0.0, 0.0], [0.0, 0.1], [0.1, 0.1], [0.1, 0.0], [0.0, 0.0]]
///     .iter()
///     .map(|&[lon, lat]| GeoPoint::new(lon, lat))
///     .collect::<geohatch::Result<Vec<_>>>()?;
///
/// let options = HatchingOptions::default().with_step(1_000.0);
/// let lines = ParallelHatching::new(ring, options)?.execute()?;
/// assert!(!lines.is_empty());
/// # Ok::<(), geohatch::HatchError>(())
/// ```
#[derive(Debug)]
pub struct ParallelHatching<M = Wgs84, P = SequentialPairing> {
    model: M,
    pairing: P,
    ring: Vec<GeoPoint>,
    options: HatchingOptions,
}

impl ParallelHatching {
    /// Creates a hatching operation on the WGS84 ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns a `GeodesyError` if the WGS84 transformations cannot be built.
    pub fn new(ring: Vec<GeoPoint>, options: HatchingOptions) -> Result<Self> {
        Ok(Self::with_model(Wgs84::new()?, ring, options))
    }

    /// Creates a hatching operation from GeoJSON-style rings of
    /// `[lon, lat]` or `[lon, lat, alt]` positions. Only the first ring is
    /// used.
    ///
    /// # Errors
    ///
    /// - [`InputError::EmptyInput`] if there are no rings
    /// - position errors from [`GeoPoint::from_position`]
    /// - errors from [`ParallelHatching::new`]
    pub fn from_rings<T: AsRef<[f64]>>(rings: &[Vec<T>], options: HatchingOptions) -> Result<Self> {
        let ring = rings.first().ok_or(InputError::EmptyInput)?;
        let ring = ring
            .iter()
            .enumerate()
            .map(|(index, position)| GeoPoint::from_position(index, position.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(ring, options)
    }
}

impl<M: GeodeticModel> ParallelHatching<M> {
    /// Creates a hatching operation on a custom Earth model.
    #[must_use]
    pub fn with_model(model: M, ring: Vec<GeoPoint>, options: HatchingOptions) -> Self {
        Self {
            model,
            pairing: SequentialPairing,
            ring,
            options,
        }
    }
}

impl<M: GeodeticModel, P: PairingStrategy> ParallelHatching<M, P> {
    /// Replaces the crossing pairing strategy.
    #[must_use]
    pub fn with_pairing<Q: PairingStrategy>(self, pairing: Q) -> ParallelHatching<M, Q> {
        ParallelHatching {
            model: self.model,
            pairing,
            ring: self.ring,
            options: self.options,
        }
    }

    /// Runs the hatching and returns the strokes in geographic coordinates.
    ///
    /// Strokes of the forward sweep come first, then the reverse sweep;
    /// within a pass they follow the ring's edge order.
    ///
    /// # Errors
    ///
    /// See [`ParallelHatching::execute_cartesian`].
    pub fn execute(&self) -> Result<Vec<HatchLine>> {
        let segments = self.execute_cartesian()?;
        segments
            .iter()
            .map(|hatch| {
                Ok(HatchLine {
                    start: self.model.to_geographic(hatch.segment.start())?,
                    end: self.model.to_geographic(hatch.segment.end())?,
                })
            })
            .collect()
    }

    /// Runs the hatching and returns the extended strokes in the model's
    /// Cartesian frame, together with their cutting planes.
    ///
    /// # Errors
    ///
    /// - `InputError` if the options are invalid, the ring has fewer
    ///   than 2 points or a vertex is out of range
    /// - `GeodesyError` if the model fails to project a point
    /// - `GeometryError::DegenerateSegment` under [`DegeneratePolicy::Fail`]
    /// - `OperationError::PassLimitExceeded` if a sweep runs past
    ///   `max_passes`
    pub fn execute_cartesian(&self) -> Result<Vec<HatchSegment>> {
        self.options.validate()?;
        let Some(start) = self.ring.first().filter(|_| self.ring.len() >= 2) else {
            return Err(InputError::TooFewPoints {
                count: self.ring.len(),
                min: 2,
            }
            .into());
        };
        for point in &self.ring {
            point.validate()?;
        }

        let vertices = project_ring(&self.model, &self.ring)?;
        let edges = ring_edges(&vertices, self.options.closure);
        let sweep = PlaneSweep::new(&self.model, *start, &edges)?;

        let mut raw = Vec::new();
        for direction in [SweepDirection::Forward, SweepDirection::Reverse] {
            sweep.run(
                direction,
                self.options.bearing,
                self.options.step,
                self.options.max_passes,
                &self.pairing,
                &mut raw,
            )?;
        }

        let mut segments = Vec::with_capacity(raw.len());
        for hatch in raw {
            if let Some(segment) = self.extend(&hatch)? {
                segments.push(segment);
            }
        }

        tracing::debug!(
            vertices = self.ring.len(),
            strokes = segments.len(),
            step = self.options.step,
            bearing = self.options.bearing,
            "parallel hatching complete"
        );
        Ok(segments)
    }

    fn extend(&self, hatch: &RawHatch) -> Result<Option<HatchSegment>> {
        match hatch.segment.extended(self.options.offset) {
            Ok(segment) => Ok(Some(HatchSegment {
                direction: hatch.direction,
                pass: hatch.pass,
                plane: hatch.plane.clone(),
                segment,
            })),
            Err(HatchError::Geometry(GeometryError::DegenerateSegment { length }))
                if self.options.degenerate == DegeneratePolicy::Skip =>
            {
                tracing::debug!(
                    direction = %hatch.direction,
                    pass = hatch.pass,
                    length,
                    "skipping degenerate crossing pair"
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Hatches the first ring of `coordinates` on WGS84 with the given step,
/// bearing and offset, using default options otherwise.
///
/// # Errors
///
/// See [`ParallelHatching::from_rings`] and [`ParallelHatching::execute`].
pub fn create_parallel_hatching<T: AsRef<[f64]>>(
    coordinates: &[Vec<T>],
    step: f64,
    bearing: f64,
    offset: f64,
) -> Result<Vec<HatchLine>> {
    let options = HatchingOptions::default()
        .with_step(step)
        .with_bearing(bearing)
        .with_offset(offset);
    ParallelHatching::from_rings(coordinates, options)?.execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
