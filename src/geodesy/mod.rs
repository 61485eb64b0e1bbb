//! Ellipsoidal Earth model: geographic points, forward geodesic and
//! geographic/Cartesian projection.

mod wgs84;

pub use wgs84::Wgs84;

use crate::error::{InputError, Result};
use crate::math::Point3;

/// A geographic position in degrees, with optional altitude in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Longitude in degrees, `[-180, 180]`.
    pub lon: f64,
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Height above the ellipsoid in metres.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub alt: Option<f64>,
}

impl GeoPoint {
    /// Creates a point without altitude.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::OutOfRange`] if a coordinate is non-finite or
    /// outside its valid range.
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        check_range("longitude", lon, -180.0, 180.0)?;
        check_range("latitude", lat, -90.0, 90.0)?;
        Ok(Self { lon, lat, alt: None })
    }

    /// Creates a point with an altitude.
    ///
    /// # Errors
    ///
    /// Same as [`GeoPoint::new`]; the altitude must be finite.
    pub fn with_alt(lon: f64, lat: f64, alt: f64) -> Result<Self> {
        let point = Self::new(lon, lat)?;
        check_range("altitude", alt, f64::MIN, f64::MAX)?;
        Ok(Self {
            alt: Some(alt),
            ..point
        })
    }

    /// Builds a point from a GeoJSON-style position `[lon, lat]` or
    /// `[lon, lat, alt]`. `index` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidPosition`] for any other length, or a
    /// range error from [`GeoPoint::new`].
    pub fn from_position(index: usize, position: &[f64]) -> Result<Self> {
        match *position {
            [lon, lat] => Self::new(lon, lat),
            [lon, lat, alt] => Self::with_alt(lon, lat, alt),
            _ => Err(InputError::InvalidPosition {
                index,
                len: position.len(),
            }
            .into()),
        }
    }

    /// Re-checks the ranges enforced by the constructors, for points built
    /// from struct literals.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::OutOfRange`] naming the offending coordinate.
    pub fn validate(&self) -> Result<()> {
        check_range("longitude", self.lon, -180.0, 180.0)?;
        check_range("latitude", self.lat, -90.0, 90.0)?;
        if let Some(alt) = self.alt {
            check_range("altitude", alt, f64::MIN, f64::MAX)?;
        }
        Ok(())
    }

    /// Returns the same horizontal position with the altitude dropped.
    #[must_use]
    pub fn horizontal(&self) -> Self {
        Self { alt: None, ..*self }
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            name,
            value,
            min,
            max,
        }
        .into())
    }
}

/// Solution of the forward (direct) geodesic problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSolution {
    /// Point reached from the start.
    pub destination: GeoPoint,
    /// Forward azimuth at the destination, degrees clockwise from north.
    pub final_azimuth: f64,
}

/// The geodesy capabilities the hatching pipeline needs.
///
/// Implemented by [`Wgs84`]; other Earth models can be plugged in to
/// decouple the sweep from a particular reference surface.
pub trait GeodeticModel {
    /// Travels `distance` metres from `start` along the geodesic leaving at
    /// `azimuth` degrees (clockwise from north).
    ///
    /// # Errors
    ///
    /// Returns a [`GeodesyError`](crate::error::GeodesyError) if the model
    /// cannot solve the problem.
    fn direct(&self, start: &GeoPoint, azimuth: f64, distance: f64) -> Result<DirectSolution>;

    /// Projects a geographic point into the Earth-centred Cartesian frame.
    ///
    /// # Errors
    ///
    /// Returns a [`GeodesyError`](crate::error::GeodesyError) if the
    /// projection fails.
    fn to_cartesian(&self, point: &GeoPoint) -> Result<Point3>;

    /// Inverse of [`GeodeticModel::to_cartesian`]; the altitude of the
    /// result is always set.
    ///
    /// # Errors
    ///
    /// Returns a [`GeodesyError`](crate::error::GeodesyError) if the
    /// projection fails.
    fn to_geographic(&self, point: &Point3) -> Result<GeoPoint>;
}

/// Projects a ring into the Cartesian frame, preserving order.
///
/// Altitudes are ignored: every vertex is placed on the reference surface.
///
/// # Errors
///
/// Propagates the first projection error.
pub fn project_ring<M: GeodeticModel + ?Sized>(model: &M, ring: &[GeoPoint]) -> Result<Vec<Point3>> {
    ring.iter()
        .map(|point| model.to_cartesian(&point.horizontal()))
        .collect()
}
