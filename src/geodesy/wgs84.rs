use std::fmt;

use geographiclib_rs::{DirectGeodesic, Geodesic};
use proj::Proj;

use crate::error::{GeodesyError, Result};
use crate::math::Point3;

use super::{DirectSolution, GeoPoint, GeodeticModel};

/// Geographic 3D WGS84 (longitude, latitude, ellipsoidal height).
const GEOGRAPHIC_CRS: &str = "EPSG:4979";

/// Earth-centred, Earth-fixed WGS84.
const GEOCENTRIC_CRS: &str = "EPSG:4978";

/// The WGS84 ellipsoid.
///
/// Geographic/ECEF conversion runs through PROJ, the direct geodesic
/// problem through GeographicLib.
pub struct Wgs84 {
    geodesic: Geodesic,
    to_ecef: Proj,
    to_geographic: Proj,
}

impl Wgs84 {
    /// Builds both PROJ transformations.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::Projection`] if PROJ cannot create the
    /// transformations (for example when its database is missing).
    pub fn new() -> Result<Self> {
        Ok(Self {
            geodesic: Geodesic::wgs84(),
            to_ecef: known_crs(GEOGRAPHIC_CRS, GEOCENTRIC_CRS)?,
            to_geographic: known_crs(GEOCENTRIC_CRS, GEOGRAPHIC_CRS)?,
        })
    }
}

fn known_crs(from: &str, to: &str) -> Result<Proj> {
    Proj::new_known_crs(from, to, None).map_err(|e| {
        GeodesyError::Projection(format!("failed to create {from} -> {to} transformation: {e}"))
            .into()
    })
}

impl fmt::Debug for Wgs84 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wgs84")
            .field("from", &GEOGRAPHIC_CRS)
            .field("to", &GEOCENTRIC_CRS)
            .finish_non_exhaustive()
    }
}

impl GeodeticModel for Wgs84 {
    fn direct(&self, start: &GeoPoint, azimuth: f64, distance: f64) -> Result<DirectSolution> {
        let (lat, lon, final_azimuth): (f64, f64, f64) =
            self.geodesic.direct(start.lat, start.lon, azimuth, distance);
        Ok(DirectSolution {
            destination: GeoPoint { lon, lat, alt: None },
            final_azimuth: final_azimuth.rem_euclid(360.0),
        })
    }

    fn to_cartesian(&self, point: &GeoPoint) -> Result<Point3> {
        let (x, y, z) = self
            .to_ecef
            .convert((point.lon, point.lat, point.alt.unwrap_or(0.0)))
            .map_err(|e| {
                GeodesyError::Projection(format!(
                    "failed to project ({}, {}): {e}",
                    point.lon, point.lat
                ))
            })?;
        Ok(Point3::new(x, y, z))
    }

    fn to_geographic(&self, point: &Point3) -> Result<GeoPoint> {
        let (lon, lat, alt) = self
            .to_geographic
            .convert((point.x, point.y, point.z))
            .map_err(|e| {
                GeodesyError::Projection(format!(
                    "failed to unproject ({}, {}, {}): {e}",
                    point.x, point.y, point.z
                ))
            })?;
        Ok(GeoPoint {
            lon,
            lat,
            alt: Some(alt),
        })
    }
}
