//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometres used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Ranges are not enforced: latitudes outside `[-90, 90]` or longitudes
/// outside `[-180, 180]` are accepted and yield meaningless distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance in kilometres to `other`.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        distance_km(*self, *other)
    }
}

/// Great-circle distance in kilometres between `a` and `b` (haversine,
/// spherical Earth of radius [`EARTH_RADIUS_KM`]).
///
/// Symmetric, zero for identical points, and NaN if any input is NaN.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}
