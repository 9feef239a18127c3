//! Distance metrics between geographic points.
//!
//! Two metrics are available and they are not interchangeable:
//!
//! - **Manhattan**: sum of absolute latitude and longitude differences, in
//!   degrees. Cheap and coordinate-only.
//! - **Haversine**: great-circle distance in km on a spherical earth.
//!
//! A run fixes one metric and reports its name alongside the result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::participant::{GeoPoint, Participant};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Manhattan,
    #[default]
    Haversine,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 2] = [DistanceMetric::Manhattan, DistanceMetric::Haversine];

    pub fn distance(self, a: GeoPoint, b: GeoPoint) -> f64 {
        match self {
            DistanceMetric::Manhattan => manhattan(a, b),
            DistanceMetric::Haversine => haversine_km(a, b),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Haversine => "haversine",
        }
    }

    /// Shared route length when `driver` picks up `rider`: driver origin to
    /// rider origin, rider trip, rider destination to driver destination.
    pub fn three_leg_length(self, driver: &Participant, rider: &Participant) -> f64 {
        self.distance(driver.origin, rider.origin)
            + self.distance(rider.origin, rider.destination)
            + self.distance(rider.destination, driver.destination)
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn manhattan(a: GeoPoint, b: GeoPoint) -> f64 {
    (a.lat - b.lat).abs() + (a.lon - b.lon).abs()
}

/// Great-circle distance in km.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    // Rounding can push `h` just past 1 for nearly antipodal points.
    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon).clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
