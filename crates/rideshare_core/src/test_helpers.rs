//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures so unit tests, integration tests and benches agree on the
//! same small geographies.

use crate::participant::{GeoPoint, Participant};

/// A reference point in central Berlin.
pub const TEST_POINT: GeoPoint = GeoPoint::new(52.52, 13.405);

/// A point offset from [`TEST_POINT`] by the given degrees.
pub fn offset(dlat: f64, dlon: f64) -> GeoPoint {
    GeoPoint::new(TEST_POINT.lat + dlat, TEST_POINT.lon + dlon)
}

/// One driver driving (0,0) -> (10,0) and one rider riding (0,1) -> (5,1),
/// in plain degree coordinates for the Manhattan metric.
pub fn single_pair() -> (Vec<Participant>, Vec<Participant>) {
    (
        vec![Participant::driver(1, GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0), 10.0)],
        vec![Participant::rider(100, GeoPoint::new(0.0, 1.0), GeoPoint::new(5.0, 1.0), 5.0)],
    )
}

/// Two drivers and two riders where each driver shares most of its route with
/// a different rider: driver 1 with rider 100, driver 2 with rider 200. Riders
/// are listed in the opposite order, so pairing by input position is wrong.
pub fn cross_pairing() -> (Vec<Participant>, Vec<Participant>) {
    let drivers = vec![
        Participant::driver(1, GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0), 10.0),
        Participant::driver(2, GeoPoint::new(5.0, 0.0), GeoPoint::new(5.0, 10.0), 10.0),
    ];
    let riders = vec![
        Participant::rider(200, GeoPoint::new(5.0, 1.0), GeoPoint::new(5.0, 9.0), 8.0),
        Participant::rider(100, GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 9.0), 8.0),
    ];
    (drivers, riders)
}

/// `count` drivers or riders on a small grid around [`TEST_POINT`], with
/// trip lengths measured by haversine distance. Ids start at `first_id`.
pub fn grid_population(count: usize, first_id: u64, rider: bool) -> Vec<Participant> {
    (0..count)
        .map(|i| {
            let step = i as f64 * 0.01;
            let origin = offset(step, (i % 7) as f64 * 0.013);
            let destination = offset(0.05 - step * 0.5, 0.04 + (i % 5) as f64 * 0.011);
            let length = crate::spatial::haversine_km(origin, destination).max(0.1);
            let id = first_id + i as u64;
            if rider {
                Participant::rider(id, origin, destination, length)
            } else {
                Participant::driver(id, origin, destination, length)
            }
        })
        .collect()
}
