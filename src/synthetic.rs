//! Synthetic candidate-point generation.
//!
//! Produces random points within a given ground distance of seed
//! coordinates, used to build user-submitted candidate datasets for
//! placement studies and to exercise the clustering engine in tests.

use rand::Rng;

use crate::geo_utils::EARTH_RADIUS_KM;
use crate::GeoPoint;

/// Generate a random point within `max_distance_meters` of `center`.
///
/// Picks a uniform random bearing and a uniform random distance, then
/// solves the destination point on the sphere, so results stay within the
/// requested ground distance at any latitude.
pub fn random_point_within<R: Rng>(
    center: &GeoPoint,
    max_distance_meters: f64,
    rng: &mut R,
) -> GeoPoint {
    let distance_km = rng.gen_range(0.0..=max_distance_meters) / 1000.0;
    let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
    destination_point(center, distance_km, bearing)
}

/// Generate `count` random points within `max_distance_meters` of
/// `center`.
pub fn generate_points_within<R: Rng>(
    center: &GeoPoint,
    max_distance_meters: f64,
    count: usize,
    rng: &mut R,
) -> Vec<GeoPoint> {
    (0..count)
        .map(|_| random_point_within(center, max_distance_meters, rng))
        .collect()
}

/// Solve the destination point given a start, distance, and bearing.
pub fn destination_point(start: &GeoPoint, distance_km: f64, bearing_rad: f64) -> GeoPoint {
    let lat = start.latitude.to_radians();
    let lng = start.longitude.to_radians();
    let angular = distance_km / EARTH_RADIUS_KM;

    let new_lat =
        (lat.sin() * angular.cos() + lat.cos() * angular.sin() * bearing_rad.cos()).asin();
    let new_lng = lng
        + (bearing_rad.sin() * angular.sin() * lat.cos())
            .atan2(angular.cos() - lat.sin() * new_lat.sin());

    // Re-wrap longitude into [-180, 180]
    let mut lng_deg = new_lng.to_degrees();
    if lng_deg > 180.0 {
        lng_deg -= 360.0;
    } else if lng_deg < -180.0 {
        lng_deg += 360.0;
    }

    GeoPoint::new(new_lat.to_degrees(), lng_deg)
}
