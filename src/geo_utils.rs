//! Geographic utilities: distance metrics, bounds, and center calculations.
//!
//! Two distance metrics are provided and callers choose explicitly:
//! - [`Haversine`] - true great-circle ground distance in kilometers.
//!   Required whenever absolute distances matter (thresholding, reporting).
//! - [`Planar`] - Euclidean distance on raw degree pairs. Not a ground
//!   distance; only acceptable for cheap relative ranking over a local
//!   area before a real-distance pass confirms the order.

use crate::{Bounds, GeoPoint};

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Pluggable distance function over geographic points.
///
/// Implementations must be symmetric and return 0 for identical points.
pub trait DistanceMetric {
    /// Distance between two points. Units depend on the implementation.
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64;
}

/// Great-circle distance in kilometers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        haversine_distance(a, b)
    }
}

/// Euclidean distance on raw (latitude, longitude) degree pairs.
///
/// Result is in degrees, not kilometers. Pre-filter use only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

impl DistanceMetric for Planar {
    fn distance(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        planar_distance(a, b)
    }
}

/// Calculate the great-circle distance between two points in kilometers.
///
/// Uses the standard haversine formula, so pairs crossing the ±180°
/// longitude boundary get the true short-path distance.
///
/// # Example
/// ```
/// use chargemap::GeoPoint;
/// use chargemap::geo_utils::haversine_distance;
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
/// let dist = haversine_distance(&london, &paris);
/// assert!((dist - 343.5).abs() < 5.0);
/// ```
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Euclidean distance on raw degree pairs.
pub fn planar_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlng = a.longitude - b.longitude;
    (dlat * dlat + dlng * dlng).sqrt()
}

/// Compute the bounding box of a point set.
///
/// Returns a degenerate box at (0, 0) for an empty slice; callers that
/// care should check emptiness first.
pub fn compute_bounds(points: &[GeoPoint]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    })
}

/// Compute the mean center of a point set.
///
/// Returns (0, 0) for an empty slice.
pub fn compute_center(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let lat_sum: f64 = points.iter().map(|p| p.latitude).sum();
    let lng_sum: f64 = points.iter().map(|p| p.longitude).sum();
    let n = points.len() as f64;

    GeoPoint::new(lat_sum / n, lng_sum / n)
}

/// Degrees of latitude spanned by `km` kilometers.
pub(crate) fn km_to_lat_degrees(km: f64) -> f64 {
    km / 110.574
}

/// Degrees of longitude spanned by `km` kilometers at the given latitude.
///
/// Clamped so the search box stays finite near the poles.
pub(crate) fn km_to_lng_degrees(km: f64, latitude: f64) -> f64 {
    let cos_lat = latitude.to_radians().cos().abs().max(0.01);
    km / (111.320 * cos_lat)
}
