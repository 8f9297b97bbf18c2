//! Density-based clustering on the haversine metric.
//!
//! Standard core-point/border-point/noise model: a point is a core point
//! when at least `min_samples` other points lie within `epsilon_km`;
//! clusters are maximal connected sets of core points plus their border
//! neighbors; everything else is noise.
//!
//! Region queries run against an R-tree of the input points using a
//! degree-padded bounding box, then an exact haversine filter. Boxes that
//! cross the ±180° meridian are queried on both sides of the seam.

use std::collections::VecDeque;

use rstar::{RTree, RTreeObject, AABB};

use crate::error::{ChargeMapError, Result};
use crate::geo_utils::{haversine_distance, km_to_lat_degrees, km_to_lng_degrees};
use crate::GeoPoint;

use super::NOISE;

/// Not yet visited by the scan.
const UNLABELED: i32 = -2;

/// Parameters for density-based clustering.
#[derive(Debug, Clone)]
pub struct DensityConfig {
    /// Neighborhood radius in kilometers.
    pub epsilon_km: f64,
    /// Minimum number of *other* points within `epsilon_km` for a point
    /// to be a core point.
    pub min_samples: usize,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            epsilon_km: 1.0,
            min_samples: 3,
        }
    }
}

/// Input point wrapper for R-tree indexing.
#[derive(Debug, Clone)]
struct PointEntry {
    index: usize,
    latitude: f64,
    longitude: f64,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.longitude, self.latitude])
    }
}

/// Indices of points within `epsilon_km` of point `i`, excluding `i`.
fn region_query(
    tree: &RTree<PointEntry>,
    points: &[GeoPoint],
    i: usize,
    epsilon_km: f64,
) -> Vec<usize> {
    let center = &points[i];
    let dlat = km_to_lat_degrees(epsilon_km);
    let dlng = km_to_lng_degrees(epsilon_km, center.latitude);

    let min_lng = center.longitude - dlng;
    let max_lng = center.longitude + dlng;

    let mut boxes = vec![AABB::from_corners(
        [min_lng, center.latitude - dlat],
        [max_lng, center.latitude + dlat],
    )];

    // A search box crossing the antimeridian needs a mirrored query on
    // the other side of the seam.
    if min_lng < -180.0 {
        boxes.push(AABB::from_corners(
            [min_lng + 360.0, center.latitude - dlat],
            [180.0, center.latitude + dlat],
        ));
    }
    if max_lng > 180.0 {
        boxes.push(AABB::from_corners(
            [-180.0, center.latitude - dlat],
            [max_lng - 360.0, center.latitude + dlat],
        ));
    }

    let mut neighbors: Vec<usize> = boxes
        .iter()
        .flat_map(|b| tree.locate_in_envelope_intersecting(b))
        .filter(|entry| entry.index != i)
        .filter(|entry| haversine_distance(center, &points[entry.index]) <= epsilon_km)
        .map(|entry| entry.index)
        .collect();

    // Expansion order must not depend on R-tree internals
    neighbors.sort_unstable();
    neighbors.dedup();
    neighbors
}

/// Cluster points by density.
///
/// Returns a label per input point, index-aligned: `NOISE` (-1) for
/// points unreachable from any core point, otherwise an arbitrary
/// non-negative cluster id. Every input point receives exactly one label.
///
/// Labeling is deterministic for identical input order and parameters. A
/// border point within epsilon of two different core clusters joins
/// whichever cluster expands to it first, which is tied to input
/// iteration order.
///
/// # Errors
///
/// - [`ChargeMapError::InvalidParameter`] unless `epsilon_km` is finite
///   and positive and `min_samples >= 1`
/// - [`ChargeMapError::InvalidCoordinate`] for non-finite input points
pub fn cluster_by_density(points: &[GeoPoint], config: &DensityConfig) -> Result<Vec<i32>> {
    if !config.epsilon_km.is_finite() || config.epsilon_km <= 0.0 {
        return Err(ChargeMapError::invalid_parameter(
            "epsilon_km",
            config.epsilon_km,
        ));
    }
    if config.min_samples == 0 {
        return Err(ChargeMapError::invalid_parameter("min_samples", 0.0));
    }
    for p in points {
        if !p.is_valid() {
            return Err(ChargeMapError::invalid_coordinate(p.latitude, p.longitude));
        }
    }

    let entries: Vec<PointEntry> = points
        .iter()
        .enumerate()
        .map(|(index, p)| PointEntry {
            index,
            latitude: p.latitude,
            longitude: p.longitude,
        })
        .collect();
    let tree = RTree::bulk_load(entries);

    let mut labels = vec![UNLABELED; points.len()];
    let mut next_cluster: i32 = 0;

    for i in 0..points.len() {
        if labels[i] != UNLABELED {
            continue;
        }

        let neighbors = region_query(&tree, points, i, config.epsilon_km);
        if neighbors.len() < config.min_samples {
            labels[i] = NOISE;
            continue;
        }

        // New cluster: grow from this core point
        labels[i] = next_cluster;
        let mut queue: VecDeque<usize> = neighbors.into();

        while let Some(j) = queue.pop_front() {
            if labels[j] == NOISE {
                // Previously noise: reachable after all, join as border
                labels[j] = next_cluster;
                continue;
            }
            if labels[j] != UNLABELED {
                continue;
            }

            labels[j] = next_cluster;

            let j_neighbors = region_query(&tree, points, j, config.epsilon_km);
            if j_neighbors.len() >= config.min_samples {
                queue.extend(j_neighbors);
            }
        }

        next_cluster += 1;
    }

    Ok(labels)
}
