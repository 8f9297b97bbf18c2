//! Threshold-linking proximity grouping.
//!
//! For each point, collects the later-indexed points within `radius_km`
//! into a candidate group. Overlapping groups are NOT merged: two points
//! can each be grouped with a common third point without being grouped
//! with each other. This is a deliberately naive grouping kept alongside
//! the density strategy for comparison - it is not connected-components
//! clustering and should not drive placement decisions.

use crate::error::{ChargeMapError, Result};
use crate::geo_utils::haversine_distance;
use crate::GeoPoint;

/// One candidate group: an anchor point plus the later-indexed points
/// within the radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityGroup {
    /// Index of the group's anchor point.
    pub anchor: usize,
    /// Indices of later points within the radius of the anchor.
    pub members: Vec<usize>,
}

impl ProximityGroup {
    /// Total number of points in the group, anchor included.
    pub fn len(&self) -> usize {
        1 + self.members.len()
    }

    /// A group always contains at least its anchor.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resolve the group to its points, anchor first.
    pub fn points(&self, points: &[GeoPoint]) -> Vec<GeoPoint> {
        let mut out = Vec::with_capacity(self.len());
        out.push(points[self.anchor]);
        out.extend(self.members.iter().map(|&i| points[i]));
        out
    }
}

fn validate(points: &[GeoPoint], radius_km: f64) -> Result<()> {
    if radius_km.is_nan() {
        return Err(ChargeMapError::invalid_parameter("radius_km", radius_km));
    }
    for p in points {
        if !p.is_valid() {
            return Err(ChargeMapError::invalid_coordinate(p.latitude, p.longitude));
        }
    }
    Ok(())
}

fn group_for_anchor(points: &[GeoPoint], anchor: usize, radius_km: f64) -> ProximityGroup {
    let members = points
        .iter()
        .enumerate()
        .skip(anchor + 1)
        .filter(|(_, p)| haversine_distance(&points[anchor], p) <= radius_km)
        .map(|(j, _)| j)
        .collect();

    ProximityGroup { anchor, members }
}

/// Group points by pairwise distance threshold.
///
/// Produces one group per point: the anchor plus every later-indexed
/// point within `radius_km` (great-circle). A radius of 0 or below
/// excludes every later point, leaving only self-singleton groups.
///
/// # Errors
///
/// - [`ChargeMapError::InvalidParameter`] for a NaN radius
/// - [`ChargeMapError::InvalidCoordinate`] for non-finite input points
pub fn cluster_by_threshold(points: &[GeoPoint], radius_km: f64) -> Result<Vec<ProximityGroup>> {
    validate(points, radius_km)?;

    Ok((0..points.len())
        .map(|i| group_for_anchor(points, i, radius_km))
        .collect())
}

/// Parallel variant of [`cluster_by_threshold`]. Identical output.
#[cfg(feature = "parallel")]
pub fn cluster_by_threshold_parallel(
    points: &[GeoPoint],
    radius_km: f64,
) -> Result<Vec<ProximityGroup>> {
    use rayon::prelude::*;

    validate(points, radius_km)?;

    Ok((0..points.len())
        .into_par_iter()
        .map(|i| group_for_anchor(points, i, radius_km))
        .collect())
}

/// Drop groups smaller than `min_samples` points (anchor included).
///
/// Callers apply this before using threshold groups as cluster
/// candidates.
pub fn filter_groups(groups: Vec<ProximityGroup>, min_samples: usize) -> Vec<ProximityGroup> {
    groups.into_iter().filter(|g| g.len() >= min_samples).collect()
}
