//! Geographic clustering of placement candidates.
//!
//! Two interchangeable strategies over the haversine metric:
//! - [`cluster_by_threshold`] - naive pairwise proximity grouping. One
//!   candidate group per point, no transitive merging. Kept for
//!   comparison and illustration.
//! - [`cluster_by_density`] - density-based clustering (core/border/noise
//!   model) with true transitive connectivity. This is the strategy whose
//!   output should drive placement decisions.
//!
//! Both recompute from scratch on every call and never mutate the input
//! point set.

pub mod density;
pub mod threshold;

pub use density::{cluster_by_density, DensityConfig};
#[cfg(feature = "parallel")]
pub use threshold::cluster_by_threshold_parallel;
pub use threshold::{cluster_by_threshold, filter_groups, ProximityGroup};

use serde::Serialize;

use crate::geo_utils::{compute_bounds, compute_center};
use crate::{Bounds, GeoPoint};

/// Label assigned to points not reachable from any core point.
pub const NOISE: i32 = -1;

/// Aggregate view of one density cluster, used as a placement suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub label: i32,
    pub point_count: usize,
    /// Mean center of the cluster's points - the suggested site.
    pub center: GeoPoint,
    pub bounds: Bounds,
}

/// Summarize density-cluster labels into per-cluster placement
/// suggestions, dropping noise points.
///
/// This is the caller-side filter over [`cluster_by_density`] output; the
/// labeling itself always covers every input point.
///
/// # Panics
///
/// Panics if `labels` is not index-aligned with `points`.
pub fn summarize_clusters(points: &[GeoPoint], labels: &[i32]) -> Vec<ClusterSummary> {
    assert_eq!(
        points.len(),
        labels.len(),
        "labels must be index-aligned with points"
    );

    let mut max_label = NOISE;
    for &label in labels {
        max_label = max_label.max(label);
    }
    if max_label < 0 {
        return vec![];
    }

    let mut members: Vec<Vec<GeoPoint>> = vec![Vec::new(); (max_label + 1) as usize];
    for (point, &label) in points.iter().zip(labels) {
        if label >= 0 {
            members[label as usize].push(*point);
        }
    }

    members
        .into_iter()
        .enumerate()
        .filter(|(_, pts)| !pts.is_empty())
        .map(|(label, pts)| ClusterSummary {
            label: label as i32,
            point_count: pts.len(),
            center: compute_center(&pts),
            bounds: compute_bounds(&pts),
        })
        .collect()
}
