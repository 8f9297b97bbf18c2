//! Nearest-charger search.
//!
//! The search runs in two passes:
//! 1. A cheap prefilter ranks every station by metric distance to the
//!    query and keeps the closest `prefilter_count`, bounding the number
//!    of expensive oracle lookups.
//! 2. The surviving candidates are enriched with real travel distances
//!    from the routing oracle (concurrent fan-out, joined before
//!    ranking), re-sorted by the oracle-reported distance, and truncated
//!    to `k`.
//!
//! The prefilter order is a cost-saving heuristic only; the final order
//! always comes from the oracle.

use futures::future::join_all;
use log::warn;
use serde::Serialize;

use crate::error::{ChargeMapError, Result};
use crate::geo_utils::DistanceMetric;
use crate::oracle::RoutingOracle;
use crate::{Dataset, GeoPoint, StationId};

/// Configuration for a nearest-charger query.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Number of results to return. Default: 5
    pub k: usize,
    /// Number of prefiltered candidates sent to the oracle. Default: 20
    pub prefilter_count: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            k: 5,
            prefilter_count: 20,
        }
    }
}

/// A ranked neighbor produced by [`find_nearest`].
#[derive(Debug, Clone, Serialize)]
pub struct NeighborResult {
    pub station_id: StationId,
    /// Distance used for prefilter ranking, in the metric's units.
    pub rank_distance: f64,
    /// Human-readable travel distance from the oracle.
    pub routed_distance_text: String,
    /// Travel distance in meters; the final ranking key.
    pub routed_distance_meters: f64,
    /// Human-readable travel duration from the oracle.
    pub routed_duration_text: String,
    /// Street address the oracle resolved for the station, if any.
    pub resolved_address: Option<String>,
}

/// Rank every station by metric distance to the query and keep the
/// closest `count`.
///
/// Returns `(record index, distance)` pairs in ascending distance order.
/// The sort is stable, so equidistant stations keep dataset load order.
pub fn prefilter(
    query: &GeoPoint,
    dataset: &Dataset,
    metric: &dyn DistanceMetric,
    count: usize,
) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = dataset
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| (i, metric.distance(query, &record.point)))
        .collect();

    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(count);
    ranked
}

/// Find the `k` stations nearest to `query` by real travel distance.
///
/// Candidates whose oracle lookup fails are dropped rather than failing
/// the query; the result may be shorter than `k`. If every candidate
/// fails, the query fails with
/// [`OracleUnavailable`](ChargeMapError::OracleUnavailable) - unenriched
/// prefilter distances are never returned as final output.
///
/// # Errors
///
/// - [`ChargeMapError::InvalidCoordinate`] for a non-finite query point
/// - [`ChargeMapError::EmptyDataset`] when the dataset has no records
/// - [`ChargeMapError::OracleUnavailable`] when no candidate enriched
pub async fn find_nearest(
    query: &GeoPoint,
    dataset: &Dataset,
    oracle: &dyn RoutingOracle,
    metric: &dyn DistanceMetric,
    config: &FinderConfig,
) -> Result<Vec<NeighborResult>> {
    if !query.is_valid() {
        return Err(ChargeMapError::invalid_coordinate(
            query.latitude,
            query.longitude,
        ));
    }

    if dataset.is_empty() {
        return Err(ChargeMapError::EmptyDataset);
    }

    if config.k == 0 {
        return Ok(vec![]);
    }

    let candidates = prefilter(query, dataset, metric, config.prefilter_count);

    // Concurrent fan-out; join_all preserves candidate order, so the
    // later stable sort still breaks ties by prefilter rank.
    let lookups = candidates.iter().map(|&(index, rank_distance)| {
        let record = &dataset.records()[index];
        async move { (record, rank_distance, oracle.route(query, &record.point).await) }
    });
    let outcomes = join_all(lookups).await;

    let mut enriched = Vec::with_capacity(outcomes.len());
    let mut last_error = None;

    for (record, rank_distance, outcome) in outcomes {
        match outcome {
            Ok(leg) => enriched.push(NeighborResult {
                station_id: record.id.clone(),
                rank_distance,
                routed_distance_text: leg.distance_text,
                routed_distance_meters: leg.distance_meters,
                routed_duration_text: leg.duration_text,
                resolved_address: leg.resolved_address,
            }),
            Err(e) => {
                warn!("dropping candidate '{}': {}", record.id, e);
                last_error = Some(e);
            }
        }
    }

    if enriched.is_empty() {
        if let Some(e) = last_error {
            return Err(ChargeMapError::OracleUnavailable(e));
        }
        // No candidates at all (prefilter_count of 0): a legitimate
        // empty result, not an oracle outage.
        return Ok(vec![]);
    }

    enriched.sort_by(|a, b| {
        a.routed_distance_meters
            .partial_cmp(&b.routed_distance_meters)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    enriched.truncate(config.k);

    Ok(enriched)
}
