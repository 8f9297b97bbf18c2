//! Mock routing oracle for testing without API access.
//!
//! Serves fixed route legs keyed by destination coordinate, with an
//! optional per-destination failure set to exercise partial-enrichment
//! paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::GeoPoint;

use super::error::OracleError;
use super::types::RouteLeg;
use super::RoutingOracle;

/// Coordinate key with enough precision to distinguish test points.
fn point_key(point: &GeoPoint) -> String {
    format!("{:.5},{:.5}", point.latitude, point.longitude)
}

/// Mock routing oracle that serves pre-configured legs.
///
/// Mimics the `RoutingOracle` interface. Destinations not registered with
/// either a leg or a failure report `NoRoute`.
#[derive(Debug, Default)]
pub struct MockRoutingOracle {
    legs: HashMap<String, RouteLeg>,
    failures: HashSet<String>,
    calls: AtomicUsize,
}

impl MockRoutingOracle {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a full leg for a destination.
    pub fn with_leg(mut self, destination: GeoPoint, leg: RouteLeg) -> Self {
        self.legs.insert(point_key(&destination), leg);
        self
    }

    /// Register a leg with just a travel distance in meters.
    pub fn with_distance(self, destination: GeoPoint, meters: f64) -> Self {
        let leg = RouteLeg {
            distance_text: format!("{:.1} km", meters / 1000.0),
            distance_meters: meters,
            duration_text: format!("{:.0} mins", meters / 500.0),
            resolved_address: None,
        };
        self.with_leg(destination, leg)
    }

    /// Register a destination whose lookup always fails.
    pub fn with_failure(mut self, destination: GeoPoint) -> Self {
        self.failures.insert(point_key(&destination));
        self
    }

    /// Number of route lookups issued against this mock.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingOracle for MockRoutingOracle {
    async fn route(
        &self,
        _origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteLeg, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let key = point_key(destination);

        if self.failures.contains(&key) {
            return Err(OracleError::Api {
                status: 500,
                message: format!("mock failure for {key}"),
            });
        }

        self.legs.get(&key).cloned().ok_or(OracleError::NoRoute)
    }
}
