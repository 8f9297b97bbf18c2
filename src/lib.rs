//! # ChargeMap
//!
//! EV charging station lookup and placement analysis library.
//!
//! This library provides:
//! - Nearest-charger search ranked by real travel distance
//! - Routing-oracle enrichment with bounded concurrent fan-out
//! - Geographic clustering of candidate locations (threshold and
//!   density-based strategies)
//! - Station dataset ingestion from CSV/JSON with coordinate validation
//! - Synthetic candidate-point generation for placement studies
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel clustering with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use chargemap::cluster::{cluster_by_density, DensityConfig, NOISE};
//! use chargemap::GeoPoint;
//!
//! // Four candidate sites close together, one far away
//! let points = vec![
//!     GeoPoint::new(12.8910, 77.5810),
//!     GeoPoint::new(12.8915, 77.5812),
//!     GeoPoint::new(12.8912, 77.5815),
//!     GeoPoint::new(12.8917, 77.5808),
//!     GeoPoint::new(13.3409, 77.5810),
//! ];
//!
//! let config = DensityConfig { epsilon_km: 1.0, min_samples: 3 };
//! let labels = cluster_by_density(&points, &config).unwrap();
//!
//! assert_eq!(labels.len(), points.len());
//! assert_eq!(labels[4], NOISE);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ChargeMapError, Result};

// Geographic utilities (distance metrics, bounds, center calculations)
pub mod geo_utils;
pub use geo_utils::{DistanceMetric, Haversine, Planar};

// Station dataset (ingestion, validation, id-indexed lookup)
pub mod dataset;
pub use dataset::{Dataset, RawStationRecord};

// Nearest-neighbor search with oracle enrichment
pub mod nearest;
pub use nearest::{find_nearest, FinderConfig, NeighborResult};

// Clustering strategies for placement candidates
pub mod cluster;
pub use cluster::{
    cluster_by_density, cluster_by_threshold, ClusterSummary, DensityConfig, ProximityGroup, NOISE,
};

// External routing oracle (HTTP client + mock)
pub mod oracle;
pub use oracle::{HttpRoutingOracle, MockRoutingOracle, OracleConfig, RouteLeg, RoutingOracle};

// Geocoding client (place name -> coordinates)
pub mod geocode;
pub use geocode::{GeocodeClient, GeocodeConfig};

// Synthetic candidate-point generation
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use chargemap::GeoPoint;
/// let point = GeoPoint::new(12.9387, 77.5810); // Bangalore
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Render as the `"lat,lng"` string form used by routing APIs.
    pub fn to_query_string(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Bounding box for a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// Stable identifier for a station record.
pub type StationId = String;

/// Charger hardware category, mapped from the dataset's integer type code.
///
/// Unknown codes fold into [`ChargerType::Other`] so a single bad record
/// cannot sink a dataset load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargerType {
    /// AC slow charger (type code 1)
    AcSlow,
    /// AC fast charger (type code 2)
    AcFast,
    /// DC fast charger (type code 3)
    DcFast,
    /// High-power DC charger (type code 4)
    DcHighPower,
    /// Battery swap station (type code 5)
    BatterySwap,
    /// Unrecognized type code
    Other,
}

impl ChargerType {
    /// Map a dataset type code to a charger type.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::AcSlow,
            2 => Self::AcFast,
            3 => Self::DcFast,
            4 => Self::DcHighPower,
            5 => Self::BatterySwap,
            _ => Self::Other,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AcSlow => "AC Slow",
            Self::AcFast => "AC Fast",
            Self::DcFast => "DC Fast",
            Self::DcHighPower => "DC High Power",
            Self::BatterySwap => "Battery Swap",
            Self::Other => "Other",
        }
    }
}

/// A charging station record owned by a [`Dataset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    /// Stable identity key, used to correlate neighbor results back to
    /// station details.
    pub id: StationId,
    pub point: GeoPoint,
    pub charger_type: ChargerType,
    pub address: String,
    pub city: String,
    pub state: String,
}
