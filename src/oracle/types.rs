//! Wire types for the distance-matrix routing API.

use serde::{Deserialize, Serialize};

/// A text/value pair as returned by the API (e.g. `"5.2 km"` / `5200`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    /// Meters for distances, seconds for durations.
    pub value: f64,
}

/// One origin-destination element of the matrix.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

/// One row of the matrix (one origin).
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}

/// Top-level distance-matrix response.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixResponse {
    pub status: String,
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A resolved travel leg between two coordinates.
///
/// This is the domain-level result handed to the nearest-neighbor finder;
/// the wire types above never leave the oracle module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Human-readable distance (e.g. "5.2 km")
    pub distance_text: String,
    /// Travel distance in meters
    pub distance_meters: f64,
    /// Human-readable duration (e.g. "12 mins")
    pub duration_text: String,
    /// Street address the destination resolved to, when the API knows it
    pub resolved_address: Option<String>,
}
