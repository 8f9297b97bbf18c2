//! Unified error handling for the crate.
//!
//! Pure geometry and clustering code only fails on malformed input
//! (non-finite coordinates, nonsensical parameters). Oracle-backed
//! operations isolate failures per candidate; `OracleUnavailable` is
//! reserved for the case where no candidate could be enriched at all.

use crate::oracle::OracleError;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ChargeMapError>;

/// Errors produced by dataset loading, nearest-neighbor queries, and
/// clustering.
#[derive(Debug, thiserror::Error)]
pub enum ChargeMapError {
    /// A coordinate was NaN/infinite or outside the valid degree ranges.
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A caller-supplied parameter was out of range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The dataset contains no eligible records.
    #[error("dataset has no eligible records")]
    EmptyDataset,

    /// Every prefiltered candidate failed oracle enrichment.
    ///
    /// Raw prefilter distances are not meaningful as final output, so the
    /// whole query fails rather than silently degrading.
    #[error("routing oracle unavailable: {0}")]
    OracleUnavailable(#[source] OracleError),

    /// A single oracle call failed (geocoding, ad-hoc route lookup).
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Dataset file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset CSV could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChargeMapError {
    /// Build an `InvalidCoordinate` from a point's raw components.
    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinate {
            latitude,
            longitude,
        }
    }

    /// Build an `InvalidParameter` for a named numeric parameter.
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}
