//! Routing oracle client.
//!
//! This module provides an HTTP client for a distance-matrix routing API,
//! which reports real-world travel distance and duration between two
//! coordinates.
//!
//! Key characteristics:
//! - Requests are bounded by a semaphore (the API is rate limited) and
//!   carry a per-request timeout
//! - A failed lookup surfaces as a per-candidate [`OracleError`], never a
//!   panic or a process-wide failure
//! - [`MockRoutingOracle`] serves fixed legs for tests and offline runs

mod client;
mod error;
mod mock;
mod types;

pub use client::{HttpRoutingOracle, OracleConfig};
pub use error::OracleError;
pub use mock::MockRoutingOracle;
pub use types::{MatrixElement, MatrixResponse, MatrixRow, RouteLeg, TextValue};

use async_trait::async_trait;

use crate::GeoPoint;

/// External service returning real travel distance between coordinates.
///
/// Implemented by [`HttpRoutingOracle`] for production use and
/// [`MockRoutingOracle`] for tests.
#[async_trait]
pub trait RoutingOracle: Send + Sync {
    /// Look up the travel route from `origin` to `destination`.
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteLeg, OracleError>;
}
