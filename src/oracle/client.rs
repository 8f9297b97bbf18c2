//! Distance-matrix HTTP client.
//!
//! Provides async route lookups against a Google-style distance-matrix
//! endpoint. Handles authentication, concurrency limiting, and conversion
//! to the domain-level [`RouteLeg`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::GeoPoint;

use super::error::OracleError;
use super::types::{MatrixResponse, RouteLeg};
use super::RoutingOracle;

/// Default base URL for the distance-matrix API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the routing oracle client.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to the production endpoint)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OracleConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distance-matrix API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting;
/// every request carries the configured timeout, so a stuck candidate
/// lookup cannot stall a query indefinitely.
#[derive(Debug, Clone)]
pub struct HttpRoutingOracle {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl HttpRoutingOracle {
    /// Create a new client with the given configuration.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn fetch_matrix(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<MatrixResponse, OracleError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OracleError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origins", origin.to_query_string()),
                ("destinations", destination.to_query_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(OracleError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OracleError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OracleError::Json {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RoutingOracle for HttpRoutingOracle {
    async fn route(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<RouteLeg, OracleError> {
        let matrix = self.fetch_matrix(origin, destination).await?;

        // The matrix API reports request-level problems in-band
        match matrix.status.as_str() {
            "OK" => {}
            "OVER_QUERY_LIMIT" => return Err(OracleError::RateLimited),
            "REQUEST_DENIED" => return Err(OracleError::Unauthorized),
            other => {
                return Err(OracleError::Api {
                    status: 0,
                    message: matrix
                        .error_message
                        .unwrap_or_else(|| other.to_string()),
                })
            }
        }

        let element = matrix
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or(OracleError::NoRoute)?;

        if element.status != "OK" {
            return Err(OracleError::NoRoute);
        }

        let (distance, duration) = match (&element.distance, &element.duration) {
            (Some(d), Some(t)) => (d.clone(), t.clone()),
            _ => return Err(OracleError::NoRoute),
        };

        Ok(RouteLeg {
            distance_text: distance.text,
            distance_meters: distance.value,
            duration_text: duration.text,
            resolved_address: matrix.destination_addresses.first().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OracleConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = OracleConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let config = OracleConfig::new("test-key");
        let client = HttpRoutingOracle::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn parse_matrix_response() {
        let body = r#"{
            "status": "OK",
            "origin_addresses": ["Origin St"],
            "destination_addresses": ["12 Charger Rd"],
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "distance": {"text": "5.2 km", "value": 5200},
                    "duration": {"text": "12 mins", "value": 720}
                }]
            }]
        }"#;

        let matrix: MatrixResponse = serde_json::from_str(body).unwrap();
        assert_eq!(matrix.status, "OK");
        let element = &matrix.rows[0].elements[0];
        assert_eq!(element.distance.as_ref().unwrap().value, 5200.0);
        assert_eq!(matrix.destination_addresses[0], "12 Charger Rd");
    }
}
