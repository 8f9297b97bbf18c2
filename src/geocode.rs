//! Geocoding client: free-text place name to coordinates.
//!
//! Thin wrapper over a Nominatim-style search endpoint. The rest of the
//! crate only ever sees the resolved [`GeoPoint`]; "not found" is a
//! normal `None`, not an error.

use serde::Deserialize;

use crate::oracle::OracleError;
use crate::GeoPoint;

/// Default Nominatim search endpoint.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for the search endpoint.
    pub base_url: String,
    /// User-Agent header (Nominatim requires one).
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "chargemap".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeocodeConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// A single search hit. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeocodeConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Resolve a place name to coordinates.
    ///
    /// Returns `Ok(None)` when the place is unknown.
    pub async fn geocode(&self, place: &str) -> Result<Option<GeoPoint>, OracleError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

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

        let hits: Vec<SearchHit> = serde_json::from_str(&body).map_err(|e| OracleError::Json {
            message: e.to_string(),
        })?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let latitude: f64 = hit.lat.parse().map_err(|_| OracleError::Json {
            message: format!("non-numeric latitude '{}'", hit.lat),
        })?;
        let longitude: f64 = hit.lon.parse().map_err(|_| OracleError::Json {
            message: format!("non-numeric longitude '{}'", hit.lon),
        })?;

        Ok(Some(GeoPoint::new(latitude, longitude)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_hits() {
        let body = r#"[{"lat": "12.9716", "lon": "77.5946", "display_name": "Bengaluru"}]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].lat, "12.9716");
    }

    #[test]
    fn config_defaults() {
        let config = GeocodeConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
