//! Routing oracle error types.

/// Errors from the routing oracle HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be parsed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by routing API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// The API found no route between the coordinates
    #[error("no route between origin and destination")]
    NoRoute,
}

impl OracleError {
    /// Whether this failure is request-specific rather than a sign the
    /// oracle itself is down. Used when deciding between dropping one
    /// candidate and failing the whole query.
    pub fn is_per_request(&self) -> bool {
        matches!(self, OracleError::NoRoute)
    }
}
