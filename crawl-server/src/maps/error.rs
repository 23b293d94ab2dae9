//! Maps client error types.

/// Errors from the maps web-service client.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Leading slice of the offending body, for logs.
        body: Option<String>,
    },

    /// API returned an error status code or an unexpected service status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by maps API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (check GOOGLE_MAPS_API_KEY)")]
    Unauthorized,

    /// Mock fixture could not be loaded
    #[error("fixture error: {0}")]
    Fixture(String),
}
