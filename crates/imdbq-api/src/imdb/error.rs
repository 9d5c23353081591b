//! Error types for the IMDb client.

use reqwest::StatusCode;

/// Result type alias using [`ImdbError`].
pub type Result<T> = std::result::Result<T, ImdbError>;

/// Errors returned by [`ImdbClient`](super::ImdbClient) operations.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ImdbError {
    /// The lookup endpoint did not return a title for the identifier.
    #[error("title not found: {imdb_id} (HTTP {status})")]
    NotFound {
        /// Identifier that was looked up.
        imdb_id: String,
        /// Status returned by the lookup endpoint.
        status: StatusCode,
    },

    /// The search endpoint answered with a non-200 status.
    #[error("unexpected HTTP {status} from {url}")]
    Status {
        /// Status returned by the server.
        status: StatusCode,
        /// Request URL.
        url: String,
    },

    /// Transport failure reported by the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("failed to decode JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be assembled.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ImdbError {
    /// Returns `true` for the lookup miss case.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
