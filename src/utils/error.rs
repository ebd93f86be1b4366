//! Error types for the page fetcher
//!
//! Transport-level failures are reported as [`FetchError`] and classified into
//! the crate-wide [`crate::error::Error`] kinds at the client boundary.

use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error (connection reset, malformed response, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Connection refused or DNS resolution failure
    #[error("Connection failed: {0}")]
    Connect(String),

    /// URL could not be built or parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Body could not be decoded to text
    #[error("Decoding error: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl FetchError {
    /// Classify a reqwest error into the most specific variant
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Http(err)
        }
    }

    /// Whether the failure happened on the network path
    ///
    /// Everything except local setup, URL and decoding problems counts.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status(_) | Self::Timeout | Self::Connect(_)
        )
    }
}
