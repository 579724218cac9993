//! Error types for the API client.

use thiserror::Error;

/// Errors that can occur while talking to the REST API.
///
/// Error documents returned by the API itself are not errors at this level;
/// they surface as [`crate::PersonLookup::Failed`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("failed to parse API response (status {status}): {message}")]
    ParseError {
        /// HTTP status code
        status: u16,
        /// Decoder message
        message: String,
    },

    /// Client construction failed
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
