//! Prospector Authentication Layer
//!
//! Handles OAuth access tokens for the LinkedIn REST API.
//!
//! # Token lifecycle
//!
//! 1. **Exchange**: a [`TokenProvider`] trades client credentials for an
//!    [`AccessToken`] whose expiry is `now + expires_in`.
//! 2. **Session**: a [`TokenSession`] owns the current token and re-runs the
//!    exchange whenever the token is missing or expired.
//! 3. **Use**: API clients borrow the token's secret for a bearer header.
//!
//! Token secrets are held in `Zeroizing` buffers and redacted from `Debug`.

use thiserror::Error;

pub mod provider;
pub mod session;
pub mod token;

pub use provider::{OAuthTokenProvider, TokenProvider};
pub use session::TokenSession;
pub use token::AccessToken;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Client id or secret not configured
    #[error("missing OAuth client credentials: {0}")]
    MissingCredentials(String),

    /// The token endpoint rejected the exchange
    #[error("token exchange failed (status {status}): {message}")]
    TokenExchange {
        /// HTTP status code
        status: u16,
        /// Error description from the endpoint
        message: String,
    },

    /// The token endpoint answered with an unexpected body
    #[error("invalid token response: {0}")]
    InvalidResponse(String),

    /// Transport failure talking to the token endpoint
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::TokenExchange {
            status: 401,
            message: "invalid_client".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "token exchange failed (status 401): invalid_client"
        );

        let err = AuthError::MissingCredentials("client_secret".to_string());
        assert!(err.to_string().contains("client_secret"));
    }
}
