//! Token providers.

use crate::token::AccessToken;
use crate::{AuthError, Result};
use async_trait::async_trait;
use prospector_core::LinkedInConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use zeroize::Zeroizing;

/// Source of fresh access tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchange credentials for a new token.
    async fn initialize(&self) -> Result<AccessToken>;
}

/// Client-credentials exchange against an OAuth token endpoint.
pub struct OAuthTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: Zeroizing<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl OAuthTokenProvider {
    /// Create a provider for the given endpoint and client credentials.
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
        })
    }

    /// Build a provider from the `[linkedin]` configuration section.
    ///
    /// # Errors
    /// Returns `MissingCredentials` when the client id or secret is unset.
    pub fn from_config(config: &LinkedInConfig) -> Result<Self> {
        let client_id = config
            .client_id
            .clone()
            .ok_or_else(|| AuthError::MissingCredentials("client_id".to_string()))?;
        let client_secret = config
            .client_secret
            .clone()
            .ok_or_else(|| AuthError::MissingCredentials("client_secret".to_string()))?;

        Self::new(
            config.token_url.clone(),
            client_id,
            client_secret,
            config.timeout_secs,
        )
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn initialize(&self) -> Result<AccessToken> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TokenErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or(body);
            tracing::error!("Token exchange failed with status {}: {}", status, message);
            return Err(AuthError::TokenExchange {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        if body.access_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "empty access_token".to_string(),
            ));
        }

        tracing::debug!("Obtained access token valid for {}s", body.expires_in);
        Ok(AccessToken::expiring_in(body.access_token, body.expires_in))
    }
}
