//! REST client for the people lookup endpoint.

use crate::error::{ApiError, Result};
use crate::person::{ApiDocument, PersonLookup};
use async_trait::async_trait;
use prospector_auth::AccessToken;
use prospector_core::LinkedInConfig;
use reqwest::Client;
use std::time::Duration;
use url::form_urlencoded;

/// Profile lookups through the formal API.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Look up a member by public profile URL.
    async fn person_by_url(&self, token: &AccessToken, profile_url: &str) -> Result<PersonLookup>;
}

/// reqwest-backed client for the LinkedIn REST API.
pub struct LinkedInApiClient {
    client: Client,
    base_url: String,
    fields: Vec<String>,
}

impl LinkedInApiClient {
    /// Create a client against `base_url` requesting `fields`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>, fields: Vec<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fields,
        })
    }

    /// Build a client from the `[linkedin]` configuration section.
    pub fn from_config(config: &LinkedInConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.api_fields.clone(),
            config.timeout_secs,
        )
    }

    /// Endpoint URL for a member lookup.
    #[must_use]
    pub fn person_endpoint(&self, profile_url: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(profile_url.as_bytes()).collect();
        format!(
            "{}/v1/people/url={}:({})",
            self.base_url,
            encoded,
            self.fields.join(",")
        )
    }
}

#[async_trait]
impl ProfileApi for LinkedInApiClient {
    async fn person_by_url(&self, token: &AccessToken, profile_url: &str) -> Result<PersonLookup> {
        let endpoint = self.person_endpoint(profile_url);
        tracing::debug!("GET {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("format", "json")])
            .bearer_auth(token.secret())
            .header("x-li-format", "json")
            .send()
            .await?;

        // Error documents come back with non-2xx statuses, so the body is
        // decoded regardless of status.
        let status = response.status();
        let body = response.text().await?;
        let document: ApiDocument =
            serde_json::from_str(&body).map_err(|e| ApiError::ParseError {
                status: status.as_u16(),
                message: e.to_string(),
            })?;

        let lookup = document.into_lookup(profile_url);
        if let PersonLookup::Failed { message } = &lookup {
            tracing::warn!("API lookup for {} failed ({}): {}", profile_url, status, message);
        }
        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_endpoint_encodes_url() {
        let client = LinkedInApiClient::new(
            "https://api.linkedin.com/",
            vec!["id".to_string(), "first-name".to_string()],
            10,
        )
        .expect("client");

        assert_eq!(
            client.person_endpoint("https://www.linkedin.com/in/ada"),
            "https://api.linkedin.com/v1/people/url=https%3A%2F%2Fwww.linkedin.com%2Fin%2Fada:(id,first-name)"
        );
    }
}
