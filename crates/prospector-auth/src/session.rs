//! Caller-owned token session with explicit expiry checks.

use crate::provider::TokenProvider;
use crate::token::AccessToken;
use crate::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the current access token and refreshes it on demand.
pub struct TokenSession {
    provider: Arc<dyn TokenProvider>,
    current: RwLock<Option<AccessToken>>,
}

impl TokenSession {
    /// Create a session with no token yet; the first [`token`](Self::token)
    /// call performs the exchange.
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            current: RwLock::new(None),
        }
    }

    /// Create a session seeded with an existing token.
    pub fn with_token(provider: Arc<dyn TokenProvider>, token: AccessToken) -> Self {
        Self {
            provider,
            current: RwLock::new(Some(token)),
        }
    }

    /// Return a valid token, re-initializing when none is held or the held
    /// one has expired.
    pub async fn token(&self) -> Result<AccessToken> {
        {
            let guard = self.current.read().await;
            if let Some(token) = guard.as_ref().filter(|t| !t.is_expired()) {
                return Ok(token.clone());
            }
        }

        let mut guard = self.current.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref().filter(|t| !t.is_expired()) {
            return Ok(token.clone());
        }

        let token = self.initialize().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Force a new exchange regardless of the held token.
    pub async fn refresh(&self) -> Result<AccessToken> {
        let mut guard = self.current.write().await;
        let token = self.initialize().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Drop the held token.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
        tracing::debug!("Access token invalidated");
    }

    async fn initialize(&self) -> Result<AccessToken> {
        tracing::info!("Initializing the LinkedIn client...");
        match self.provider.initialize().await {
            Ok(token) => {
                tracing::debug!("Access token expires at {}", token.expires_at());
                Ok(token)
            }
            Err(e) => {
                tracing::error!("Initialization has failed: {}", e);
                Err(e)
            }
        }
    }
}
