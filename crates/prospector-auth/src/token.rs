//! Access token value type.

use prospector_core::Timestamp;
use std::fmt;
use zeroize::Zeroizing;

/// OAuth bearer token with its expiration time.
#[derive(Clone)]
pub struct AccessToken {
    token: Zeroizing<String>,
    expires_at: Timestamp,
}

impl AccessToken {
    /// Create a token that expires at `expires_at`.
    pub fn new(token: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            expires_at,
        }
    }

    /// Create a token that expires `expires_in` seconds from now.
    pub fn expiring_in(token: impl Into<String>, expires_in: i64) -> Self {
        Self::new(token, Timestamp::in_seconds(expires_in))
    }

    /// The bearer secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.token
    }

    /// When the token stops being valid.
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Whether the current time is later than the expiry.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_past()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry() {
        assert!(!AccessToken::expiring_in("abc", 3600).is_expired());
        assert!(AccessToken::expiring_in("abc", -1).is_expired());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = AccessToken::expiring_in("super-secret", 60);
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert_eq!(token.secret(), "super-secret");
    }
}
