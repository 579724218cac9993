//! Credential login for pages that show a sign-in prompt.

use crate::actions::{same_document, BrowserActions};
use crate::cookies::CookieStore;
use crate::error::{BrowserError, Result};
use prospector_core::{LinkedInConfig, SessionConfig};
use std::fmt;
use std::time::Duration;
use zeroize::Zeroizing;

/// Account credentials for the login form.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Credentials from the `[linkedin]` section, when both halves are set.
    pub fn from_config(config: &LinkedInConfig) -> Option<Self> {
        match (&config.email, &config.password) {
            (Some(email), Some(password)) => Some(Self::new(email.clone(), password.clone())),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Selectors of the sign-in affordance and form.
///
/// Each entry may be a selector list; the old and new form layouts are
/// both covered by default.
#[derive(Debug, Clone)]
pub struct LoginSelectors {
    pub login_link: String,
    pub login_form: String,
    pub email_input: String,
    pub password_input: String,
    pub submit_button: String,
}

impl Default for LoginSelectors {
    fn default() -> Self {
        Self {
            login_link: r#"p.login > a, a[title="Sign in"]"#.to_string(),
            login_form: "#login-email".to_string(),
            email_input: "#login-email, #username".to_string(),
            password_input: "#login-password, #password".to_string(),
            submit_button: r#"#login-submit, button[aria-label="Sign in"]"#.to_string(),
        }
    }
}

/// Logs in when a page asks for it and persists the resulting cookies.
pub struct Authenticator {
    credentials: Option<Credentials>,
    cookie_store: CookieStore,
    selectors: LoginSelectors,
    form_timeout_ms: u64,
    settle: Duration,
}

impl Authenticator {
    pub fn new(credentials: Option<Credentials>, cookie_store: CookieStore) -> Self {
        Self {
            credentials,
            cookie_store,
            selectors: LoginSelectors::default(),
            form_timeout_ms: 2000,
            settle: Duration::from_millis(2000),
        }
    }

    /// Build from configuration; credentials come from the `[linkedin]`
    /// section and waits from `[session]`.
    pub fn from_config(linkedin: &LinkedInConfig, session: &SessionConfig) -> Self {
        Self::new(
            Credentials::from_config(linkedin),
            CookieStore::new(session.cookies_file.clone()),
        )
        .with_waits(session.login_form_timeout_ms, session.login_settle_ms)
    }

    #[must_use]
    pub fn with_selectors(mut self, selectors: LoginSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    #[must_use]
    pub fn with_waits(mut self, form_timeout_ms: u64, settle_ms: u64) -> Self {
        self.form_timeout_ms = form_timeout_ms;
        self.settle = Duration::from_millis(settle_ms);
        self
    }

    /// Log in if the page shows a sign-in link, then make sure the page is
    /// on `destination`.
    ///
    /// Returns `true` when a login was performed.
    pub async fn ensure_logged_in(
        &self,
        page: &dyn BrowserActions,
        destination: Option<&str>,
    ) -> Result<bool> {
        let logged_in = if page.exists(&self.selectors.login_link).await? {
            self.log_in(page).await?;
            true
        } else {
            false
        };

        if let Some(destination) = destination {
            let current = page.current_url().await?;
            if !same_document(&current, destination) {
                tracing::debug!("Redirecting from {} to {}", current, destination);
                page.navigate(destination).await?;
            }
        }

        Ok(logged_in)
    }

    async fn log_in(&self, page: &dyn BrowserActions) -> Result<()> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            BrowserError::LoginFailed("sign-in required but no credentials configured".to_string())
        })?;

        tracing::info!("Logging in...");
        page.click(&self.selectors.login_link).await?;

        // The form is either rendered in place or on a separate login page.
        if page
            .wait_for_selector(&self.selectors.login_form, self.form_timeout_ms)
            .await
            .is_err()
        {
            page.wait_for_navigation().await?;
        }
        tokio::time::sleep(self.settle).await;

        page.fill_field(&self.selectors.email_input, &credentials.email)
            .await?;
        page.fill_field(&self.selectors.password_input, &credentials.password)
            .await?;
        page.click(&self.selectors.submit_button).await?;
        page.wait_for_navigation().await?;

        let cookies = page.cookies().await?;
        self.cookie_store.save(&cookies)?;
        tracing::info!("Logged in.");
        Ok(())
    }
}
