//! Lookup orchestrator for profile and company URLs.
//!
//! This module provides the `LookupOrchestrator`, which asks the API first
//! and falls back to browser extraction when the API cannot answer, then
//! resolves and scrapes the member's current company.

use crate::classifier::{is_company_or_school_page, resolve_company_url};
use crate::error::{Result, ScanError};
use crate::extractor::{CompanyExtractor, PageExtractor, ProfileExtractor};
use prospector_api::{PersonLookup, ProfileApi};
use prospector_auth::TokenSession;
use prospector_browser::{Authenticator, BrowserActions, PageLauncher, PageLease};
use prospector_core::{AppConfig, CompanyResult, LookupOutcome, ProfileResult};
use std::path::PathBuf;
use std::sync::Arc;

/// Per-call lookup options.
#[derive(Default, Clone, Copy)]
pub struct LookupOptions<'a> {
    /// Page to reuse instead of launching a browser. Never closed here.
    pub page: Option<&'a dyn BrowserActions>,
    /// Scrape the profile even when the API could answer
    pub force_scrape: bool,
    /// Return the profile without resolving its company
    pub skip_company: bool,
}

impl<'a> LookupOptions<'a> {
    /// Reuse a caller-owned page.
    #[must_use]
    pub fn with_page(mut self, page: &'a dyn BrowserActions) -> Self {
        self.page = Some(page);
        self
    }

    /// Skip the API and scrape the profile.
    #[must_use]
    pub fn force_scrape(mut self) -> Self {
        self.force_scrape = true;
        self
    }

    /// Do not resolve the member's company.
    #[must_use]
    pub fn skip_company(mut self) -> Self {
        self.skip_company = true;
        self
    }
}

impl std::fmt::Debug for LookupOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupOptions")
            .field("page", &self.page.map(|_| "<caller page>"))
            .field("force_scrape", &self.force_scrape)
            .field("skip_company", &self.skip_company)
            .finish()
    }
}

/// Coordinates the API, the browser and the extractors for one lookup.
pub struct LookupOrchestrator {
    /// Access token holder, refreshed before each lookup
    session: Arc<TokenSession>,
    /// People API
    api: Arc<dyn ProfileApi>,
    /// Browser launcher used when the caller supplied no page
    launcher: Arc<dyn PageLauncher>,
    /// Signs in on pages that ask for it
    authenticator: Authenticator,
    /// Profile page extractor
    profile_extractor: Arc<dyn ProfileExtractor>,
    /// Company page extractor
    company_extractor: Arc<dyn CompanyExtractor>,
    /// Where to write the screenshot of a failed company extraction
    error_screenshot: PathBuf,
}

impl LookupOrchestrator {
    /// Create an orchestrator using [`PageExtractor`] for both page types.
    #[must_use]
    pub fn new(
        session: Arc<TokenSession>,
        api: Arc<dyn ProfileApi>,
        launcher: Arc<dyn PageLauncher>,
        authenticator: Authenticator,
    ) -> Self {
        let extractor = Arc::new(PageExtractor::new(30_000));
        Self {
            session,
            api,
            launcher,
            authenticator,
            profile_extractor: extractor.clone(),
            company_extractor: extractor,
            error_screenshot: PathBuf::from("error.png"),
        }
    }

    /// Create an orchestrator with the waits and paths from `config`.
    #[must_use]
    pub fn from_config(
        config: &AppConfig,
        session: Arc<TokenSession>,
        api: Arc<dyn ProfileApi>,
        launcher: Arc<dyn PageLauncher>,
    ) -> Self {
        let extractor = Arc::new(PageExtractor::new(config.browser.selector_timeout_ms));
        Self::new(
            session,
            api,
            launcher,
            Authenticator::from_config(&config.linkedin, &config.session),
        )
        .with_profile_extractor(extractor.clone())
        .with_company_extractor(extractor)
        .with_error_screenshot(config.session.error_screenshot.clone())
    }

    /// Use a different profile extractor.
    #[must_use]
    pub fn with_profile_extractor(mut self, extractor: Arc<dyn ProfileExtractor>) -> Self {
        self.profile_extractor = extractor;
        self
    }

    /// Use a different company extractor.
    #[must_use]
    pub fn with_company_extractor(mut self, extractor: Arc<dyn CompanyExtractor>) -> Self {
        self.company_extractor = extractor;
        self
    }

    /// Set the path of the diagnostic screenshot.
    #[must_use]
    pub fn with_error_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_screenshot = path.into();
        self
    }

    /// Look up a profile or company URL.
    ///
    /// An invalid profile URL is reported as [`LookupOutcome::Error`]. Only
    /// token, transport and company extraction failures are returned as
    /// `Err`. A page launched here is closed before returning, whatever
    /// the outcome; the caller's page is left open.
    pub async fn lookup(&self, url: &str, options: LookupOptions<'_>) -> Result<LookupOutcome> {
        tracing::info!("Getting data from {} ...", url);
        let token = self.session.token().await?;

        let mut lease = options.page.map(PageLease::Borrowed);
        let result = self.run(url, &options, &token, &mut lease).await;

        if let Some(lease) = lease {
            if let Err(e) = lease.release().await {
                tracing::warn!("Failed to close browser: {}", e);
            }
        }
        result
    }

    async fn run<'a>(
        &self,
        url: &str,
        options: &LookupOptions<'a>,
        token: &prospector_auth::AccessToken,
        lease: &mut Option<PageLease<'a>>,
    ) -> Result<LookupOutcome> {
        let mut profile: Option<ProfileResult> = None;
        let mut company_url = url.to_string();

        if !is_company_or_school_page(url) {
            let person = match self.profile_from_api(url, options, token).await? {
                ApiAnswer::Found(person) => person,
                ApiAnswer::Rejected(message) => return Ok(LookupOutcome::error(message)),
                ApiAnswer::Scrape { is_private } => {
                    let page = self.page(lease).await?;
                    let mut person = self.visit_profile(page, url).await?;
                    person.is_private_profile = is_private;
                    person
                }
            };

            if options.skip_company {
                return Ok(person.into());
            }
            match resolve_company_url(&person) {
                Some(resolved) => company_url = resolved,
                None => {
                    tracing::debug!("No company page for {}", person.linkedin_url);
                    return Ok(person.into());
                }
            }
            profile = Some(person);
        }

        let page = self.page(lease).await?;
        let company = match self.visit_company(page, &company_url).await {
            Ok(company) => company,
            Err(e) => {
                let landed = page
                    .current_url()
                    .await
                    .unwrap_or_else(|err| format!("<unknown: {err}>"));
                tracing::error!(
                    "Company extraction failed on {} (page at {}): {}",
                    company_url,
                    landed,
                    e
                );
                self.save_screenshot(page).await;
                return Err(e);
            }
        };

        Ok(match profile {
            Some(mut person) => {
                person.company = Some(company);
                person.into()
            }
            None => company.into(),
        })
    }

    async fn profile_from_api(
        &self,
        url: &str,
        options: &LookupOptions<'_>,
        token: &prospector_auth::AccessToken,
    ) -> Result<ApiAnswer> {
        if options.force_scrape {
            tracing::debug!("Scraping {} without the API", url);
            return Ok(ApiAnswer::Scrape { is_private: false });
        }

        Ok(match self.api.person_by_url(token, url).await? {
            lookup @ PersonLookup::Failed { .. } if lookup.is_internal_error() => {
                tracing::warn!("API failed internally, scraping {} instead", url);
                ApiAnswer::Scrape { is_private: false }
            }
            PersonLookup::Failed { message } => ApiAnswer::Rejected(message),
            PersonLookup::Found(person) if person.is_private_profile => {
                tracing::warn!("Profile {} is private, scraping it instead", url);
                ApiAnswer::Scrape { is_private: true }
            }
            PersonLookup::Found(person) => ApiAnswer::Found(person),
        })
    }

    /// The page for this lookup, launching a browser on first use.
    async fn page<'l, 'a>(
        &self,
        slot: &'l mut Option<PageLease<'a>>,
    ) -> Result<&'l dyn BrowserActions> {
        let lease = match slot.take() {
            Some(lease) => lease,
            None => {
                tracing::debug!("Launching browser");
                PageLease::Owned(self.launcher.open_page().await?)
            }
        };
        let lease: &'l PageLease<'a> = slot.insert(lease);
        Ok(lease.page())
    }

    async fn open(&self, page: &dyn BrowserActions, url: &str) -> Result<()> {
        tracing::debug!("Opening {}", url);
        page.navigate(url).await?;
        self.authenticator.ensure_logged_in(page, Some(url)).await?;
        Ok(())
    }

    async fn visit_profile(&self, page: &dyn BrowserActions, url: &str) -> Result<ProfileResult> {
        self.open(page, url).await?;
        self.profile_extractor.extract_profile(page).await
    }

    async fn visit_company(&self, page: &dyn BrowserActions, url: &str) -> Result<CompanyResult> {
        self.open(page, url).await?;
        self.company_extractor.extract_company(page).await
    }

    async fn save_screenshot(&self, page: &dyn BrowserActions) {
        let written = match page.screenshot().await {
            Ok(png) => tokio::fs::write(&self.error_screenshot, png)
                .await
                .map_err(ScanError::from),
            Err(e) => Err(e.into()),
        };
        match written {
            Ok(()) => tracing::info!("Screenshot saved to {}", self.error_screenshot.display()),
            Err(e) => tracing::warn!("Could not save screenshot: {}", e),
        }
    }
}

/// What the API step decided for a profile URL.
enum ApiAnswer {
    Found(ProfileResult),
    Rejected(String),
    Scrape { is_private: bool },
}
