//! Page-type extractors driving a live page into parsed results.

use crate::error::{Result, ScanError};
use crate::parser::{CompanyParser, CompanySelectors, ProfileParser, ProfileSelectors};
use prospector_browser::BrowserActions;
use prospector_core::{CompanyResult, ProfileResult, LINKEDIN_BASE_URL};

/// Reads a member profile from the page currently loaded.
#[async_trait::async_trait]
pub trait ProfileExtractor: Send + Sync {
    /// Extract the profile shown on `page`
    async fn extract_profile(&self, page: &dyn BrowserActions) -> Result<ProfileResult>;
}

/// Reads an organization from the page currently loaded.
#[async_trait::async_trait]
pub trait CompanyExtractor: Send + Sync {
    /// Extract the company or school shown on `page`
    async fn extract_company(&self, page: &dyn BrowserActions) -> Result<CompanyResult>;
}

/// Page interactions that reveal lazily rendered profile sections.
#[derive(Debug, Clone)]
pub struct ProfileTriggers {
    /// Present once the profile has rendered
    pub landmark: String,
    /// Expands a truncated summary
    pub summary_toggle: String,
    /// Present when the top card names a current company
    pub top_card_company: String,
    /// Experience list, loaded when scrolled into view
    pub experience_section: String,
}

impl Default for ProfileTriggers {
    fn default() -> Self {
        Self {
            landmark: "section.pv-profile-section".to_string(),
            summary_toggle: "button.pv-top-card-section__summary-toggle-button".to_string(),
            top_card_company: "span.pv-top-card-v2-section__company-name".to_string(),
            experience_section: "#experience-section".to_string(),
        }
    }
}

/// Page interactions that reveal the company details panel.
#[derive(Debug, Clone)]
pub struct CompanyTriggers {
    /// Button expanding the about section
    pub show_details: String,
    /// Panel rendered after expanding
    pub details_panel: String,
}

impl Default for CompanyTriggers {
    fn default() -> Self {
        Self {
            show_details: "#org-about-company-module__show-details-btn".to_string(),
            details_panel: "div.org-about-company-module__about-us-extra".to_string(),
        }
    }
}

/// Extractor for the current LinkedIn page layout.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    profile_selectors: ProfileSelectors,
    company_selectors: CompanySelectors,
    profile_triggers: ProfileTriggers,
    company_triggers: CompanyTriggers,
    selector_timeout_ms: u64,
}

impl PageExtractor {
    /// Create an extractor with the default selectors.
    #[must_use]
    pub fn new(selector_timeout_ms: u64) -> Self {
        Self {
            profile_selectors: ProfileSelectors::default(),
            company_selectors: CompanySelectors::default(),
            profile_triggers: ProfileTriggers::default(),
            company_triggers: CompanyTriggers::default(),
            selector_timeout_ms,
        }
    }

    /// Replace the profile selectors.
    #[must_use]
    pub fn with_profile_selectors(mut self, selectors: ProfileSelectors) -> Self {
        self.profile_selectors = selectors;
        self
    }

    /// Replace the company selectors.
    #[must_use]
    pub fn with_company_selectors(mut self, selectors: CompanySelectors) -> Self {
        self.company_selectors = selectors;
        self
    }

    async fn wait(&self, page: &dyn BrowserActions, selector: &str) -> Result<()> {
        let url = page.current_url().await?;
        page.wait_for_selector(selector, self.selector_timeout_ms)
            .await
            .map_err(|e| ScanError::Extraction {
                page: url,
                reason: e.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl ProfileExtractor for PageExtractor {
    async fn extract_profile(&self, page: &dyn BrowserActions) -> Result<ProfileResult> {
        let triggers = &self.profile_triggers;
        self.wait(page, &triggers.landmark).await?;

        if page.exists(&triggers.summary_toggle).await? {
            page.click(&triggers.summary_toggle).await?;
        }
        if page.exists(&triggers.top_card_company).await?
            && page.exists(&triggers.experience_section).await?
        {
            page.scroll_into_view(&triggers.experience_section).await?;
        }

        let html = page.content().await?;
        let url = page.current_url().await?;
        ProfileParser::new(&self.profile_selectors, LINKEDIN_BASE_URL.to_string()).parse(&html, &url)
    }
}

#[async_trait::async_trait]
impl CompanyExtractor for PageExtractor {
    async fn extract_company(&self, page: &dyn BrowserActions) -> Result<CompanyResult> {
        let triggers = &self.company_triggers;
        self.wait(page, &triggers.show_details).await?;
        page.click(&triggers.show_details).await?;
        self.wait(page, &triggers.details_panel).await?;

        let html = page.content().await?;
        let url = page.current_url().await?;
        CompanyParser::new(&self.company_selectors).parse(&html, &url)
    }
}
