use crate::cookies::StoredCookie;
use crate::error::Result;

/// Page-level browser actions used by login and extraction.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL and wait for the load to finish
    async fn navigate(&self, url: &str) -> Result<()>;

    /// URL of the document currently loaded
    async fn current_url(&self) -> Result<String>;

    /// Whether at least one element matches the selector
    async fn exists(&self, selector: &str) -> Result<bool>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Fill a form field by selector
    async fn fill_field(&self, selector: &str, value: &str) -> Result<()>;

    /// Wait for a selector to appear
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Wait for the next navigation triggered by the page to complete
    async fn wait_for_navigation(&self) -> Result<()>;

    /// Scroll the first matching element into the viewport
    async fn scroll_into_view(&self, selector: &str) -> Result<()>;

    /// Serialized HTML of the rendered document
    async fn content(&self) -> Result<String>;

    /// Take a PNG screenshot
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Cookies visible to the page
    async fn cookies(&self) -> Result<Vec<StoredCookie>>;

    /// Install cookies before navigating
    async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<()>;
}

/// A page this process opened and is responsible for shutting down.
#[async_trait::async_trait]
pub trait OwnedPage: Send + Sync {
    /// The page's actions
    fn actions(&self) -> &dyn BrowserActions;

    /// Close the page and the browser behind it
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens fresh pages on demand.
#[async_trait::async_trait]
pub trait PageLauncher: Send + Sync {
    /// Launch a browser and open a page with persisted cookies applied
    async fn open_page(&self) -> Result<Box<dyn OwnedPage>>;
}

/// Whether two URLs point at the same document, ignoring a trailing slash.
pub fn same_document(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_document() {
        assert!(same_document(
            "https://www.linkedin.com/in/ada/",
            "https://www.linkedin.com/in/ada"
        ));
        assert!(!same_document(
            "https://www.linkedin.com/feed/",
            "https://www.linkedin.com/in/ada"
        ));
    }
}
