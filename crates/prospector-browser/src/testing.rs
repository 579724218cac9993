//! In-memory page doubles for exercising login and extraction without Chrome.
//!
//! A [`FakePage`] serves canned HTML per URL. Selector checks run against
//! that HTML with `scraper`, clicks can move the page to another URL, and
//! every side effect is recorded so tests can assert on it. Clones share
//! state, which lets a test keep a handle on a page it gave away.

use crate::actions::{BrowserActions, OwnedPage, PageLauncher};
use crate::cookies::StoredCookie;
use crate::error::{BrowserError, Result};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Side effects recorded by a [`FakePage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Navigate(String),
    Click(String),
    Fill(String, String),
    ScrollIntoView(String),
    WaitForNavigation,
    Screenshot,
    SetCookies(usize),
}

/// Canned document served for one URL.
#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    html: String,
    transitions: HashMap<String, String>,
    cookies: Vec<StoredCookie>,
}

impl FakeDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    /// Clicking `selector` moves the page to `url`.
    #[must_use]
    pub fn on_click(mut self, selector: &str, url: &str) -> Self {
        self.transitions
            .insert(selector.to_string(), url.to_string());
        self
    }

    /// A click transition away from this document sets a cookie.
    #[must_use]
    pub fn sets_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.push(StoredCookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: ".linkedin.com".to_string(),
            path: "/".to_string(),
            expires: -1.0,
            http_only: true,
            secure: true,
        });
        self
    }
}

#[derive(Debug, Default)]
struct FakeState {
    documents: HashMap<String, FakeDocument>,
    current: Option<String>,
    actions: Vec<PageAction>,
    cookies: Vec<StoredCookie>,
    closed: bool,
}

impl FakeState {
    fn document(&self) -> Option<&FakeDocument> {
        self.current.as_ref().and_then(|url| self.documents.get(url))
    }

    fn matches(&self, selector: &str) -> Result<bool> {
        let parsed = Selector::parse(selector)
            .map_err(|e| BrowserError::SelectorNotFound(format!("{selector}: {e}")))?;
        Ok(self
            .document()
            .is_some_and(|doc| Html::parse_document(&doc.html).select(&parsed).next().is_some()))
    }

    fn require(&self, selector: &str) -> Result<()> {
        if self.matches(selector)? {
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(selector.to_string()))
        }
    }
}

/// Scriptable in-memory page.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    state: Arc<Mutex<FakeState>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` at `url`.
    #[must_use]
    pub fn with_document(self, url: &str, document: FakeDocument) -> Self {
        self.lock().documents.insert(url.to_string(), document);
        self
    }

    /// Everything the page was asked to do, in order.
    pub fn recorded(&self) -> Vec<PageAction> {
        self.lock().actions.clone()
    }

    /// URLs passed to `navigate`, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.lock()
            .actions
            .iter()
            .filter_map(|action| match action {
                PageAction::Navigate(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not hide the state from the others.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl BrowserActions for FakePage {
    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.lock();
        state.actions.push(PageAction::Navigate(url.to_string()));
        if !state.documents.contains_key(url) {
            return Err(BrowserError::NavigationError(format!("{url}: not served")));
        }
        state.current = Some(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .lock()
            .current
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        self.lock().matches(selector)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut state = self.lock();
        state.actions.push(PageAction::Click(selector.to_string()));
        state.require(selector)?;

        let transition = state
            .document()
            .and_then(|doc| doc.transitions.get(selector).map(|url| (url.clone(), doc.cookies.clone())));
        if let Some((url, cookies)) = transition {
            state.cookies.extend(cookies);
            state.current = Some(url);
        }
        Ok(())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        let mut state = self.lock();
        state.require(selector)?;
        state
            .actions
            .push(PageAction::Fill(selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        if self.lock().matches(selector)? {
            Ok(())
        } else {
            Err(BrowserError::Timeout(format!(
                "waiting {timeout_ms}ms for {selector}"
            )))
        }
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        self.lock().actions.push(PageAction::WaitForNavigation);
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        let mut state = self.lock();
        state.require(selector)?;
        state
            .actions
            .push(PageAction::ScrollIntoView(selector.to_string()));
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        Ok(self
            .lock()
            .document()
            .map(|doc| doc.html.clone())
            .unwrap_or_default())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.lock().actions.push(PageAction::Screenshot);
        Ok(b"\x89PNG fake".to_vec())
    }

    async fn cookies(&self) -> Result<Vec<StoredCookie>> {
        Ok(self.lock().cookies.clone())
    }

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<()> {
        let mut state = self.lock();
        state.actions.push(PageAction::SetCookies(cookies.len()));
        state.cookies.extend_from_slice(cookies);
        Ok(())
    }
}

#[async_trait::async_trait]
impl OwnedPage for FakePage {
    fn actions(&self) -> &dyn BrowserActions {
        self
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.lock().closed = true;
        Ok(())
    }
}

/// Launcher handing out clones of one [`FakePage`].
#[derive(Debug, Default)]
pub struct FakeLauncher {
    page: FakePage,
    opened: AtomicUsize,
    fail: bool,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// A launcher whose browser never starts.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of pages opened so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn page(&self) -> &FakePage {
        &self.page
    }
}

#[async_trait::async_trait]
impl PageLauncher for FakeLauncher {
    async fn open_page(&self) -> Result<Box<dyn OwnedPage>> {
        if self.fail {
            return Err(BrowserError::ChromiumError(
                "browser failed to start".to_string(),
            ));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.page.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_click_transition_moves_page() {
        let page = FakePage::new()
            .with_document(
                "https://a.test/",
                FakeDocument::new(r#"<a id="next">next</a>"#).on_click("#next", "https://b.test/"),
            )
            .with_document("https://b.test/", FakeDocument::new("<p>b</p>"));

        page.navigate("https://a.test/").await.expect("navigate");
        page.click("#next").await.expect("click");

        assert_eq!(page.current_url().await.expect("url"), "https://b.test/");
        assert!(page.exists("p").await.expect("exists"));
        assert_eq!(page.navigations(), vec!["https://a.test/".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_selector_times_out() {
        let page = FakePage::new().with_document("https://a.test/", FakeDocument::new("<p></p>"));
        page.navigate("https://a.test/").await.expect("navigate");

        let err = page
            .wait_for_selector("#absent", 50)
            .await
            .expect_err("should time out");
        assert!(matches!(err, BrowserError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_launcher_shares_state_with_handed_out_pages() {
        let launcher = FakeLauncher::new(FakePage::new());
        let owned = launcher.open_page().await.expect("open");
        owned.close().await.expect("close");

        assert_eq!(launcher.opened(), 1);
        assert!(launcher.page().is_closed());
    }
}
