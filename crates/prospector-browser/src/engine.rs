use crate::actions::{BrowserActions, OwnedPage, PageLauncher};
use crate::cookies::{CookieStore, StoredCookie};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, TimeSinceEpoch};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::element::Element;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use prospector_core::BrowserConfig;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Interval between DOM polls while waiting for a selector
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser automation engine
pub struct BrowserEngine {
    browser: Browser,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserEngine {
    /// Launch Chromium with the given settings and a randomized fingerprint
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        Self::with_fingerprint(config, FingerprintConfig::randomized()).await
    }

    /// Launch Chromium with a specific fingerprint
    pub async fn with_fingerprint(
        config: &BrowserConfig,
        fingerprint: FingerprintConfig,
    ) -> Result<Self> {
        let navigation_timeout = Duration::from_secs(config.navigation_timeout_secs);

        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(config.window_width, config.window_height)
            .request_timeout(navigation_timeout)
            .arg(fingerprint.user_agent_arg());
        if !config.headless {
            builder = builder.with_head();
        }
        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        tracing::debug!(
            "Launching browser (headless: {}, {}x{})",
            config.headless,
            config.window_width,
            config.window_height
        );
        let (browser, mut handler) = Browser::launch(chromium_config).await?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler error: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler,
            navigation_timeout,
        })
    }

    /// Open a blank page
    pub async fn new_page(&self) -> Result<ChromiumPage> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(ChromiumPage::new(page, self.navigation_timeout))
    }

    /// Close the browser and stop the event handler
    pub async fn close(mut self) -> Result<()> {
        let browser = &mut self.browser;
        stop_after(
            async move {
                browser.close().await?;
                browser.wait().await?;
                Ok::<(), BrowserError>(())
            },
            &self.handler,
        )
        .await?;
        tracing::debug!("Browser closed");
        Ok(())
    }
}

/// Await `closing`, then abort `handler` whether or not closing succeeded.
async fn stop_after<F>(closing: F, handler: &JoinHandle<()>) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let closed = closing.await;
    handler.abort();
    closed
}

/// A Chromium tab driven over CDP
pub struct ChromiumPage {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromiumPage {
    pub fn new(page: Page, navigation_timeout: Duration) -> Self {
        Self {
            page,
            navigation_timeout,
        }
    }

    async fn element(&self, selector: &str) -> Result<Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))
    }
}

#[async_trait::async_trait]
impl BrowserActions for ChromiumPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        tokio::time::timeout(self.navigation_timeout, self.page.goto(url))
            .await
            .map_err(|_| BrowserError::Timeout(format!("navigating to {url}")))?
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| BrowserError::NavigationError("page has no URL".to_string()))
    }

    async fn exists(&self, selector: &str) -> Result<bool> {
        let elements = self.page.find_elements(selector).await?;
        Ok(!elements.is_empty())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.element(selector).await?.click().await?;
        Ok(())
    }

    async fn fill_field(&self, selector: &str, value: &str) -> Result<()> {
        self.element(selector)
            .await?
            .click()
            .await?
            .type_str(value)
            .await?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let poll = async {
            loop {
                // Lookups fail transiently while the document is replaced.
                if self.exists(selector).await.unwrap_or(false) {
                    return;
                }
                tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(Duration::from_millis(timeout_ms), poll)
            .await
            .map_err(|_| {
                BrowserError::Timeout(format!("waiting {timeout_ms}ms for {selector}"))
            })
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        tokio::time::timeout(self.navigation_timeout, self.page.wait_for_navigation())
            .await
            .map_err(|_| BrowserError::Timeout("waiting for navigation".to_string()))??;
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        self.element(selector).await?.scroll_into_view().await?;
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        Ok(self.page.screenshot(params).await?)
    }

    async fn cookies(&self) -> Result<Vec<StoredCookie>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|c| StoredCookie {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
                expires: c.expires,
                http_only: c.http_only,
                secure: c.secure,
            })
            .collect())
    }

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<()> {
        let params: Vec<CookieParam> = cookies
            .iter()
            .map(|c| {
                let mut param = CookieParam::new(c.name.clone(), c.value.clone());
                param.domain = Some(c.domain.clone());
                param.path = Some(c.path.clone());
                param.secure = Some(c.secure);
                param.http_only = Some(c.http_only);
                if c.is_persistent() {
                    param.expires = Some(TimeSinceEpoch::new(c.expires));
                }
                param
            })
            .collect();

        if !params.is_empty() {
            self.page.set_cookies(params).await?;
        }
        Ok(())
    }
}

/// A browser launched for a single page
pub struct ChromiumSession {
    engine: BrowserEngine,
    page: ChromiumPage,
}

#[async_trait::async_trait]
impl OwnedPage for ChromiumSession {
    fn actions(&self) -> &dyn BrowserActions {
        &self.page
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let Self { engine, page } = *self;
        drop(page);
        engine.close().await
    }
}

/// Launches a fresh browser per page and applies the persisted cookie jar
pub struct ChromiumLauncher {
    config: BrowserConfig,
    cookie_store: CookieStore,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig, cookie_store: CookieStore) -> Self {
        Self {
            config,
            cookie_store,
        }
    }
}

#[async_trait::async_trait]
impl PageLauncher for ChromiumLauncher {
    async fn open_page(&self) -> Result<Box<dyn OwnedPage>> {
        let engine = BrowserEngine::launch(&self.config).await?;
        let page = engine.new_page().await?;

        let cookies = self.cookie_store.load()?;
        if !cookies.is_empty() {
            page.set_cookies(&cookies).await?;
            tracing::info!(
                "Applied {} cookies from {}",
                cookies.len(),
                self.cookie_store.path().display()
            );
        }

        Ok(Box::new(ChromiumSession { engine, page }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_aborted_when_close_fails() {
        let handler = tokio::spawn(futures::future::pending::<()>());

        let err = stop_after(
            async { Err::<(), _>(BrowserError::ChromiumError("connection reset".to_string())) },
            &handler,
        )
        .await
        .expect_err("close error is returned");

        assert!(matches!(err, BrowserError::ChromiumError(_)));
        let joined = handler.await.expect_err("handler should be cancelled");
        assert!(joined.is_cancelled());
    }

    #[tokio::test]
    async fn test_handler_aborted_after_clean_close() {
        let handler = tokio::spawn(futures::future::pending::<()>());

        stop_after(async { Ok(()) }, &handler)
            .await
            .expect("clean close");

        assert!(handler.await.expect_err("cancelled").is_cancelled());
    }
}
