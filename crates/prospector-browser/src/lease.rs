//! Borrowed-or-owned page handle.

use crate::actions::{BrowserActions, OwnedPage};
use crate::error::Result;

/// A page used for one lookup.
///
/// A borrowed page belongs to the caller and is never closed here. An owned
/// page was launched for this lookup and must be released exactly once,
/// whatever the outcome.
pub enum PageLease<'a> {
    Borrowed(&'a dyn BrowserActions),
    Owned(Box<dyn OwnedPage>),
}

impl<'a> PageLease<'a> {
    pub fn page(&self) -> &dyn BrowserActions {
        match self {
            Self::Borrowed(page) => *page,
            Self::Owned(owned) => owned.actions(),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Give the page back. Owned pages are closed; borrowed pages are left
    /// as they are.
    pub async fn release(self) -> Result<()> {
        match self {
            Self::Borrowed(_) => Ok(()),
            Self::Owned(owned) => {
                tracing::debug!("Closing owned browser page");
                owned.close().await
            }
        }
    }
}

impl std::fmt::Debug for PageLease<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Borrowed(_) => f.write_str("PageLease::Borrowed"),
            Self::Owned(_) => f.write_str("PageLease::Owned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[tokio::test]
    async fn test_release_closes_only_owned_pages() {
        let caller_page = FakePage::new();
        PageLease::Borrowed(&caller_page)
            .release()
            .await
            .expect("release borrowed");
        assert!(!caller_page.is_closed());

        let launched = FakePage::new();
        let lease = PageLease::Owned(Box::new(launched.clone()));
        assert!(lease.is_owned());
        lease.release().await.expect("release owned");
        assert!(launched.is_closed());
    }
}
