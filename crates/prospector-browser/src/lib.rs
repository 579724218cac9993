//! Browser automation for pages the API cannot answer.
//!
//! Provides:
//! - [`BrowserActions`], the page operations login and extraction rely on
//! - a Chromium implementation launched per lookup with a randomized
//!   user agent and the persisted cookie jar applied
//! - [`Authenticator`], which signs in when a page asks for it
//! - [`PageLease`], which keeps caller-provided pages open and closes
//!   launched ones

pub mod actions;
pub mod cookies;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod lease;
pub mod login;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use actions::{same_document, BrowserActions, OwnedPage, PageLauncher};
pub use cookies::{CookieStore, StoredCookie};
pub use engine::{BrowserEngine, ChromiumLauncher, ChromiumPage};
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use lease::PageLease;
pub use login::{Authenticator, Credentials, LoginSelectors};
