//! Prospector Scanner - profile and company lookup orchestration.
//!
//! This crate turns a LinkedIn URL into structured data. Member profiles are
//! asked of the REST API first; the browser takes over when the API fails
//! internally or reports the profile as private. The member's current
//! company is then resolved and scraped, and nested under the profile.
//!
//! # Features
//!
//! - API-first lookups with a silent browser fallback
//! - Lazy browser launch, closed on every exit path
//! - Caller-supplied pages reused and never closed
//! - Pure HTML parsing with configurable selector sets
//! - Diagnostic screenshot when a company page cannot be read
//!
//! # Example
//!
//! ```rust,ignore
//! use prospector_scanner::{LookupOptions, LookupOrchestrator};
//! use std::sync::Arc;
//!
//! let orchestrator = LookupOrchestrator::from_config(
//!     &config,
//!     Arc::new(token_session),
//!     Arc::new(api_client),
//!     Arc::new(launcher),
//! );
//!
//! let outcome = orchestrator
//!     .lookup("https://www.linkedin.com/in/ada", LookupOptions::default())
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classifier;
#[allow(missing_docs)]
pub mod error;
pub mod extractor;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;

// Re-export commonly used types
pub use classifier::{company_url_for_id, is_company_or_school_page, resolve_company_url};
pub use error::{Result, ScanError};
pub use extractor::{CompanyExtractor, PageExtractor, ProfileExtractor};
pub use orchestrator::{LookupOptions, LookupOrchestrator};
pub use parser::{parse_count, CompanyParser, CompanySelectors, ProfileParser, ProfileSelectors};
