//! Prospector Core - Foundation crate for the Prospector lookup tool.
//!
//! This crate provides the result types, error handling and configuration
//! management that all other Prospector crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Lookup results (`ProfileResult`, `CompanyResult`, `LookupOutcome`) and `Timestamp`
//!
//! # Example
//!
//! ```rust
//! use prospector_core::{AppConfig, LookupOutcome};
//!
//! let config = AppConfig::default();
//! assert!(config.browser.headless);
//!
//! let outcome = LookupOutcome::error("Invalid member URL");
//! assert!(outcome.is_error());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, LinkedInConfig, SessionConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{
    CompanyResult, LookupOutcome, Position, ProfileResult, RelatedPerson, Timestamp,
    LINKEDIN_BASE_URL,
};
