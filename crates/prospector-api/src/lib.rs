//! Prospector API - LinkedIn REST API bindings.
//!
//! Provides the [`ProfileApi`] trait used by the lookup orchestrator and a
//! reqwest-backed [`LinkedInApiClient`] implementation.
//!
//! The API answers every lookup with either a person document or a
//! `{ "message": ... }` error document. [`PersonLookup`] keeps both shapes so
//! callers can decide which messages are terminal and which ones warrant a
//! browser fallback (see [`INTERNAL_ERROR_MESSAGE`] and [`PRIVATE_PROFILE_ID`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod person;

pub use client::{LinkedInApiClient, ProfileApi};
pub use error::{ApiError, Result};
pub use person::{PersonLookup, INTERNAL_ERROR_MESSAGE, PRIVATE_PROFILE_ID};
