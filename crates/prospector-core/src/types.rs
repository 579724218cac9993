//! Shared types used across the Prospector workspace.
//!
//! The result structs serialize with camelCase keys so the JSON output keeps
//! the shape consumers of the lookup already expect.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin used to absolutize relative links found on rendered pages.
pub const LINKEDIN_BASE_URL: &str = "https://www.linkedin.com";

/// One entry of a member's work history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Company display name
    pub company_name: String,
    /// Numeric company identifier, only known when the position came from the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,
    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether the position is marked as current
    #[serde(default)]
    pub is_current: bool,
    /// Link to the company page, when the page rendered one
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// A member listed in the "people also viewed" panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPerson {
    /// Display name
    pub name: String,
    /// Headline shown under the name
    pub position: String,
    /// Link to the member's profile
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// Profile data for a single member.
///
/// When a company page could be resolved from the current position, the
/// company details are nested under [`ProfileResult::company`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResult {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Profile headline
    pub headline: String,
    /// Location display string
    pub location: String,
    /// About / summary text
    pub summary: String,
    /// Most recent position
    #[serde(default)]
    pub current_company: Option<Position>,
    /// School shown on the top card
    #[serde(default)]
    pub school: Option<String>,
    /// Connection count (capped at 500 by the site)
    #[serde(default)]
    pub connections_number: Option<u32>,
    /// Work history, most recent first
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Members shown alongside this profile
    #[serde(default)]
    pub related_people: Vec<RelatedPerson>,
    /// Canonical profile URL
    pub linkedin_url: String,
    /// Whether the API reported the profile as private
    #[serde(default)]
    pub is_private_profile: bool,
    /// Details of the current company, when resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyResult>,
}

impl ProfileResult {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Organization data scraped from a company or school page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResult {
    /// Organization name
    pub name: String,
    /// Industry label
    pub industry: String,
    /// About text
    #[serde(default)]
    pub description: Option<String>,
    /// Website as displayed
    pub website: String,
    /// Headquarters location
    #[serde(default)]
    pub headquarters: Option<String>,
    /// Year founded
    #[serde(default)]
    pub founded_year: Option<u32>,
    /// Company type (public, privately held, ...)
    #[serde(default)]
    pub company_type: Option<String>,
    /// Lower bound of the staff count range
    #[serde(default)]
    pub company_size: Option<u32>,
    /// Specialties text
    #[serde(default)]
    pub specialties: Option<String>,
    /// Follower count
    #[serde(default)]
    pub followers: Option<u32>,
    /// Employees with a profile on the site
    #[serde(default)]
    pub members_on_linkedin: Option<u32>,
    /// Page URL after navigation
    pub linkedin_url: String,
}

/// Final result of one lookup.
///
/// Serialized untagged: a profile (optionally with a nested company), a
/// company alone, or `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    /// The API rejected the URL
    Error {
        /// Message reported by the API
        error: String,
    },
    /// A member profile, with its company when one was resolved
    Profile(Box<ProfileResult>),
    /// A company or school page looked up directly
    Company(CompanyResult),
}

impl LookupOutcome {
    /// Build an error outcome.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Whether this outcome is an error result.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The profile, if this outcome carries one.
    #[must_use]
    pub fn profile(&self) -> Option<&ProfileResult> {
        match self {
            Self::Profile(profile) => Some(profile),
            _ => None,
        }
    }

    /// The company, whether returned alone or nested under a profile.
    #[must_use]
    pub fn company(&self) -> Option<&CompanyResult> {
        match self {
            Self::Profile(profile) => profile.company.as_ref(),
            Self::Company(company) => Some(company),
            Self::Error { .. } => None,
        }
    }
}

impl From<ProfileResult> for LookupOutcome {
    fn from(profile: ProfileResult) -> Self {
        Self::Profile(Box::new(profile))
    }
}

impl From<CompanyResult> for LookupOutcome {
    fn from(company: CompanyResult) -> Self {
        Self::Company(company)
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Timestamp `seconds` from now. Negative values point to the past.
    #[must_use]
    pub fn in_seconds(seconds: i64) -> Self {
        Self(Utc::now() + Duration::seconds(seconds))
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Whether the current time is strictly later than this timestamp.
    #[must_use]
    pub fn is_past(&self) -> bool {
        Utc::now() > self.0
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get seconds since Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
