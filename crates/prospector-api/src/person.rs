//! Person documents returned by the people lookup endpoint.

use prospector_core::{Position, ProfileResult};
use serde::Deserialize;

/// Identity the API reports for members whose profile is not public.
///
/// Inferred from observed API behaviour, not documented; verify against the
/// live API when lookups start misclassifying profiles.
pub const PRIVATE_PROFILE_ID: &str = "private";

/// Error message the API returns for its own failures, as opposed to an
/// invalid member URL.
///
/// Inferred from observed API behaviour, not documented.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal API server error";

/// Outcome of a people lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonLookup {
    /// The API returned a person document
    Found(ProfileResult),
    /// The API returned an error document
    Failed {
        /// Message from the error document
        message: String,
    },
}

impl PersonLookup {
    /// Whether the API failed on its own side rather than rejecting the URL.
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        matches!(self, Self::Failed { message } if message == INTERNAL_ERROR_MESSAGE)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiDocument {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<ApiLocation>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub num_connections: Option<u32>,
    #[serde(default)]
    pub positions: Option<ApiPositions>,
    #[serde(default)]
    pub public_profile_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLocation {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPositions {
    #[serde(default)]
    pub values: Vec<ApiPosition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPosition {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub company: Option<ApiCompany>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCompany {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ApiDocument {
    /// Convert into a lookup outcome. `requested_url` is used when the
    /// document does not carry a public profile URL.
    pub(crate) fn into_lookup(self, requested_url: &str) -> PersonLookup {
        if let Some(message) = self.message {
            return PersonLookup::Failed { message };
        }

        let is_private_profile = self.id.as_deref() == Some(PRIVATE_PROFILE_ID);

        let positions: Vec<Position> = self
            .positions
            .map(|p| p.values)
            .unwrap_or_default()
            .into_iter()
            .map(|p| {
                let company = p.company.unwrap_or(ApiCompany {
                    id: None,
                    name: None,
                });
                Position {
                    company_name: company.name.unwrap_or_default(),
                    company_id: company.id,
                    title: p.title,
                    is_current: p.is_current,
                    linkedin_url: None,
                }
            })
            .collect();

        PersonLookup::Found(ProfileResult {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            headline: self.headline.unwrap_or_default(),
            location: self.location.and_then(|l| l.name).unwrap_or_default(),
            summary: self.summary.unwrap_or_default(),
            current_company: positions.first().cloned(),
            school: None,
            connections_number: self.num_connections,
            positions,
            related_people: Vec::new(),
            linkedin_url: self
                .public_profile_url
                .unwrap_or_else(|| requested_url.to_string()),
            is_private_profile,
            company: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup(value: serde_json::Value) -> PersonLookup {
        let doc: ApiDocument = serde_json::from_value(value).expect("valid document");
        doc.into_lookup("https://www.linkedin.com/in/requested")
    }

    #[test]
    fn test_person_document() {
        let result = lookup(json!({
            "id": "x1y2",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "headline": "Analyst",
            "location": { "name": "London, United Kingdom" },
            "numConnections": 321,
            "positions": {
                "_total": 2,
                "values": [
                    { "title": "Analyst", "isCurrent": true, "company": { "id": 1035, "name": "Engines Ltd" } },
                    { "title": "Intern", "isCurrent": false, "company": { "name": "Looms" } }
                ]
            },
            "publicProfileUrl": "https://www.linkedin.com/in/ada"
        }));

        let PersonLookup::Found(profile) = result else {
            panic!("expected a person");
        };
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.location, "London, United Kingdom");
        assert_eq!(profile.connections_number, Some(321));
        assert_eq!(profile.positions.len(), 2);
        assert_eq!(profile.positions[0].company_id, Some(1035));
        assert_eq!(
            profile.current_company.as_ref().map(|c| c.company_name.as_str()),
            Some("Engines Ltd")
        );
        assert_eq!(profile.linkedin_url, "https://www.linkedin.com/in/ada");
        assert!(!profile.is_private_profile);
    }

    #[test]
    fn test_private_sentinel() {
        let result = lookup(json!({ "id": "private", "firstName": "private", "lastName": "private" }));
        let PersonLookup::Found(profile) = result else {
            panic!("expected a person");
        };
        assert!(profile.is_private_profile);
        assert_eq!(profile.linkedin_url, "https://www.linkedin.com/in/requested");
        assert!(profile.positions.is_empty());
    }

    #[test]
    fn test_error_document() {
        let result = lookup(json!({ "errorCode": 0, "message": "Invalid member URL", "status": 400 }));
        assert_eq!(
            result,
            PersonLookup::Failed {
                message: "Invalid member URL".to_string()
            }
        );
        assert!(!result.is_internal_error());

        let internal = lookup(json!({ "message": INTERNAL_ERROR_MESSAGE, "status": 500 }));
        assert!(internal.is_internal_error());
    }
}
