//! URL classification and company URL resolution.

use prospector_core::{ProfileResult, LINKEDIN_BASE_URL};

const COMPANY_PATH: &str = "/company/";
const SCHOOL_PATH: &str = "/school/";

/// Whether `url` points at a company or school page.
///
/// Substring match, so tracking prefixes and query strings are tolerated.
pub fn is_company_or_school_page(url: &str) -> bool {
    [COMPANY_PATH, SCHOOL_PATH]
        .iter()
        .any(|path| url.contains(&format!("{LINKEDIN_BASE_URL}{path}")))
}

/// Company page URL for a numeric company identifier.
pub fn company_url_for_id(id: u64) -> String {
    format!("{LINKEDIN_BASE_URL}{COMPANY_PATH}{id}")
}

/// Company page to visit for a profile's most recent position.
///
/// Prefers the API's company identifier and falls back to the link the
/// rendered page showed. Anything that is not a company or school page
/// yields `None`.
pub fn resolve_company_url(profile: &ProfileResult) -> Option<String> {
    let position = profile
        .positions
        .first()
        .or(profile.current_company.as_ref())?;

    let url = match position.company_id {
        Some(id) => company_url_for_id(id),
        None => position.linkedin_url.clone()?,
    };

    is_company_or_school_page(&url).then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::Position;

    fn profile_with(position: Position) -> ProfileResult {
        ProfileResult {
            current_company: Some(position.clone()),
            positions: vec![position],
            ..ProfileResult::default()
        }
    }

    #[test]
    fn test_company_and_school_pages() {
        assert!(is_company_or_school_page(
            "https://www.linkedin.com/company/1337"
        ));
        assert!(is_company_or_school_page(
            "https://www.linkedin.com/school/stanford-university/"
        ));
        assert!(!is_company_or_school_page("https://www.linkedin.com/in/ada"));
        assert!(!is_company_or_school_page("https://example.com/company/1"));
    }

    #[test]
    fn test_resolve_prefers_company_id() {
        let profile = profile_with(Position {
            company_name: "Analytical Engines".to_string(),
            company_id: Some(1337),
            linkedin_url: Some("https://www.linkedin.com/company/other/".to_string()),
            ..Position::default()
        });
        assert_eq!(
            resolve_company_url(&profile).as_deref(),
            Some("https://www.linkedin.com/company/1337")
        );
    }

    #[test]
    fn test_resolve_falls_back_to_link() {
        let profile = profile_with(Position {
            company_name: "Analytical Engines".to_string(),
            linkedin_url: Some("https://www.linkedin.com/company/analytical-engines/".to_string()),
            ..Position::default()
        });
        assert_eq!(
            resolve_company_url(&profile).as_deref(),
            Some("https://www.linkedin.com/company/analytical-engines/")
        );
    }

    #[test]
    fn test_unresolvable_company() {
        assert_eq!(resolve_company_url(&ProfileResult::default()), None);

        let search_link = profile_with(Position {
            company_name: "Freelance".to_string(),
            linkedin_url: Some("https://www.linkedin.com/search/results/?keywords=Freelance".to_string()),
            ..Position::default()
        });
        assert_eq!(resolve_company_url(&search_link), None);
    }
}
