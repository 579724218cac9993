use crate::error::{Result, ScanError};
use once_cell::sync::Lazy;
use prospector_core::{CompanyResult, Position, ProfileResult, RelatedPerson};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// First run of digits, thousands separators included.
static COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*").expect("count pattern is valid"));

/// Parse the first integer in a display string.
///
/// Thousands separators and surrounding text are ignored, and for a range
/// the lower bound is returned: `"1,001-5,000 employees"` gives `1001`.
pub fn parse_count(text: &str) -> Option<u32> {
    COUNT_PATTERN
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSelectors {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub summary: String,
    pub school: String,
    pub connections: String,
    pub experience_item: String,
    pub experience_company: String,
    pub experience_link: String,
    pub related_item: String,
    pub related_name: String,
    pub related_headline: String,
    pub related_link: String,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            name: "h1.pv-top-card-section__name".to_string(),
            headline: "h2.pv-top-card-section__headline".to_string(),
            location: "h3.pv-top-card-section__location".to_string(),
            summary: "p.pv-top-card-section__summary-text".to_string(),
            school: "a.pv-top-card-v2-section__link-education span".to_string(),
            connections: "span.pv-top-card-v2-section__connections".to_string(),
            experience_item: "#experience-section li".to_string(),
            experience_company: "span.pv-entity__secondary-title".to_string(),
            experience_link: "a.ember-view".to_string(),
            related_item: "section.pv-browsemap-section li".to_string(),
            related_name: "span.actor-name".to_string(),
            related_headline: "p.browsemap-headline".to_string(),
            related_link: "a.pv-browsemap-section__member".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySelectors {
    pub name: String,
    pub industry: String,
    pub description: String,
    pub website: String,
    pub headquarters: String,
    pub founded: String,
    pub company_type: String,
    pub company_size: String,
    pub specialties: String,
    pub followers: String,
    pub members: String,
}

impl Default for CompanySelectors {
    fn default() -> Self {
        Self {
            name: "h1.org-top-card-module__name".to_string(),
            industry: "span.company-industries".to_string(),
            description: "p.org-about-us-organization-description__text".to_string(),
            website: "a.org-about-us-company-module__website".to_string(),
            headquarters: "p.org-about-company-module__headquarters".to_string(),
            founded: "p.org-about-company-module__founded".to_string(),
            company_type: "p.org-about-company-module__company-type".to_string(),
            company_size: "p.org-about-company-module__company-staff-count-range".to_string(),
            specialties: "p.org-about-company-module__specialities".to_string(),
            followers: "span.org-top-card-module__followers-count".to_string(),
            members: "a.snackbar-description-see-all-link".to_string(),
        }
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed text of the first match, empty when nothing matches.
fn text_of(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{base_url}{href}")
    }
}

fn href_of(scope: ElementRef<'_>, selector: &Selector, base_url: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| absolutize(base_url, href))
}

pub struct ProfileParser<'a> {
    selectors: &'a ProfileSelectors,
    base_url: String,
}

impl<'a> ProfileParser<'a> {
    pub fn new(selectors: &'a ProfileSelectors, base_url: String) -> Self {
        Self {
            selectors,
            base_url,
        }
    }

    /// Parse a rendered profile page. `page_url` becomes the result's URL.
    pub fn parse(&self, html: &str, page_url: &str) -> Result<ProfileResult> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let s = self.selectors;

        let full_name = text_of(root, &compile(&s.name)?);
        let mut names = full_name.split_whitespace();
        let first_name = names.next().unwrap_or_default().to_string();
        let last_name = names.collect::<Vec<_>>().join(" ");

        let positions = self.parse_positions(root)?;
        let related_people = self.parse_related(root)?;

        Ok(ProfileResult {
            first_name,
            last_name,
            headline: text_of(root, &compile(&s.headline)?),
            location: text_of(root, &compile(&s.location)?),
            summary: text_of(root, &compile(&s.summary)?),
            current_company: positions.first().cloned(),
            school: non_empty(text_of(root, &compile(&s.school)?)),
            connections_number: parse_count(&text_of(root, &compile(&s.connections)?)),
            positions,
            related_people,
            linkedin_url: page_url.to_string(),
            is_private_profile: false,
            company: None,
        })
    }

    fn parse_positions(&self, root: ElementRef<'_>) -> Result<Vec<Position>> {
        let item = compile(&self.selectors.experience_item)?;
        let company = compile(&self.selectors.experience_company)?;
        let link = compile(&self.selectors.experience_link)?;

        Ok(root
            .select(&item)
            .map(|el| Position {
                company_name: text_of(el, &company),
                linkedin_url: href_of(el, &link, &self.base_url),
                ..Position::default()
            })
            .collect())
    }

    fn parse_related(&self, root: ElementRef<'_>) -> Result<Vec<RelatedPerson>> {
        let item = compile(&self.selectors.related_item)?;
        let name = compile(&self.selectors.related_name)?;
        let headline = compile(&self.selectors.related_headline)?;
        let link = compile(&self.selectors.related_link)?;

        Ok(root
            .select(&item)
            .map(|el| RelatedPerson {
                name: text_of(el, &name),
                position: text_of(el, &headline),
                linkedin_url: href_of(el, &link, &self.base_url),
            })
            .collect())
    }
}

pub struct CompanyParser<'a> {
    selectors: &'a CompanySelectors,
}

impl<'a> CompanyParser<'a> {
    pub fn new(selectors: &'a CompanySelectors) -> Self {
        Self { selectors }
    }

    /// Parse a rendered company page with its details panel expanded.
    pub fn parse(&self, html: &str, page_url: &str) -> Result<CompanyResult> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let s = self.selectors;
        let field = |selector: &str| -> Result<String> { Ok(text_of(root, &compile(selector)?)) };

        Ok(CompanyResult {
            name: field(&s.name)?,
            industry: field(&s.industry)?,
            description: non_empty(field(&s.description)?),
            website: field(&s.website)?,
            headquarters: non_empty(field(&s.headquarters)?),
            founded_year: parse_count(&field(&s.founded)?),
            company_type: non_empty(field(&s.company_type)?),
            company_size: parse_count(&field(&s.company_size)?),
            specialties: non_empty(field(&s.specialties)?),
            followers: parse_count(&field(&s.followers)?),
            members_on_linkedin: parse_count(&field(&s.members)?),
            linkedin_url: page_url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector_core::LINKEDIN_BASE_URL;

    const PROFILE_HTML: &str = r#"
        <section class="pv-profile-section">
            <h1 class="pv-top-card-section__name">Ada King Lovelace</h1>
            <h2 class="pv-top-card-section__headline">Analyst at Analytical Engines</h2>
            <h3 class="pv-top-card-section__location">London, United Kingdom</h3>
            <p class="pv-top-card-section__summary-text"> Notes on the engine. </p>
            <a class="pv-top-card-v2-section__link-education"><span>University of London</span></a>
            <span class="pv-top-card-v2-section__connections">500+ connections</span>
        </section>
        <section id="experience-section">
            <ul>
                <li>
                    <a class="ember-view" href="/company/analytical-engines/">
                        <span class="pv-entity__secondary-title">Analytical Engines</span>
                    </a>
                </li>
                <li>
                    <a class="ember-view" href="/search/results/?keywords=Freelance">
                        <span class="pv-entity__secondary-title">Freelance</span>
                    </a>
                </li>
            </ul>
        </section>
        <section class="pv-browsemap-section">
            <ul>
                <li>
                    <a class="pv-browsemap-section__member" href="/in/charles-babbage/">
                        <span class="actor-name">Charles Babbage</span>
                        <p class="browsemap-headline">Inventor</p>
                    </a>
                </li>
            </ul>
        </section>
    "#;

    const COMPANY_HTML: &str = r#"
        <h1 class="org-top-card-module__name">Analytical Engines</h1>
        <span class="company-industries">Computer Hardware</span>
        <span class="org-top-card-module__followers-count">1,234 followers</span>
        <div class="org-about-company-module__about-us-extra">
            <p class="org-about-us-organization-description__text">We compute.</p>
            <a class="org-about-us-company-module__website">http://engines.example</a>
            <p class="org-about-company-module__headquarters">London</p>
            <p class="org-about-company-module__founded">1837</p>
            <p class="org-about-company-module__company-type">Privately Held</p>
            <p class="org-about-company-module__company-staff-count-range">1,001-5,000 employees</p>
        </div>
        <a class="snackbar-description-see-all-link">See all 5,000 employees on LinkedIn</a>
    "#;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1,234 followers"), Some(1234));
        assert_eq!(parse_count("See all 5,000 employees on LinkedIn"), Some(5000));
        assert_eq!(parse_count("500+ connections"), Some(500));
        assert_eq!(parse_count("1,001-5,000 employees"), Some(1001));
        assert_eq!(parse_count("1837"), Some(1837));
        assert_eq!(parse_count("no digits here"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_count_pattern_keeps_separators_within_one_number() {
        let runs: Vec<&str> = COUNT_PATTERN
            .find_iter("1,001-5,000 employees")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(runs, vec!["1,001", "5,000"]);
    }

    #[test]
    fn test_parse_profile() {
        let selectors = ProfileSelectors::default();
        let parser = ProfileParser::new(&selectors, LINKEDIN_BASE_URL.to_string());
        let profile = parser
            .parse(PROFILE_HTML, "https://www.linkedin.com/in/ada/")
            .expect("parse should succeed");

        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.last_name, "King Lovelace");
        assert_eq!(profile.headline, "Analyst at Analytical Engines");
        assert_eq!(profile.location, "London, United Kingdom");
        assert_eq!(profile.summary, "Notes on the engine.");
        assert_eq!(profile.school.as_deref(), Some("University of London"));
        assert_eq!(profile.connections_number, Some(500));
        assert_eq!(profile.linkedin_url, "https://www.linkedin.com/in/ada/");
        assert!(!profile.is_private_profile);

        assert_eq!(profile.positions.len(), 2);
        assert_eq!(profile.positions[0].company_name, "Analytical Engines");
        assert_eq!(
            profile.positions[0].linkedin_url.as_deref(),
            Some("https://www.linkedin.com/company/analytical-engines/")
        );
        assert_eq!(profile.current_company.as_ref(), profile.positions.first());

        assert_eq!(profile.related_people.len(), 1);
        assert_eq!(profile.related_people[0].name, "Charles Babbage");
        assert_eq!(profile.related_people[0].position, "Inventor");
        assert_eq!(
            profile.related_people[0].linkedin_url.as_deref(),
            Some("https://www.linkedin.com/in/charles-babbage/")
        );
    }

    #[test]
    fn test_parse_sparse_profile() {
        let selectors = ProfileSelectors::default();
        let parser = ProfileParser::new(&selectors, LINKEDIN_BASE_URL.to_string());
        let profile = parser
            .parse(
                r#"<h1 class="pv-top-card-section__name">Cher</h1>"#,
                "https://www.linkedin.com/in/cher",
            )
            .expect("parse should succeed");

        assert_eq!(profile.first_name, "Cher");
        assert_eq!(profile.last_name, "");
        assert_eq!(profile.school, None);
        assert_eq!(profile.connections_number, None);
        assert!(profile.current_company.is_none());
        assert!(profile.positions.is_empty());
    }

    #[test]
    fn test_parse_company() {
        let selectors = CompanySelectors::default();
        let company = CompanyParser::new(&selectors)
            .parse(COMPANY_HTML, "https://www.linkedin.com/company/1337/")
            .expect("parse should succeed");

        assert_eq!(company.name, "Analytical Engines");
        assert_eq!(company.industry, "Computer Hardware");
        assert_eq!(company.description.as_deref(), Some("We compute."));
        assert_eq!(company.website, "http://engines.example");
        assert_eq!(company.headquarters.as_deref(), Some("London"));
        assert_eq!(company.founded_year, Some(1837));
        assert_eq!(company.company_type.as_deref(), Some("Privately Held"));
        assert_eq!(company.company_size, Some(1001));
        assert_eq!(company.specialties, None);
        assert_eq!(company.followers, Some(1234));
        assert_eq!(company.members_on_linkedin, Some(5000));
        assert_eq!(company.linkedin_url, "https://www.linkedin.com/company/1337/");
    }

    #[test]
    fn test_invalid_selector() {
        let selectors = CompanySelectors {
            name: "h1[".to_string(),
            ..CompanySelectors::default()
        };
        let err = CompanyParser::new(&selectors)
            .parse(COMPANY_HTML, "https://www.linkedin.com/company/1337/")
            .expect_err("should reject selector");
        assert!(matches!(err, ScanError::InvalidSelector { .. }));
    }
}
