//! Company about and people pages.

use super::{Extractor, FieldReport};
use crate::{ItemField, PageHandle};
use async_trait::async_trait;
use linkedin_core::{CompanyRecord, EmployeeSummary};
use linkedin_error::LinkedInResult;

const ABOUT_SECTION: &str = ".org-page-details-module__card-spacing, .org-grid__content-height-enforcer, main";
const NAME: &str = ".org-top-card-summary__title, h1";
const TAGLINE: &str = ".org-top-card-summary__tagline, .org-top-card-primary-content__tagline";
const OVERVIEW: &str = ".org-about-us-organization-description__text, .org-page-details-module__card-spacing p.break-words";
const DETAIL_TERMS: &str = ".org-page-details__definition-term, dl dt";
const DETAIL_VALUES: &str = ".org-page-details__definition-text, dl dd:not(.org-page-details__employees-on-linkedin-count)";

const PEOPLE_SECTION: &str = ".org-people-profile-card__profile-list, .scaffold-finite-scroll__content, main";
const PEOPLE_ITEMS: &str = ".org-people-profile-card__profile-info, li.org-people-profile-card__profile-card-spacing";
const PEOPLE_FIELDS: &[ItemField] = &[
    ItemField::text("name", ".artdeco-entity-lockup__title"),
    ItemField::text("headline", ".artdeco-entity-lockup__subtitle"),
    ItemField::attr("profile_url", "a[href*='/in/']", "href"),
];

/// Reads a company's about page.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyExtractor;

#[async_trait]
impl Extractor for CompanyExtractor {
    type Output = CompanyRecord;

    fn name(&self) -> &'static str {
        "company"
    }

    fn content_selector(&self) -> &'static str {
        ABOUT_SECTION
    }

    async fn extract(&self, page: &dyn PageHandle, url: &str) -> LinkedInResult<CompanyRecord> {
        let name = page.text(NAME).await?;
        let tagline = page.text(TAGLINE).await?;
        let about = page.text(OVERVIEW).await?;

        let terms = page.texts(DETAIL_TERMS).await?;
        let values = page.texts(DETAIL_VALUES).await?;
        let detail = |label: &str| {
            terms
                .iter()
                .position(|t| t.eq_ignore_ascii_case(label))
                .and_then(|i| values.get(i).cloned())
        };

        let mut record = CompanyRecord {
            url: url.trim_end_matches("about/").to_string(),
            name,
            tagline,
            about,
            website: detail("Website"),
            industry: detail("Industry"),
            company_size: detail("Company size"),
            headquarters: detail("Headquarters"),
            founded: detail("Founded"),
            specialties: detail("Specialties")
                .map(|s| {
                    s.split([',', '\n'])
                        .map(|p| p.trim().trim_start_matches("and ").trim().to_string())
                        .filter(|p| !p.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            employees: Vec::new(),
        };
        if let Some(size) = record.company_size.take() {
            record.company_size = Some(size.lines().next().unwrap_or(&size).trim().to_string());
        }

        let mut report = FieldReport::default();
        report.required("name", &record.name);
        report.optional("tagline", &record.tagline);
        report.optional("about", &record.about);
        report.optional("website", &record.website);
        report.optional("industry", &record.industry);
        report.optional("company_size", &record.company_size);
        report.optional("headquarters", &record.headquarters);
        report.optional("founded", &record.founded);
        report.list("specialties", &record.specialties);
        report.finish(url)?;

        Ok(record)
    }
}

/// Reads the people listed on a company's people page.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeExtractor {
    limit: usize,
}

impl EmployeeExtractor {
    /// Keeps at most `limit` people.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

#[async_trait]
impl Extractor for EmployeeExtractor {
    type Output = Vec<EmployeeSummary>;

    fn name(&self) -> &'static str {
        "employees"
    }

    fn content_selector(&self) -> &'static str {
        PEOPLE_SECTION
    }

    async fn extract(
        &self,
        page: &dyn PageHandle,
        _url: &str,
    ) -> LinkedInResult<Vec<EmployeeSummary>> {
        Ok(page
            .items(PEOPLE_ITEMS, PEOPLE_FIELDS)
            .await?
            .into_iter()
            .map(|mut item| EmployeeSummary {
                name: item.remove("name"),
                headline: item.remove("headline"),
                profile_url: item
                    .remove("profile_url")
                    .map(|u| u.split('?').next().unwrap_or(&u).to_string()),
            })
            .filter(|e| e.name.is_some())
            .take(self.limit)
            .collect())
    }
}
