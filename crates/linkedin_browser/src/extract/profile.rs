//! Member profile pages.

use super::{Extractor, FieldReport};
use crate::{ItemField, PageHandle};
use async_trait::async_trait;
use linkedin_core::{Education, Experience, ProfileRecord};
use linkedin_error::LinkedInResult;

const TOP_CARD: &str = "main .pv-top-card, main section.artdeco-card, main";
const NAME: &str = "main h1, h1";
const HEADLINE: &str = "main .text-body-medium.break-words, .pv-text-details__left-panel .text-body-medium";
const LOCATION: &str =
    "main .text-body-small.inline.t-black--light.break-words, .pv-text-details__left-panel .text-body-small";
const ABOUT: &str = "#about ~ .display-flex span[aria-hidden='true'], #about ~ div .inline-show-more-text span[aria-hidden='true']";
const EXPERIENCE_ITEMS: &str = "#experience ~ .pvs-list__outer-container li.artdeco-list__item, #experience ~ div li.artdeco-list__item";
const EDUCATION_ITEMS: &str = "#education ~ .pvs-list__outer-container li.artdeco-list__item, #education ~ div li.artdeco-list__item";
const SKILLS: &str = "#skills ~ .pvs-list__outer-container .t-bold span[aria-hidden='true'], #skills ~ div .t-bold span[aria-hidden='true']";

const EXPERIENCE_FIELDS: &[ItemField] = &[
    ItemField::text("title", ".t-bold span[aria-hidden='true']"),
    ItemField::text("company", ".t-14.t-normal:not(.t-black--light) span[aria-hidden='true']"),
    ItemField::text("date_range", ".t-14.t-normal.t-black--light span[aria-hidden='true']"),
    ItemField::text("location", ".t-14.t-normal.t-black--light + .t-14.t-normal.t-black--light span[aria-hidden='true']"),
    ItemField::text("description", ".inline-show-more-text span[aria-hidden='true']"),
];

const EDUCATION_FIELDS: &[ItemField] = &[
    ItemField::text("institution", ".t-bold span[aria-hidden='true']"),
    ItemField::text("degree", ".t-14.t-normal:not(.t-black--light) span[aria-hidden='true']"),
    ItemField::text("date_range", ".t-14.t-normal.t-black--light span[aria-hidden='true']"),
];

/// Reads a member profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileExtractor;

#[async_trait]
impl Extractor for ProfileExtractor {
    type Output = ProfileRecord;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn content_selector(&self) -> &'static str {
        TOP_CARD
    }

    async fn extract(&self, page: &dyn PageHandle, url: &str) -> LinkedInResult<ProfileRecord> {
        let name = page.text(NAME).await?;
        let headline = page.text(HEADLINE).await?;
        let location = page.text(LOCATION).await?;
        let about = page.text(ABOUT).await?;

        let experiences: Vec<Experience> = page
            .items(EXPERIENCE_ITEMS, EXPERIENCE_FIELDS)
            .await?
            .into_iter()
            .map(|mut item| Experience {
                title: item.remove("title"),
                company: item.remove("company").map(|c| strip_employment_type(&c)),
                date_range: item.remove("date_range"),
                location: item.remove("location"),
                description: item.remove("description"),
            })
            .collect();
        let educations: Vec<Education> = page
            .items(EDUCATION_ITEMS, EDUCATION_FIELDS)
            .await?
            .into_iter()
            .map(|mut item| Education {
                institution: item.remove("institution"),
                degree: item.remove("degree"),
                date_range: item.remove("date_range"),
            })
            .collect();
        let mut skills = page.texts(SKILLS).await?;
        skills.dedup();

        let company = experiences.first().and_then(|e| e.company.clone());

        let mut report = FieldReport::default();
        report.required("name", &name);
        report.optional("headline", &headline);
        report.optional("company", &company);
        report.optional("location", &location);
        report.optional("about", &about);
        report.list("experiences", &experiences);
        report.list("educations", &educations);
        report.list("skills", &skills);
        report.finish(url)?;

        Ok(ProfileRecord {
            url: url.to_string(),
            name,
            headline,
            company,
            location,
            about,
            experiences,
            educations,
            skills,
        })
    }
}

/// "Acme · Full-time" renders employer and employment type together.
fn strip_employment_type(company: &str) -> String {
    company
        .split('·')
        .next()
        .unwrap_or(company)
        .trim()
        .to_string()
}
