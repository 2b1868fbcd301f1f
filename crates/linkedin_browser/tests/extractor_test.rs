//! Extractors run through a session against scripted pages.

mod test_utils;

use linkedin_browser::testing::{FakeDriver, FakePage};
use linkedin_browser::{
    CompanyExtractor, EmployeeExtractor, JobExtractor, JobSearchExtractor, PostExtractor,
    ProfileExtractor, job_url, post_url,
};
use linkedin_core::JobSearchQuery;
use linkedin_error::{ExtractionReason, LinkedInErrorKind};
use test_utils::*;

#[tokio::test]
async fn profile_reads_experience_education_and_skills() {
    let driver = FakeDriver::new();
    driver.page(
        PROFILE,
        profile_page()
            .text(".pv-text-details__left-panel .text-body-small", "London")
            .item(
                "#experience ~ div li.artdeco-list__item",
                &[
                    ("title", "Analyst"),
                    ("company", "Analytical Engine Co · Full-time"),
                    ("date_range", "1842 - 1843"),
                ],
            )
            .item(
                "#education ~ div li.artdeco-list__item",
                &[("institution", "Home tutoring"), ("degree", "Mathematics")],
            )
            .text("#skills ~ div .t-bold span[aria-hidden='true']", "Mathematics")
            .text("#skills ~ div .t-bold span[aria-hidden='true']", "Mathematics")
            .text("#skills ~ div .t-bold span[aria-hidden='true']", "Poetry"),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let profile = session.extract(PROFILE, &ProfileExtractor).await.unwrap();

    assert_eq!(profile.url, PROFILE);
    assert_eq!(profile.location.as_deref(), Some("London"));
    assert_eq!(profile.company.as_deref(), Some("Analytical Engine Co"));
    assert_eq!(profile.experiences.len(), 1);
    assert_eq!(profile.experiences[0].date_range.as_deref(), Some("1842 - 1843"));
    assert_eq!(profile.educations[0].degree.as_deref(), Some("Mathematics"));
    assert_eq!(profile.skills, vec!["Mathematics", "Poetry"]);
    assert!(profile.about.is_none());
}

#[tokio::test]
async fn company_details_are_read_by_label() {
    let about = "https://www.linkedin.com/company/acme/about/";
    let driver = FakeDriver::new();
    driver.page(
        about,
        FakePage::new()
            .text("main", "company")
            .text(".org-top-card-summary__title", "Acme Corp")
            .text(".org-top-card-summary__tagline", "Tools for builders")
            .text("dl dt", "Website")
            .text("dl dt", "Company size")
            .text("dl dt", "Specialties")
            .text(".org-page-details__definition-text", "https://acme.example")
            .text(
                ".org-page-details__definition-text",
                "51-200 employees\n120 associated members",
            )
            .text(
                ".org-page-details__definition-text",
                "Rust, tooling, and compilers",
            ),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let company = session.extract(about, &CompanyExtractor).await.unwrap();

    assert_eq!(company.url, "https://www.linkedin.com/company/acme/");
    assert_eq!(company.name.as_deref(), Some("Acme Corp"));
    assert_eq!(company.website.as_deref(), Some("https://acme.example"));
    assert_eq!(company.company_size.as_deref(), Some("51-200 employees"));
    assert_eq!(company.specialties, vec!["Rust", "tooling", "compilers"]);
    assert!(company.industry.is_none());
    assert!(company.employees.is_empty());
}

#[tokio::test]
async fn employees_skip_unnamed_cards_and_respect_limit() {
    let people = "https://www.linkedin.com/company/acme/people/";
    let driver = FakeDriver::new();
    driver.page(
        people,
        FakePage::new()
            .text("main", "people")
            .item(
                ".org-people-profile-card__profile-info",
                &[
                    ("name", "Grace Hopper"),
                    ("headline", "Rear Admiral"),
                    ("profile_url", "https://www.linkedin.com/in/grace/?miniProfileUrn=x"),
                ],
            )
            .item(".org-people-profile-card__profile-info", &[("headline", "LinkedIn Member")])
            .item(".org-people-profile-card__profile-info", &[("name", "Alan Turing")])
            .item(".org-people-profile-card__profile-info", &[("name", "Edsger Dijkstra")]),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let employees = session
        .extract(people, &EmployeeExtractor::new(2))
        .await
        .unwrap();

    assert_eq!(employees.len(), 2);
    assert_eq!(
        employees[0].profile_url.as_deref(),
        Some("https://www.linkedin.com/in/grace/")
    );
    assert_eq!(employees[1].name.as_deref(), Some("Alan Turing"));
}

#[tokio::test]
async fn job_summary_line_is_split() {
    let (url, id) = job_url(
        "https://www.linkedin.com/jobs/view/senior-rust-engineer-4012345678/?trk=x",
        ORIGIN,
    )
    .unwrap();
    let driver = FakeDriver::new();
    driver.page(
        &url,
        FakePage::new()
            .text("main", "job")
            .text("h1", "Senior Rust Engineer")
            .text(".topcard__org-name-link", "Acme Corp")
            .text(
                ".job-details-jobs-unified-top-card__primary-description-container .tvm__text",
                "Berlin, Germany",
            )
            .text(
                ".job-details-jobs-unified-top-card__primary-description-container .tvm__text",
                "2 days ago",
            )
            .text(
                ".job-details-jobs-unified-top-card__primary-description-container .tvm__text",
                "87 applicants",
            )
            .text("#job-details", "Build the compiler."),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let job = session.extract(&url, &JobExtractor::new(id)).await.unwrap();

    assert_eq!(job.job_id.as_deref(), Some("4012345678"));
    assert_eq!(job.title.as_deref(), Some("Senior Rust Engineer"));
    assert_eq!(job.company.as_deref(), Some("Acme Corp"));
    assert_eq!(job.location.as_deref(), Some("Berlin, Germany"));
    assert_eq!(job.posted_date.as_deref(), Some("2 days ago"));
    assert_eq!(job.applicant_count.as_deref(), Some("87 applicants"));
    assert!(job.employment_type.is_none());
}

#[tokio::test]
async fn job_search_reads_cards() {
    let query = JobSearchQuery::new("rust", Some("Berlin".into()), Some(10)).unwrap();
    let url = query.to_url(ORIGIN);
    let driver = FakeDriver::new();
    driver.page(
        &url,
        FakePage::new()
            .text(".jobs-search-results-list", "results")
            .item(
                ".job-card-container",
                &[
                    ("title", "Rust Engineer\nRust Engineer"),
                    ("company", "Acme Corp"),
                    ("location", "Berlin (Hybrid)"),
                    ("url", "/jobs/view/42/?refId=abc"),
                ],
            ),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let jobs = session
        .extract(&url, &JobSearchExtractor::new(*query.limit()))
        .await
        .unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title.as_deref(), Some("Rust Engineer"));
    assert_eq!(
        jobs[0].url.as_deref(),
        Some("https://www.linkedin.com/jobs/view/42/")
    );
}

#[tokio::test]
async fn job_search_without_results_is_empty() {
    let url = JobSearchQuery::new("cobol", None, None).unwrap().to_url(ORIGIN);
    let driver = FakeDriver::new();
    driver.page(
        &url,
        FakePage::new().text(".jobs-search-no-results-banner", "No matching jobs found."),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let jobs = session
        .extract(&url, &JobSearchExtractor::new(25))
        .await
        .unwrap();

    assert!(jobs.is_empty());
}

#[tokio::test]
async fn post_keeps_cdn_images_and_counts() {
    let (url, urn) = post_url(
        "https://www.linkedin.com/posts/ada_rust-activity-7394701839126016000-3V9W?utm_source=share",
        ORIGIN,
    )
    .unwrap();
    let driver = FakeDriver::new();
    driver.page(
        &url,
        FakePage::new()
            .text("main", "post")
            .text(".update-components-actor__name", "Ada Lovelace\nAda Lovelace")
            .text(".update-components-actor__description", "Analyst")
            .text(".update-components-actor__sub-description", "3d • Edited •")
            .text(".feed-shared-text", "Notes on the engine")
            .text(".social-details-social-counts__reactions-count", "128")
            .text(".social-details-social-counts__comments", "12 comments")
            .attr(".update-components-image img", "src", "https://media.licdn.com/dms/image/1")
            .attr(".update-components-image img", "src", "https://static.licdn.com/avatar.png"),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let post = session
        .extract(&url, &PostExtractor::new(urn))
        .await
        .unwrap();

    assert_eq!(
        post.post_urn.as_ref().map(|u| u.as_str()),
        Some("urn:li:activity:7394701839126016000")
    );
    assert_eq!(post.author.as_deref(), Some("Ada Lovelace"));
    assert_eq!(post.posted_date.as_deref(), Some("3d"));
    assert_eq!(post.reactions.as_deref(), Some("128"));
    assert_eq!(post.comments.as_deref(), Some("12"));
    assert!(post.reposts.is_none());
    assert_eq!(post.images, vec!["https://media.licdn.com/dms/image/1"]);
    assert!(!post.has_video);
}

#[tokio::test]
async fn post_without_author_is_content_not_found() {
    let (url, urn) = post_url(
        "https://www.linkedin.com/feed/update/urn:li:activity:7394701839126016000/",
        ORIGIN,
    )
    .unwrap();
    let driver = FakeDriver::new();
    driver.page(
        &url,
        FakePage::new()
            .text("main", "post")
            .text(".feed-shared-text", "orphaned text"),
    );
    let session = session_with(&driver, cookie_credentials(COOKIE));

    let err = session
        .extract(&url, &PostExtractor::new(urn))
        .await
        .unwrap_err();

    match err.kind() {
        LinkedInErrorKind::Extraction(failure) => {
            assert_eq!(failure.reason, ExtractionReason::ContentNotFound);
            assert_eq!(failure.missing, vec!["author".to_string()]);
            assert_eq!(failure.found, vec!["content".to_string()]);
        }
        other => panic!("expected extraction error, got {other:?}"),
    }
}
