//! Single post pages.

use super::{Extractor, FieldReport, leading_token};
use crate::PageHandle;
use async_trait::async_trait;
use linkedin_core::{PostPageRecord, Urn};
use linkedin_error::LinkedInResult;

const POST: &str = ".feed-shared-update-v2, .update-components-actor, main";
const AUTHOR: &str = ".update-components-actor__name, .feed-shared-actor__name";
const AUTHOR_TITLE: &str = ".update-components-actor__description, .feed-shared-actor__description";
const CONTENT: &str = ".feed-shared-update-v2__description, .feed-shared-text, [dir='ltr'] .break-words";
const POSTED: &str = ".update-components-actor__sub-description, .feed-shared-actor__sub-description";
const REACTIONS: &str = ".social-details-social-counts__reactions-count, [aria-label*='reaction']";
const COMMENTS: &str = ".social-details-social-counts__comments, [aria-label*='comment']";
const REPOSTS: &str = "[aria-label*='repost']";
const IMAGES: &str = ".feed-shared-image__container img, .feed-shared-image img, .update-components-image img";
const VIDEO: &str = "video";
const ARTICLE_TITLE: &str = ".feed-shared-article__title, .update-components-article__title";

/// Images outside the platform CDN are avatars or tracking pixels.
const MEDIA_HOST: &str = "media.licdn.com";
const MAX_IMAGES: usize = 5;

/// Reads a single post.
#[derive(Debug, Clone, Default)]
pub struct PostExtractor {
    urn: Option<Urn>,
}

impl PostExtractor {
    /// Extractor that stamps `urn` on the record.
    pub fn new(urn: Option<Urn>) -> Self {
        Self { urn }
    }
}

#[async_trait]
impl Extractor for PostExtractor {
    type Output = PostPageRecord;

    fn name(&self) -> &'static str {
        "post"
    }

    fn content_selector(&self) -> &'static str {
        POST
    }

    async fn extract(&self, page: &dyn PageHandle, url: &str) -> LinkedInResult<PostPageRecord> {
        let author = page.text(AUTHOR).await?.map(|a| first_line(&a));
        let author_title = page.text(AUTHOR_TITLE).await?;
        let content = page.text(CONTENT).await?;
        let posted_date = page
            .text(POSTED)
            .await?
            .and_then(|d| d.split('•').next().map(|s| s.trim().to_string()))
            .filter(|d| !d.is_empty());
        let reactions = leading_token(page.text(REACTIONS).await?);
        let comments = leading_token(page.text(COMMENTS).await?);
        let reposts = leading_token(page.text(REPOSTS).await?);
        let images: Vec<String> = page
            .attributes(IMAGES, "src")
            .await?
            .into_iter()
            .filter(|src| src.contains(MEDIA_HOST))
            .take(MAX_IMAGES)
            .collect();
        let has_video = page.exists(VIDEO).await?;
        let article_title = page.text(ARTICLE_TITLE).await?;

        let mut report = FieldReport::default();
        report.required("author", &author);
        report.optional("author_title", &author_title);
        report.optional("content", &content);
        report.optional("posted_date", &posted_date);
        report.optional("reactions", &reactions);
        report.optional("comments", &comments);
        report.optional("reposts", &reposts);
        report.list("images", &images);
        report.optional("article_title", &article_title);
        report.finish(url)?;

        Ok(PostPageRecord {
            url: url.to_string(),
            post_urn: self.urn.clone(),
            author,
            author_title,
            content,
            posted_date,
            reactions,
            comments,
            reposts,
            images,
            has_video,
            article_title,
        })
    }
}

/// Actor names repeat for screen readers on a second line.
fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or(text).trim().to_string()
}
