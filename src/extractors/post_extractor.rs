//! Post page extraction
//!
//! Reads the post overview header, the post timestamp and every comment on
//! the page. What happens to a comment that fails to extract depends on the
//! configured `CommentPolicy`.

use scraper::Html;
use tracing::{debug, warn};

use super::comment_extractor::{author_identity, extract_comment};
use super::landmark::{visible_text, Landmarks, Scope};
use super::normalize::parse_noisy_int;
use super::{PostDetail, PostExtraction};
use crate::config::CommentPolicy;
use crate::error::ExtractResult;

pub fn extract_post(
    document: &Html,
    landmarks: &Landmarks,
    policy: CommentPolicy,
) -> ExtractResult<PostExtraction> {
    let page = Scope::new(document.root_element(), "post page");

    let overview = page.first(&landmarks.post_overview)?;
    let id = page.attr(overview, &landmarks.post_overview, "data-id")?;
    let id = page.normalize(&landmarks.post_overview, id, parse_noisy_int)?;

    // Header landmarks never come from inside a comment
    let header = page.clone().fenced(&landmarks.comment);
    let overview = Scope::new(overview, format!("post {id}")).fenced(&landmarks.comment);

    let vote_count = overview.text(&landmarks.vote_count)?;
    let vote_count = overview.normalize(&landmarks.vote_count, &vote_count, parse_noisy_int)?;

    let author = author_identity(&overview, landmarks)?;
    let headline = overview.text(&landmarks.user_headline)?;

    let post_url = overview.first(&landmarks.post_url)?;
    let target_url = overview.attr(post_url, &landmarks.post_url, "href")?.to_string();
    let title = visible_text(post_url);
    let tagline = overview.text(&landmarks.post_tagline)?;

    let time = header.first(&landmarks.post_time)?;
    let posted_at = header.attr(time, &landmarks.post_time, "datetime")?.to_string();

    let mut comments = Vec::new();
    let mut comment_errors = Vec::new();
    for (index, element) in page.all(&landmarks.comment).into_iter().enumerate() {
        let scope = Scope::new(element, format!("comment {} of post {id}", index + 1))
            .fenced(&landmarks.comment);
        match extract_comment(&scope, landmarks) {
            Ok(comment) => comments.push(comment),
            Err(e) => match policy {
                CommentPolicy::Abort => return Err(e),
                CommentPolicy::Skip => {
                    warn!("Skipping comment: {}", e);
                    comment_errors.push(e);
                }
            },
        }
    }

    debug!(
        "Extracted post {} with {} comments ({} skipped)",
        id,
        comments.len(),
        comment_errors.len()
    );

    Ok(PostExtraction {
        post: PostDetail {
            id,
            vote_count,
            username: author.username,
            handle: author.handle,
            headline,
            target_url,
            title,
            tagline,
            comments,
            posted_at,
        },
        comment_errors,
    })
}
