//! Index page extraction
//!
//! One `PostSummary` per post card, in the order the cards appear.

use scraper::Html;
use tracing::debug;

use super::landmark::{visible_text, Landmarks, Scope};
use super::normalize::{normalize_comment_count, parse_noisy_int};
use super::PostSummary;
use crate::error::ExtractResult;

pub fn extract_cards(document: &Html, landmarks: &Landmarks) -> ExtractResult<Vec<PostSummary>> {
    let page = Scope::new(document.root_element(), "index page");
    let cards = page.all(&landmarks.post_card);
    debug!("Found {} post cards", cards.len());

    cards
        .into_iter()
        .enumerate()
        .map(|(index, card)| {
            let card = Scope::new(card, format!("index card {}", index + 1));
            extract_card(&card, landmarks)
        })
        .collect()
}

fn extract_card(card: &Scope<'_>, landmarks: &Landmarks) -> ExtractResult<PostSummary> {
    let votes = card.first(&landmarks.vote_count)?;
    let vote_count = card.normalize(&landmarks.vote_count, &visible_text(votes), parse_noisy_int)?;
    let id = card.attr(votes, &landmarks.vote_count, "data-id")?;
    let id = card.normalize(&landmarks.vote_count, id, parse_noisy_int)?;

    let links = card.narrow(&landmarks.link_region)?;
    let post_url = links.first(&landmarks.post_url)?;
    let target_url = links.attr(post_url, &landmarks.post_url, "href")?.to_string();
    let title = visible_text(post_url);

    let tagline = card.text(&landmarks.post_tagline)?;

    let discussion = links.first(&landmarks.discussion_link)?;
    let comments_url = links
        .attr(discussion, &landmarks.discussion_link, "data-url")?
        .to_string();
    let comments_count = links.normalize(
        &landmarks.discussion_link,
        &visible_text(discussion),
        normalize_comment_count,
    )?;

    Ok(PostSummary {
        vote_count,
        id,
        target_url,
        title,
        tagline,
        comments_url,
        comments_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LandmarkSelectors;
    use crate::error::ExtractError;

    fn card(id: u64, votes: &str, title: &str, discussion: &str) -> String {
        format!(
            r##"
            <li class="post">
                <div class="upvote"><span class="vote-count" data-id="{id}">{votes}</span></div>
                <div class="url">
                    <a class="post-url" href="http://example.com/{id}">{title}</a>
                    <span class="post-tagline">Tagline for {title}</span>
                    <a class="view-discussion" data-url="/posts/{id}" href="#">{discussion}</a>
                </div>
            </li>
            "##
        )
    }

    fn extract(html: &str) -> ExtractResult<Vec<PostSummary>> {
        let landmarks = Landmarks::compile(&LandmarkSelectors::default()).unwrap();
        extract_cards(&Html::parse_document(html), &landmarks)
    }

    #[test]
    fn test_cards_in_document_order() {
        let html = format!(
            "<ul>{}{}{}</ul>",
            card(10, "1,501", "First", "12 comments"),
            card(11, "40", "Second", "1 comment"),
            card(12, "3", "Third", "View details"),
        );

        let posts = extract(&html).unwrap();
        assert_eq!(posts.len(), 3);

        assert_eq!(posts[0].id, 10);
        assert_eq!(posts[0].vote_count, 1501);
        assert_eq!(posts[0].title, "First");
        assert_eq!(posts[0].target_url, "http://example.com/10");
        assert_eq!(posts[0].tagline, "Tagline for First");
        assert_eq!(posts[0].comments_url, "/posts/10");
        assert_eq!(posts[0].comments_count, 12);

        assert_eq!(posts[1].comments_count, 1);
        assert_eq!(posts[2].comments_count, 0);
        assert_eq!(posts[2].title, "Third");
    }

    #[test]
    fn test_empty_page_has_no_posts() {
        assert!(extract("<ul></ul>").unwrap().is_empty());
    }

    #[test]
    fn test_missing_tagline_fails_card() {
        let broken = card(21, "5", "Broken", "2 comments").replace("post-tagline", "tagline");
        let html = format!("<ul>{}{}</ul>", card(20, "9", "Fine", "View details"), broken);

        let err = extract(&html).unwrap_err();
        assert_eq!(err, ExtractError::structure_mismatch("post_tagline", "index card 2"));
    }

    #[test]
    fn test_non_numeric_votes_is_format_error() {
        let html = card(30, "lots", "Hyped", "2 comments");

        match extract(&html).unwrap_err() {
            ExtractError::FormatError { landmark, record, value, .. } => {
                assert_eq!(landmark, "vote_count");
                assert_eq!(record, "index card 1");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_data_url() {
        let html = card(40, "5", "NoLink", "2 comments").replace("data-url", "data-href");

        let err = extract(&html).unwrap_err();
        assert_eq!(
            err,
            ExtractError::structure_mismatch("discussion_link[data-url]", "index card 1")
        );
    }
}
