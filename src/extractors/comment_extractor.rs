//! Comment extraction
//!
//! Builds a `Comment` from one comment region. The author-identity rule
//! lives here too since the post header renders its author the same way.

use super::landmark::{children, Landmarks, Scope};
use super::normalize::{clean_display_name, extract_handle};
use super::Comment;
use crate::error::{ExtractError, ExtractResult};

/// Display name plus optional handle, as rendered in a `user-name` region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub username: String,
    pub handle: Option<String>,
}

/// Read the author from the first `user-name` region in scope.
///
/// The first non-blank child is the display name; the next one holds the
/// handle wrapped in parentheses. A missing handle leaves `handle` empty
/// rather than failing.
pub fn author_identity(scope: &Scope<'_>, landmarks: &Landmarks) -> ExtractResult<Author> {
    let user_name = scope.first(&landmarks.user_name)?;
    let mut nodes = children(user_name)
        .into_iter()
        .filter(|node| !node.is_blank());

    let username = nodes
        .next()
        .map(|node| clean_display_name(&node.text()))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ExtractError::structure_mismatch("user_name display name", scope.record())
        })?;

    let handle = nodes
        .next()
        .map(|node| extract_handle(&node.text()))
        .filter(|handle| !handle.is_empty());

    Ok(Author { username, handle })
}

pub fn extract_comment(scope: &Scope<'_>, landmarks: &Landmarks) -> ExtractResult<Comment> {
    let author = author_identity(scope, landmarks)?;
    let headline = scope.text(&landmarks.user_headline)?;
    let timestamp = scope.text(&landmarks.comment_timestamp)?;

    // Earlier nodes (quoted replies and such) are dropped
    let body_region = scope.first(&landmarks.comment_body)?;
    let body = children(body_region)
        .into_iter()
        .filter(|node| !node.is_blank())
        .last()
        .map(|node| node.text().trim().to_string())
        .ok_or_else(|| ExtractError::structure_mismatch("comment_body content", scope.record()))?;

    Ok(Comment {
        username: author.username,
        handle: author.handle,
        headline,
        timestamp,
        body,
    })
}
