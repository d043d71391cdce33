//! HTML-to-record extraction
//!
//! Each module handles one document shape. `Extractor` compiles the
//! configured landmarks once and can be shared between threads.

pub mod comment_extractor;
pub mod index_extractor;
pub mod landmark;
pub mod normalize;
pub mod post_extractor;

pub use landmark::{Landmark, Landmarks};
pub use normalize::*;

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::config::{CommentPolicy, ExtractorConfig};
use crate::error::{ExtractError, ExtractResult};

/// One post card from an index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub vote_count: u64,
    pub id: u64,
    pub target_url: String,
    pub title: String,
    pub tagline: String,
    pub comments_url: String,
    pub comments_count: u64,
}

/// A post page with its comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: u64,
    pub vote_count: u64,
    pub username: String,
    pub handle: Option<String>,
    /// Poster's headline; read from the page but not part of the record schema
    #[serde(skip)]
    pub headline: String,
    pub target_url: String,
    pub title: String,
    pub tagline: String,
    pub comments: Vec<Comment>,
    /// Date as written in the page's `time` element
    pub posted_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub username: String,
    pub handle: Option<String>,
    pub headline: String,
    /// As rendered, e.g. "2h ago"
    pub timestamp: String,
    pub body: String,
}

/// Result of a post page extraction.
///
/// `comment_errors` is only ever filled under `CommentPolicy::Skip`.
#[derive(Debug, Clone)]
pub struct PostExtraction {
    pub post: PostDetail,
    pub comment_errors: Vec<ExtractError>,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    landmarks: Landmarks,
    comment_policy: CommentPolicy,
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> ExtractResult<Self> {
        Ok(Self {
            landmarks: Landmarks::compile(&config.selectors)?,
            comment_policy: config.comment_policy,
        })
    }

    pub fn extract_index(&self, html: &str) -> ExtractResult<Vec<PostSummary>> {
        let document = Html::parse_document(html);
        index_extractor::extract_cards(&document, &self.landmarks)
    }

    pub fn extract_post(&self, html: &str) -> ExtractResult<PostExtraction> {
        let document = Html::parse_document(html);
        post_extractor::extract_post(&document, &self.landmarks, self.comment_policy)
    }

    /// Extract a single comment from a markup fragment.
    ///
    /// When the fragment carries its own comment region, replies nested in
    /// it are left out of the lookup.
    pub fn extract_comment(&self, fragment: &str) -> ExtractResult<Comment> {
        let fragment = Html::parse_fragment(fragment);
        let root = landmark::Scope::new(fragment.root_element(), "comment fragment");
        let scope = match root.first(&self.landmarks.comment) {
            Ok(region) => landmark::Scope::new(region, "comment fragment")
                .fenced(&self.landmarks.comment),
            Err(_) => root,
        };
        comment_extractor::extract_comment(&scope, &self.landmarks)
    }
}

/// Extract an index page with the default landmarks
pub fn extract_index(html: &str) -> ExtractResult<Vec<PostSummary>> {
    Extractor::new(&ExtractorConfig::default())?.extract_index(html)
}

/// Extract a post page with the default landmarks, failing on any bad comment
pub fn extract_post(html: &str) -> ExtractResult<PostDetail> {
    Extractor::new(&ExtractorConfig::default())?
        .extract_post(html)
        .map(|extraction| extraction.post)
}

/// Extract a comment fragment with the default landmarks
pub fn extract_comment(fragment: &str) -> ExtractResult<Comment> {
    Extractor::new(&ExtractorConfig::default())?.extract_comment(fragment)
}
