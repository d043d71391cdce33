//! Extractor configuration
//!
//! Landmark selectors and retrieval settings, loadable from JSON.
//! Missing keys fall back to the defaults for the 2014 markup.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};

pub const DEFAULT_BASE_URL: &str = "http://www.producthunt.co";

pub const DEFAULT_USER_AGENT: &str = "hunt_parser/0.1";

/// What the post extractor does when one comment fails to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPolicy {
    /// Fail the whole post on the first bad comment
    #[default]
    Abort,
    /// Drop the bad comment and report it alongside the post
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Site root used when building index and post URLs
    pub base_url: String,

    pub user_agent: String,

    /// Global timeout for a single page fetch
    pub timeout_secs: u64,

    pub comment_policy: CommentPolicy,

    pub selectors: LandmarkSelectors,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            comment_policy: CommentPolicy::Abort,
            selectors: LandmarkSelectors::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> ExtractResult<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::Config {
            message: e.to_string(),
        })
    }
}

/// CSS selector for every landmark the extractors look up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkSelectors {
    // Index page
    pub post_card: String,
    pub vote_count: String,
    pub link_region: String,
    pub post_url: String,
    pub post_tagline: String,
    pub discussion_link: String,

    // Post page
    pub post_overview: String,
    pub user_name: String,
    pub user_headline: String,
    pub post_time: String,

    // Comments
    pub comment: String,
    pub comment_timestamp: String,
    pub comment_body: String,
}

impl Default for LandmarkSelectors {
    fn default() -> Self {
        Self {
            post_card: ".post".to_string(),
            vote_count: ".vote-count".to_string(),
            link_region: ".url".to_string(),
            post_url: ".post-url".to_string(),
            post_tagline: ".post-tagline".to_string(),
            discussion_link: ".view-discussion".to_string(),
            post_overview: ".post-show".to_string(),
            user_name: ".user-name".to_string(),
            user_headline: ".user-headline".to_string(),
            post_time: "time".to_string(),
            comment: ".comment".to_string(),
            comment_timestamp: ".comment-timestamp".to_string(),
            comment_body: ".comment-body".to_string(),
        }
    }
}
