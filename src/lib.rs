//! Product Hunt page parser
//!
//! Turns index pages, post pages and comment fragments into typed records:
//! - Index cards (votes, id, links, tagline, comment count)
//! - Post details with author identity and nested comments
//! - Comment author, headline, timestamp and body
//!
//! Retrieval (`fetch`) and URL construction (`urls`) are optional helpers
//! around the extractors, which only ever see markup.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod ffi;
pub mod urls;

pub use config::{CommentPolicy, ExtractorConfig, LandmarkSelectors};
pub use error::{ExtractError, ExtractResult, FormatError};
pub use extractors::normalize::{
    clean_display_name, extract_handle, normalize_comment_count, parse_noisy_int,
};
pub use extractors::{
    extract_comment, extract_index, extract_post, Comment, Extractor, PostDetail, PostExtraction,
    PostSummary,
};
pub use fetch::{HttpSource, HuntClient, PageSource, StaticSource};
pub use ffi::*;
pub use urls::{escape_url_name, generate_index_url, generate_post_url};
