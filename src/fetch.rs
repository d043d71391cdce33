//! Page retrieval
//!
//! The extractors never fetch anything themselves. `HuntClient` pairs an
//! `Extractor` with a `PageSource` and only fetches when the caller did not
//! supply the page content.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::extractors::{Extractor, PostExtraction, PostSummary};
use crate::urls::{generate_index_url, generate_post_url};

/// Something that can return raw markup for a URL
pub trait PageSource {
    fn fetch(&self, url: &str) -> ExtractResult<String>;
}

/// Blocking HTTP retrieval using ureq
#[derive(Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(config: &ExtractorConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
                .user_agent(config.user_agent.as_str())
                .http_status_as_error(false)
                .build(),
        );

        Self { agent }
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> ExtractResult<String> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ExtractError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for {}", status, url);
            return Err(ExtractError::fetch(url, status.as_u16()));
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| ExtractError::transport(url, e))
    }
}

/// Pages held in memory, keyed by URL. Unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, url: &str) -> ExtractResult<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ExtractError::fetch(url, 404))
    }
}

pub struct HuntClient<S> {
    source: S,
    extractor: Extractor,
    base_url: String,
}

impl HuntClient<HttpSource> {
    /// Client that fetches missing pages over HTTP
    pub fn http(config: &ExtractorConfig) -> ExtractResult<Self> {
        Self::new(HttpSource::new(config), config)
    }
}

impl<S: PageSource> HuntClient<S> {
    pub fn new(source: S, config: &ExtractorConfig) -> ExtractResult<Self> {
        Ok(Self {
            source,
            extractor: Extractor::new(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Posts on index page `page`, fetching the page unless `content` is given
    pub fn parse_index(&self, page: u32, content: Option<&str>) -> ExtractResult<Vec<PostSummary>> {
        let html = match content.filter(|c| !c.is_empty()) {
            Some(html) => html.to_string(),
            None => {
                let url = generate_index_url(&self.base_url, page)?;
                debug!("Fetching index page {}", url);
                self.source.fetch(&url)?
            }
        };

        self.extractor.extract_index(&html)
    }

    /// Post called `post_name`, fetching its page unless `content` is given
    pub fn parse_post(&self, post_name: &str, content: Option<&str>) -> ExtractResult<PostExtraction> {
        let html = match content.filter(|c| !c.is_empty()) {
            Some(html) => html.to_string(),
            None => {
                let url = generate_post_url(&self.base_url, post_name, true)?;
                debug!("Fetching post page {}", url);
                self.source.fetch(&url)?
            }
        };

        self.extractor.extract_post(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <ul>
            <li class="post">
                <span class="vote-count" data-id="1">10</span>
                <div class="url">
                    <a class="post-url" href="https://one.example">One</a>
                    <span class="post-tagline">First post</span>
                    <a class="view-discussion" data-url="/posts/one">3 comments</a>
                </div>
            </li>
        </ul>
    "#;

    const POST: &str = r#"
        <div class="post-show" data-id="1">
            <span class="vote-count">10</span>
            <h2 class="user-name">Ann <span>(@ann)</span></h2>
            <span class="user-headline">Maker</span>
            <a class="post-url" href="https://one.example">One</a>
            <span class="post-tagline">First post</span>
            <time datetime="2014-03-01"></time>
        </div>
    "#;

    fn client() -> HuntClient<StaticSource> {
        let source = StaticSource::new()
            .with_page("http://www.producthunt.co/?page=2", INDEX)
            .with_page("http://www.producthunt.co/posts/One-Two?modal=true", POST);
        HuntClient::new(source, &ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_index_fetches_when_no_content() {
        let posts = client().parse_index(2, None).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].comments_count, 3);
    }

    #[test]
    fn test_parse_index_prefers_given_content() {
        let posts = client().parse_index(7, Some(INDEX)).unwrap();
        assert_eq!(posts[0].title, "One");
    }

    #[test]
    fn test_parse_post_escapes_name() {
        let result = client().parse_post("One Two", None).unwrap();
        assert_eq!(result.post.username, "Ann");
        assert_eq!(result.post.posted_at, "2014-03-01");
        assert!(result.post.comments.is_empty());
    }

    #[test]
    fn test_missing_page_is_fetch_error() {
        let err = client().parse_index(9, None).unwrap_err();
        assert_eq!(err, ExtractError::fetch("http://www.producthunt.co/?page=9", 404));
        assert!(!err.is_markup_drift());
    }
}
