//! Landmark lookup over a parsed document
//!
//! A landmark is a named CSS selector the extractors expect to match.
//! `Scope` wraps one element of the tree together with a label for the
//! record being built, so every lookup failure carries both. A scope can
//! be fenced by a landmark, in which case matches nested inside another
//! region of that landmark (a reply under a comment, say) are not its own.

use scraper::{ElementRef, Node, Selector};

use crate::config::LandmarkSelectors;
use crate::error::{ExtractError, ExtractResult, FormatError};

#[derive(Debug, Clone)]
pub struct Landmark {
    name: &'static str,
    selector: Selector,
}

impl Landmark {
    pub fn compile(name: &'static str, css: &str) -> ExtractResult<Self> {
        let selector = Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
            landmark: name.to_string(),
            selector: css.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { name, selector })
    }
}

/// All landmarks, compiled once per extractor
#[derive(Debug, Clone)]
pub struct Landmarks {
    pub post_card: Landmark,
    pub vote_count: Landmark,
    pub link_region: Landmark,
    pub post_url: Landmark,
    pub post_tagline: Landmark,
    pub discussion_link: Landmark,
    pub post_overview: Landmark,
    pub user_name: Landmark,
    pub user_headline: Landmark,
    pub post_time: Landmark,
    pub comment: Landmark,
    pub comment_timestamp: Landmark,
    pub comment_body: Landmark,
}

impl Landmarks {
    pub fn compile(selectors: &LandmarkSelectors) -> ExtractResult<Self> {
        Ok(Self {
            post_card: Landmark::compile("post_card", &selectors.post_card)?,
            vote_count: Landmark::compile("vote_count", &selectors.vote_count)?,
            link_region: Landmark::compile("link_region", &selectors.link_region)?,
            post_url: Landmark::compile("post_url", &selectors.post_url)?,
            post_tagline: Landmark::compile("post_tagline", &selectors.post_tagline)?,
            discussion_link: Landmark::compile("discussion_link", &selectors.discussion_link)?,
            post_overview: Landmark::compile("post_overview", &selectors.post_overview)?,
            user_name: Landmark::compile("user_name", &selectors.user_name)?,
            user_headline: Landmark::compile("user_headline", &selectors.user_headline)?,
            post_time: Landmark::compile("post_time", &selectors.post_time)?,
            comment: Landmark::compile("comment", &selectors.comment)?,
            comment_timestamp: Landmark::compile(
                "comment_timestamp",
                &selectors.comment_timestamp,
            )?,
            comment_body: Landmark::compile("comment_body", &selectors.comment_body)?,
        })
    }
}

/// An element of the tree plus the record it belongs to
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    element: ElementRef<'a>,
    record: String,
    fence: Option<Selector>,
}

impl<'a> Scope<'a> {
    pub fn new(element: ElementRef<'a>, record: impl Into<String>) -> Self {
        Self {
            element,
            record: record.into(),
            fence: None,
        }
    }

    /// Ignore matches that sit inside a `landmark` region below the scope element
    pub fn fenced(mut self, landmark: &Landmark) -> Self {
        self.fence = Some(landmark.selector.clone());
        self
    }

    pub fn record(&self) -> &str {
        &self.record
    }

    /// First descendant matching the landmark
    pub fn first(&self, landmark: &Landmark) -> ExtractResult<ElementRef<'a>> {
        self.element
            .select(&landmark.selector)
            .find(|element| self.owns(element))
            .ok_or_else(|| ExtractError::structure_mismatch(landmark.name, &self.record))
    }

    /// Every descendant matching the landmark, in document order
    pub fn all(&self, landmark: &Landmark) -> Vec<ElementRef<'a>> {
        self.element
            .select(&landmark.selector)
            .filter(|element| self.owns(element))
            .collect()
    }

    /// Narrow to the first match, keeping the record label and fence
    pub fn narrow(&self, landmark: &Landmark) -> ExtractResult<Scope<'a>> {
        Ok(Scope {
            element: self.first(landmark)?,
            record: self.record.clone(),
            fence: self.fence.clone(),
        })
    }

    fn owns(&self, element: &ElementRef<'a>) -> bool {
        let fence = match &self.fence {
            Some(fence) => fence,
            None => return true,
        };

        let root = self.element.id();
        !element
            .ancestors()
            .take_while(|node| node.id() != root)
            .filter_map(ElementRef::wrap)
            .any(|ancestor| fence.matches(&ancestor))
    }

    /// Visible text of the first match
    pub fn text(&self, landmark: &Landmark) -> ExtractResult<String> {
        self.first(landmark).map(visible_text)
    }

    /// Attribute of an element found through `landmark`
    pub fn attr(
        &self,
        element: ElementRef<'a>,
        landmark: &Landmark,
        attr: &str,
    ) -> ExtractResult<&'a str> {
        element.value().attr(attr).ok_or_else(|| {
            ExtractError::structure_mismatch(&format!("{}[{}]", landmark.name, attr), &self.record)
        })
    }

    /// Run a normalizer on raw landmark text, attaching context on failure
    pub fn normalize<T>(
        &self,
        landmark: &Landmark,
        raw: &str,
        normalizer: impl Fn(&str) -> Result<T, FormatError>,
    ) -> ExtractResult<T> {
        normalizer(raw).map_err(|e| ExtractError::format(landmark.name, &self.record, e))
    }
}

/// Concatenated text of an element and all its descendants
pub fn visible_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// A direct child of an element that carries content
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Text(&'a str),
    Element(ElementRef<'a>),
}

impl Child<'_> {
    pub fn text(&self) -> String {
        match self {
            Child::Text(text) => text.to_string(),
            Child::Element(element) => visible_text(*element),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Child::Text(text) => text.trim().is_empty(),
            Child::Element(_) => false,
        }
    }
}

/// Text and element children in order; comments and the like are skipped
pub fn children(element: ElementRef<'_>) -> Vec<Child<'_>> {
    element
        .children()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(Child::Text(&**text)),
            Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
            _ => None,
        })
        .collect()
}
