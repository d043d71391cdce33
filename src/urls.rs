//! Request URLs for index and post pages
//!
//! Post slugs follow the site's observed escaping rules. Posts sharing a
//! title get a numeric suffix on the site, which is not reproduced here.

use url::Url;

use crate::error::{ExtractError, ExtractResult};

/// Character substitutions applied when turning a post title into a slug
const SLUG_SUBSTITUTIONS: [(char, &str); 7] = [
    (' ', "-"),
    ('.', "-"),
    (';', "-"),
    ('+', "-"),
    ('#', ""),
    ('(', ""),
    (')', ""),
];

fn parse_base(base_url: &str) -> ExtractResult<Url> {
    Url::parse(base_url).map_err(|e| ExtractError::Config {
        message: format!("invalid base url '{}': {}", base_url, e),
    })
}

/// URL of one page of the endless-scroll posts index
pub fn generate_index_url(base_url: &str, page: u32) -> ExtractResult<String> {
    let mut url = parse_base(base_url)?;
    url.set_query(Some(&format!("page={}", page)));
    Ok(url.to_string())
}

/// Likely slug for a post's human-readable title
pub fn escape_url_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        match SLUG_SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => slug.push_str(to),
            None => slug.push(c),
        }
    }
    slug
}

/// URL of a post's page; `escape` turns a human title into a slug first
pub fn generate_post_url(base_url: &str, post_name: &str, escape: bool) -> ExtractResult<String> {
    let slug = if escape {
        escape_url_name(post_name)
    } else {
        post_name.to_string()
    };

    let mut url = parse_base(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ExtractError::Config {
            message: format!("base url '{}' cannot hold a path", base_url),
        })?
        .pop_if_empty()
        .push("posts")
        .push(&slug);
    url.set_query(Some("modal=true"));
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn test_index_url() {
        assert_eq!(
            generate_index_url(DEFAULT_BASE_URL, 0).unwrap(),
            "http://www.producthunt.co/?page=0"
        );
        assert_eq!(
            generate_index_url(DEFAULT_BASE_URL, 3).unwrap(),
            "http://www.producthunt.co/?page=3"
        );
    }

    #[test]
    fn test_escape_url_name() {
        assert_eq!(escape_url_name("Good UI"), "Good-UI");
        assert_eq!(escape_url_name("Node.js (beta)"), "Node-js-beta");
        assert_eq!(escape_url_name("C# for iOS; v2+"), "C-for-iOS--v2-");
        assert_eq!(escape_url_name("Woovent"), "Woovent");
    }

    #[test]
    fn test_post_url() {
        assert_eq!(
            generate_post_url(DEFAULT_BASE_URL, "Good UI", true).unwrap(),
            "http://www.producthunt.co/posts/Good-UI?modal=true"
        );
        assert_eq!(
            generate_post_url(DEFAULT_BASE_URL, "woovent", false).unwrap(),
            "http://www.producthunt.co/posts/woovent?modal=true"
        );
    }

    #[test]
    fn test_bad_base_url() {
        let err = generate_index_url("not a url", 0).unwrap_err();
        assert!(matches!(err, ExtractError::Config { .. }));
    }
}
