//! Permissive URL detection in free-form message text.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that looks like an http(s) URL: scheme followed by non-whitespace.
///
/// Deliberately permissive — trailing punctuation is kept, validation happens
/// later at the gateway. Matches what users actually paste into chat.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Scans text and returns every URL substring in first-occurrence order.
///
/// Duplicates are preserved; callers that need distinct values deduplicate
/// themselves. Pure function, no network or state. Empty input yields an
/// empty vector.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_empty_input() {
        assert!(extract_urls("").is_empty());
    }

    #[test]
    fn test_extract_no_urls() {
        assert!(extract_urls("just a plain sentence").is_empty());
    }

    #[test]
    fn test_extract_single_url() {
        assert_eq!(
            extract_urls("check https://foo.com/x please"),
            vec!["https://foo.com/x"]
        );
    }

    #[test]
    fn test_extract_http_and_https() {
        assert_eq!(
            extract_urls("http://a.com and https://b.com"),
            vec!["http://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_extract_preserves_order_and_duplicates() {
        let urls = extract_urls("https://a.com https://b.com https://a.com");
        assert_eq!(urls, vec!["https://a.com", "https://b.com", "https://a.com"]);
    }

    #[test]
    fn test_extract_stops_at_whitespace() {
        assert_eq!(
            extract_urls("go to https://foo.com/path?q=1\nnext line"),
            vec!["https://foo.com/path?q=1"]
        );
    }

    #[test]
    fn test_extract_ignores_bare_domains() {
        assert!(extract_urls("visit foo.com today").is_empty());
    }
}
