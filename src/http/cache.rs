//! HTTP cache control module
//!
//! `ETag` generation, conditional request matching and `Cache-Control` values
//! for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`
///
/// Accepts a single tag, a comma separated list, weak tags (`W/"..."`) and `*`.
/// Returns true when a 304 should be sent.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').any(|e| {
            let e = e.trim();
            e == "*" || e.strip_prefix("W/").unwrap_or(e) == etag
        })
    })
}

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with max-age in seconds
    Public(u32),
    /// Always revalidate
    NoCache,
}

impl CachePolicy {
    /// Policy for static assets; a zero max-age means revalidate every time
    pub const fn for_assets(max_age: u32) -> Self {
        if max_age == 0 {
            Self::NoCache
        } else {
            Self::Public(max_age)
        }
    }

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"body { color: red; }");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_consistency() {
        assert_eq!(generate_etag(b"same"), generate_etag(b"same"));
        assert_ne!(generate_etag(b"style a"), generate_etag(b"style b"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::for_assets(600).to_header_value(),
            "public, max-age=600"
        );
        assert_eq!(CachePolicy::for_assets(0), CachePolicy::NoCache);
        assert_eq!(CachePolicy::NoCache.to_header_value(), "no-cache");
    }
}
