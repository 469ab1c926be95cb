//! URL admission predicates
//!
//! Pure checks that decide whether a discovered URL enters the frontier:
//! blacklist prefix matching, origin containment, fragment rejection, and
//! dedup against the crawl's visited set.

use std::collections::HashSet;
use url::Url;

/// Checks if a URL matches any blacklist entry
///
/// Blacklist entries are plain URL prefixes, not patterns: a URL is
/// excluded when it starts with any entry.
///
/// # Examples
///
/// ```
/// use site_harvester::crawler::is_blacklisted;
///
/// let blacklist = vec!["https://site.com/admin".to_string()];
/// assert!(is_blacklisted("https://site.com/admin/users", &blacklist));
/// assert!(!is_blacklisted("https://site.com/blog", &blacklist));
/// ```
pub fn is_blacklisted(url: &str, blacklist: &[String]) -> bool {
    blacklist.iter().any(|prefix| url.starts_with(prefix))
}

/// Decides whether a discovered URL should be dispatched for processing
///
/// Rejects URLs that are already in the visited set, match a blacklist
/// prefix, or contain a fragment marker (`#`). Fragment-only variants of a
/// page are never crawled separately; this intentionally also discards
/// anchor-routed SPA paths.
///
/// Origin containment is the caller's job: cross-origin links are dropped
/// before this check so they never enter the frontier at all.
pub fn should_visit(url: &str, visited: &HashSet<String>, blacklist: &[String]) -> bool {
    if url.contains('#') {
        return false;
    }
    if visited.contains(url) {
        return false;
    }
    !is_blacklisted(url, blacklist)
}

/// Checks if a URL is contained within the given origin prefix
pub fn within_origin(url: &str, origin: &str) -> bool {
    url.starts_with(origin)
}

/// Derives the origin prefix (scheme://host[:port]) of a parsed URL
///
/// Discovered links must start with this prefix to stay in scope.
pub fn origin_of(url: &Url) -> String {
    let mut origin = format!("{}://", url.scheme());
    if let Some(host) = url.host_str() {
        origin.push_str(host);
    }
    if let Some(port) = url.port() {
        origin.push(':');
        origin.push_str(&port.to_string());
    }
    origin
}
