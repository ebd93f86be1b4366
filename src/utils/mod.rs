//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

    let re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"));

    re.replace_all(text.trim(), " ").to_string()
}

/// Extract the host component of an absolute URL
///
/// Returns `None` for relative links and URLs without a host.
pub fn extract_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;

    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(|host| match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
}

/// Last `/`-delimited segment of a link, ignoring any query or fragment
///
/// Returns `None` when the link ends with a slash.
pub fn last_path_segment(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or(href);

    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}
