//! Resolution of free-form user input into a loadable target.

use std::path::{Path, PathBuf};

use tern_common::url::is_well_formed_http_url;

/// Search engine used when the input is neither a path nor a URL.
const SEARCH_URL: &str = "https://www.mojeek.com/search?q=";

/// Where a piece of user input leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A local file to read.
    File(PathBuf),
    /// A URL to fetch directly.
    Url(String),
    /// A search-engine query URL built from free text.
    Search(String),
}

/// Decide what a piece of user input refers to.
///
/// In order: an explicit `file://` prefix wins; then an existing local
/// path (probed on the raw input); then anything that, with an `https://`
/// scheme prepended if missing, looks like a URL with a domain
/// separator. Everything else becomes a search query.
#[must_use]
pub fn resolve_target(input: &str) -> Target {
    let trimmed = input.trim();

    if let Some(path) = trimmed.strip_prefix("file://") {
        return Target::File(PathBuf::from(path));
    }

    if Path::new(input).exists() {
        return Target::File(PathBuf::from(input));
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    if is_well_formed_http_url(&candidate) {
        return Target::Url(candidate);
    }

    Target::Search(format!("{SEARCH_URL}{}", urlencoding::encode(trimmed)))
}
