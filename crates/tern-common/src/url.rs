//! Lightweight URL well-formedness probing.
//!
//! The loader only needs to decide whether free-form input should be
//! fetched directly or handed to a search engine, so this is a cheap
//! shape check, not a full parser per the URL Standard.

/// Does this look like a fetchable `http(s)` URL?
///
/// Requires an `http://` or `https://` scheme and a host that is
/// non-empty, contains a domain separator (`.`), and has no whitespace
/// anywhere in the input. Anything else is better served by a search
/// query.
#[must_use]
pub fn is_well_formed_http_url(input: &str) -> bool {
    if input.contains(char::is_whitespace) {
        return false;
    }
    let Some(rest) = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
    else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}
