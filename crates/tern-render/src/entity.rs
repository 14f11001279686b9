//! Entity reference decoding.
//!
//! Supports the small fixed table of named references the original
//! viewer needs, plus decimal (`&#65;`) and hexadecimal (`&#x41;`)
//! numeric references. Anything unrecognized passes through unchanged,
//! ampersand and semicolon included.

/// Fixed name-to-glyph table for named references (case-sensitive).
fn named_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "euro" => Some('\u{20AC}'),
        "copy" => Some('\u{00A9}'),
        "reg" => Some('\u{00AE}'),
        _ => None,
    }
}

/// Decode `&name;`, `&#NNN;` and `&#xHHH;` references in `text`.
///
/// Unknown names and numeric values that are not valid scalar code
/// points are passed through verbatim.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        match decode_one(tail) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Try to decode a single reference at the start of `tail` (which begins
/// with `&`). Returns the decoded character and the byte length consumed.
fn decode_one(tail: &str) -> Option<(char, usize)> {
    let semi = tail.find(';')?;
    let body = &tail[1..semi];
    let consumed = semi + 1;

    if let Some(hex) = body.strip_prefix("#x") {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        return char::from_u32(value).map(|c| (c, consumed));
    }

    if let Some(dec) = body.strip_prefix('#') {
        if dec.is_empty() || !dec.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u32 = dec.parse().ok()?;
        return char::from_u32(value).map(|c| (c, consumed));
    }

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    named_entity(body).map(|c| (c, consumed))
}

#[cfg(test)]
mod tests {
    use super::decode_entities;

    #[test]
    fn named_entities_decode() {
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("fish &amp; chips"), "fish & chips");
        assert_eq!(decode_entities("&copy; 2024"), "\u{00A9} 2024");
    }

    #[test]
    fn numeric_entities_decode() {
        assert_eq!(decode_entities("&#65;"), "A");
        assert_eq!(decode_entities("&#x41;"), "A");
        assert_eq!(decode_entities("&#x20ac;"), "\u{20AC}");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(decode_entities("&foo;"), "&foo;");
        assert_eq!(decode_entities("a &b c"), "a &b c");
        assert_eq!(decode_entities("100% &"), "100% &");
    }

    #[test]
    fn invalid_code_points_pass_through() {
        // Surrogate range is not a valid scalar value.
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#x110000;"), "&#x110000;");
    }

    #[test]
    fn adjacent_references_all_decode() {
        assert_eq!(decode_entities("&lt;&gt;&lt;"), "<><");
    }
}
