//! Whitespace normalization for text leaves.

use crate::entity::decode_entities;

/// Normalize a raw text leaf for display.
///
/// Carriage returns are removed, every other whitespace run (newlines and
/// tabs included) collapses to a single space, and leading/trailing
/// spaces are trimmed per the flags. The interpreter sets the flags at
/// block boundaries so no spurious space is introduced next to a block
/// separator. An all-whitespace input becomes empty regardless of the
/// flags. Entity references are decoded last.
#[must_use]
pub fn sanitize(text: &str, trim_start: bool, trim_end: bool) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c == '\r' {
            continue;
        }
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
                in_whitespace = true;
            }
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    if collapsed.trim().is_empty() {
        return String::new();
    }
    let trimmed = match (trim_start, trim_end) {
        (true, true) => collapsed.trim(),
        (true, false) => collapsed.trim_start(),
        (false, true) => collapsed.trim_end(),
        (false, false) => collapsed.as_str(),
    };

    decode_entities(trimmed)
}

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize("a \n\t  b", false, false), "a b");
    }

    #[test]
    fn removes_carriage_returns() {
        assert_eq!(sanitize("a\r\nb", false, false), "a b");
    }

    #[test]
    fn trims_per_flags() {
        assert_eq!(sanitize("  x  ", true, false), "x ");
        assert_eq!(sanitize("  x  ", false, true), " x");
        assert_eq!(sanitize("  x  ", true, true), "x");
        assert_eq!(sanitize("  x  ", false, false), " x ");
    }

    #[test]
    fn all_whitespace_becomes_empty() {
        assert_eq!(sanitize(" \n\t ", false, false), "");
    }

    #[test]
    fn decodes_entities_after_collapsing() {
        assert_eq!(sanitize("a &amp;\n b", true, true), "a & b");
    }

    #[test]
    fn idempotent_on_already_sanitized_text() {
        for input in ["hello world", "  a\n\nb  ", "x\ty"] {
            let once = sanitize(input, true, true);
            assert_eq!(sanitize(&once, true, true), once);
        }
    }
}
