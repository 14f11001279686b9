//! ANSI-aware pagination of the rendered text stream.
//!
//! The stream splits on newlines; each line wraps into rows of exactly
//! the terminal width in visible characters. Escape sequences of the
//! form `\x1b[...m` occupy zero columns and stay attached to the row
//! they style, so a bold word broken across a wrap keeps its styling on
//! both rows' left edge intact (the reset travels with whichever row
//! carries it).

/// Count the visible columns of a line, skipping `\x1b[...m` sequences.
#[must_use]
pub fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip to the terminating `m` of the style sequence.
            for esc in chars.by_ref() {
                if esc == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Wrap one logical line into rows of at most `width` visible columns.
///
/// An empty line yields a single empty row so blank lines survive
/// pagination.
#[must_use]
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut cols = 0;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            row.push(c);
            for esc in chars.by_ref() {
                row.push(esc);
                if esc == 'm' {
                    break;
                }
            }
            continue;
        }
        if cols == width {
            rows.push(std::mem::take(&mut row));
            cols = 0;
        }
        row.push(c);
        cols += 1;
    }
    rows.push(row);
    rows
}

/// Split a rendered stream into pages of `height` rows, each row at most
/// `width` visible columns. The final page is padded with empty rows so
/// every page has the same shape. Always returns at least one page.
#[must_use]
pub fn paginate(stream: &str, width: usize, height: usize) -> Vec<Vec<String>> {
    let height = height.max(1);

    let mut rows = Vec::new();
    for line in stream.split('\n') {
        rows.extend(wrap_line(line, width));
    }

    let mut pages = Vec::new();
    for chunk in rows.chunks(height) {
        let mut page: Vec<String> = chunk.to_vec();
        page.resize(height, String::new());
        pages.push(page);
    }
    if pages.is_empty() {
        pages.push(vec![String::new(); height]);
    }
    pages
}

/// Clamp a page index to the available pages after re-pagination.
///
/// `paginate` always yields at least one page, so the last valid index
/// is `page_count - 1`.
#[must_use]
pub fn clamp_page(current: usize, page_count: usize) -> usize {
    current.min(page_count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, paginate, visible_width, wrap_line};

    #[test]
    fn escape_sequences_have_no_width() {
        assert_eq!(visible_width("plain"), 5);
        assert_eq!(visible_width("\x1b[1mbold\x1b[0m"), 4);
        assert_eq!(visible_width("\x1b[1;4m"), 0);
    }

    #[test]
    fn wrapping_respects_visible_columns_only() {
        let rows = wrap_line("\x1b[1mabcdef\x1b[0m", 3);
        assert_eq!(rows, vec!["\x1b[1mabc", "def\x1b[0m"]);
        assert!(rows.iter().all(|r| visible_width(r) <= 3));
    }

    #[test]
    fn short_line_is_one_row() {
        assert_eq!(wrap_line("hi", 80), vec!["hi"]);
    }

    #[test]
    fn empty_line_survives_as_empty_row() {
        assert_eq!(wrap_line("", 10), vec![""]);
    }

    #[test]
    fn exact_width_line_does_not_spill() {
        assert_eq!(wrap_line("abcd", 4), vec!["abcd"]);
    }

    #[test]
    fn pages_are_filled_and_padded() {
        let pages = paginate("a\nb\nc", 10, 2);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], vec!["a", "b"]);
        assert_eq!(pages[1], vec!["c", ""]);
    }

    #[test]
    fn blank_lines_count_as_rows() {
        let pages = paginate("a\n\nb", 10, 3);
        assert_eq!(pages, vec![vec!["a", "", "b"]]);
    }

    #[test]
    fn empty_stream_yields_one_blank_page() {
        let pages = paginate("", 10, 2);
        assert_eq!(pages, vec![vec!["", ""]]);
    }

    #[test]
    fn resize_to_fewer_pages_clamps_to_last() {
        // Six rows fill three pages at height 2; at height 6 only one
        // page remains and the index must fall back to it.
        let stream = "a\nb\nc\nd\ne\nf";
        let tall = paginate(stream, 10, 2);
        assert_eq!(tall.len(), 3);
        let current = 2;

        let resized = paginate(stream, 10, 6);
        assert_eq!(resized.len(), 1);
        assert_eq!(clamp_page(current, resized.len()), 0);
    }

    #[test]
    fn clamp_keeps_valid_indices() {
        assert_eq!(clamp_page(1, 3), 1);
        assert_eq!(clamp_page(5, 3), 2);
        assert_eq!(clamp_page(0, 0), 0);
    }

    #[test]
    fn long_line_spans_pages() {
        let pages = paginate("abcdefgh", 2, 2);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], vec!["ab", "cd"]);
        assert_eq!(pages[1], vec!["ef", "gh"]);
    }
}
