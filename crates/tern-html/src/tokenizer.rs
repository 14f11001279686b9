//! Scanner converting raw markup into a flat token sequence.
//!
//! Scanning is a single left-to-right character pass over four mutually
//! exclusive modes: comment, quoted string, free text, and default
//! (punctuation and identifier recognition). Before scanning, doctype
//! declarations and whole `<script>`/`<style>` elements are stripped;
//! embedded code is never interpreted, only discarded.

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// A fatal tokenization error.
///
/// Structural problems in the markup are recovered from leniently by the
/// parser, but a broken lexical layer leaves nothing meaningful to parse,
/// so these fail the whole document with the offending position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A quoted string was still open at end of input. The position is
    /// that of the opening quote.
    #[error("unterminated string starting at line {line}, column {col}")]
    UnterminatedString {
        /// 1-based line of the opening quote.
        line: u32,
        /// 1-based column of the opening quote.
        col: u32,
    },

    /// A character that fits no recognized lexical class appeared between
    /// tags' punctuation (currently only the backtick, which HTML forbids
    /// in unquoted attribute values without giving it any other role).
    #[error("illegal character {ch:?} at line {line}, column {col}")]
    IllegalCharacter {
        /// The offending character.
        ch: char,
        /// 1-based line.
        line: u32,
        /// 1-based column.
        col: u32,
    },
}

/// Scanner state: which of the four modes the character pass is in.
enum Mode {
    /// Punctuation and identifier recognition.
    Default,
    /// Inside `<!-- ... -->`; everything is discarded.
    Comment,
    /// Inside a quoted string; `quote` is the character that opened it.
    Quoted {
        quote: char,
        line: u32,
        col: u32,
        value: String,
    },
    /// After a `>`, collecting raw inter-tag text until the next `<`.
    FreeText { value: String },
}

/// Single-pass tokenizer for the forgiving markup grammar.
pub struct Tokenizer {
    /// The preprocessed input being scanned.
    input: Vec<char>,
    /// 1-based line of the character under the cursor.
    line: u32,
    /// 1-based column of the character under the cursor.
    col: u32,
    /// Collected tokens.
    tokens: Vec<Token>,
}

/// Tokenize a markup document.
///
/// Convenience wrapper over [`Tokenizer`].
///
/// # Errors
///
/// Returns a [`ScanError`] for an unterminated quoted string or an
/// illegal character; see the fixed failure policy on [`ScanError`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokenizer = Tokenizer::new(input);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

impl Tokenizer {
    /// Create a tokenizer for the given markup, applying the
    /// preprocessing passes (doctype and raw-element stripping).
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut text = strip_doctype(input);
        strip_raw_element(&mut text, "script");
        strip_raw_element(&mut text, "style");
        Self {
            input: text.chars().collect(),
            line: 1,
            col: 1,
            tokens: Vec::new(),
        }
    }

    /// Run the scan to completion.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] for an unterminated quoted string or an
    /// illegal character.
    pub fn run(&mut self) -> Result<(), ScanError> {
        let mut mode = Mode::Default;
        // Pending identifier characters in default mode. Flushed just
        // before the next boundary character, not by consuming one.
        let mut ident = String::new();
        let mut i = 0;

        while i < self.input.len() {
            let c = self.input[i];
            match mode {
                Mode::Comment => {
                    if self.lookahead_is(i, "-->") {
                        mode = Mode::Default;
                        i = self.advance_over(i, 3);
                    } else {
                        i = self.advance_over(i, 1);
                    }
                }

                Mode::Quoted {
                    quote,
                    ref mut value,
                    ..
                } => {
                    // A quote preceded by a backslash does not close the
                    // string; the backslash itself stays in the value.
                    if c == quote && self.input[i - 1] != '\\' {
                        let text = std::mem::take(value);
                        self.emit(TokenKind::QuotedString, text);
                        mode = Mode::Default;
                    } else {
                        value.push(c);
                    }
                    i = self.advance_over(i, 1);
                }

                Mode::FreeText { ref mut value } => {
                    if c == '<' {
                        let text = std::mem::take(value);
                        if !text.is_empty() {
                            self.emit(TokenKind::FreeText, text);
                        }
                        // Reprocess the `<` in default mode; it may open
                        // a tag or a comment.
                        mode = Mode::Default;
                    } else {
                        value.push(c);
                        i = self.advance_over(i, 1);
                    }
                }

                Mode::Default => match c {
                    '<' => {
                        if self.lookahead_is(i, "<!--") {
                            mode = Mode::Comment;
                            i = self.advance_over(i, 4);
                        } else {
                            self.emit(TokenKind::Punctuation, c.to_string());
                            i = self.advance_over(i, 1);
                        }
                    }
                    '>' => {
                        self.emit(TokenKind::Punctuation, c.to_string());
                        mode = Mode::FreeText {
                            value: String::new(),
                        };
                        i = self.advance_over(i, 1);
                    }
                    '/' | '=' => {
                        self.emit(TokenKind::Punctuation, c.to_string());
                        i = self.advance_over(i, 1);
                    }
                    '"' | '\'' => {
                        if !ident.is_empty() {
                            let text = std::mem::take(&mut ident);
                            self.emit(TokenKind::Identifier, text);
                        }
                        mode = Mode::Quoted {
                            quote: c,
                            line: self.line,
                            col: self.col,
                            value: String::new(),
                        };
                        i = self.advance_over(i, 1);
                    }
                    '`' => {
                        return Err(ScanError::IllegalCharacter {
                            ch: c,
                            line: self.line,
                            col: self.col,
                        });
                    }
                    c if c.is_whitespace() => {
                        i = self.advance_over(i, 1);
                    }
                    _ => {
                        ident.push(c);
                        // One-character lookahead: the identifier is
                        // complete just before a boundary is reached.
                        if self
                            .input
                            .get(i + 1)
                            .is_none_or(|&next| is_identifier_boundary(next))
                        {
                            let text = std::mem::take(&mut ident);
                            self.emit(TokenKind::Identifier, text);
                        }
                        i = self.advance_over(i, 1);
                    }
                },
            }
        }

        match mode {
            Mode::Quoted { line, col, .. } => {
                return Err(ScanError::UnterminatedString { line, col });
            }
            Mode::FreeText { value } if !value.is_empty() => {
                // Trailing text with no tag after it is still content.
                self.emit(TokenKind::FreeText, value);
            }
            _ => {}
        }
        // An identifier can still pend here when the input ends in a
        // whitespace character outside the flush set (`\r`, form feed).
        if !ident.is_empty() {
            self.emit(TokenKind::Identifier, ident);
        }
        Ok(())
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn emit(&mut self, kind: TokenKind, value: String) {
        self.tokens.push(Token::new(kind, value, self.line, self.col));
    }

    /// Does the input at `i` start with the given ASCII marker?
    fn lookahead_is(&self, i: usize, marker: &str) -> bool {
        marker
            .chars()
            .enumerate()
            .all(|(offset, m)| self.input.get(i + offset) == Some(&m))
    }

    /// Consume `count` characters starting at `i`, keeping the line and
    /// column counters in step. Returns the new cursor position.
    fn advance_over(&mut self, i: usize, count: usize) -> usize {
        for offset in 0..count {
            if self.input.get(i + offset) == Some(&'\n') {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        i + count
    }
}

/// Characters that end a pending identifier.
///
/// Quote characters deliberately do not flush: per the HTML living
/// standard, a valid unquoted attribute value is any non-empty string
/// that doesn't contain spaces, tabs, line feeds, form feeds, carriage
/// returns, `"`, `'`, `` ` ``, `=`, `<`, or `>`; the flush set here is
/// the subset that actually delimits tokens in practice.
const fn is_identifier_boundary(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\t' | '>' | '<' | '/' | '=')
}

/// Remove every `<!DOCTYPE ...>` declaration (ASCII case-insensitive).
///
/// A declaration with no closing `>` is left in place for the scanner.
fn strip_doctype(input: &str) -> String {
    let mut text = input.to_string();
    let mut from = 0;
    while let Some(start) = find_case_insensitive(&text, "<!doctype", from) {
        match text[start..].find('>') {
            Some(rel) => text.replace_range(start..=start + rel, ""),
            None => break,
        }
        from = start;
    }
    text
}

/// Remove whole `<script>`/`<style>` elements including their raw
/// content, without interpreting it.
///
/// Only removes an element when a matching case-insensitive closing tag
/// (optional whitespace before its `>`) exists; otherwise the text is
/// left for the scanner to deal with.
fn strip_raw_element(text: &mut String, name: &str) {
    let open_marker = format!("<{name}");
    let close_marker = format!("</{name}");
    let mut from = 0;

    while let Some(start) = find_case_insensitive(text, &open_marker, from) {
        let after_name = start + open_marker.len();
        // The name must actually end here: `<scriptx>` is not a script tag.
        let at_boundary = text[after_name..]
            .chars()
            .next()
            .is_none_or(|c| c.is_ascii_whitespace() || c == '>' || c == '/');
        if !at_boundary {
            from = after_name;
            continue;
        }

        let mut search = after_name;
        let close_end = loop {
            let Some(close) = find_case_insensitive(text, &close_marker, search) else {
                break None;
            };
            let mut end = close + close_marker.len();
            while text[end..].starts_with(|c: char| c.is_ascii_whitespace()) {
                end += 1;
            }
            if text[end..].starts_with('>') {
                break Some(end + 1);
            }
            search = close + 1;
        };

        match close_end {
            Some(end) => {
                text.replace_range(start..end, "");
                from = start;
            }
            // No proper closing tag: leave the element alone.
            None => from = after_name,
        }
    }
}

/// Find an ASCII needle in the haystack, ignoring ASCII case.
fn find_case_insensitive(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < from + n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::{strip_doctype, strip_raw_element};

    #[test]
    fn doctype_is_removed_case_insensitively() {
        assert_eq!(strip_doctype("<!DOCTYPE html><p>"), "<p>");
        assert_eq!(strip_doctype("<!doctype HTML ><p>"), "<p>");
    }

    #[test]
    fn unclosed_doctype_is_left_alone() {
        assert_eq!(strip_doctype("<!DOCTYPE html"), "<!DOCTYPE html");
    }

    #[test]
    fn script_content_is_dropped_whole() {
        let mut text = "a<script type=\"text/javascript\">if (1 < 2) {}</script>b".to_string();
        strip_raw_element(&mut text, "script");
        assert_eq!(text, "ab");
    }

    #[test]
    fn closing_tag_may_have_trailing_whitespace() {
        let mut text = "<style>p { color: red }</style  >x".to_string();
        strip_raw_element(&mut text, "style");
        assert_eq!(text, "x");
    }

    #[test]
    fn unclosed_script_is_left_for_the_scanner() {
        let mut text = "<script>var x = 1;".to_string();
        strip_raw_element(&mut text, "script");
        assert_eq!(text, "<script>var x = 1;");
    }

    #[test]
    fn lookalike_names_are_not_stripped() {
        let mut text = "<scripted>x</scripted>".to_string();
        strip_raw_element(&mut text, "script");
        assert_eq!(text, "<scripted>x</scripted>");
    }
}
