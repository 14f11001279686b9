//! Token types produced by the tokenizer and consumed by the parser.

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// The lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum TokenKind {
    /// One of the four structural characters `<`, `>`, `/`, `=`.
    Punctuation,
    /// A quoted attribute value. The value excludes the surrounding
    /// quotes; backslash-escaped quotes inside the string do not close it.
    QuotedString,
    /// A raw run of inter-tag text, captured verbatim between a `>` and
    /// the next `<`.
    FreeText,
    /// A tag name, attribute name, or unquoted attribute value.
    Identifier,
}

/// A single token with its source position.
///
/// Tokens are immutable once produced: the tokenizer builds them, the
/// parser consumes and discards them in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The lexical class.
    pub kind: TokenKind,
    /// The token text. For punctuation this is the single character.
    pub value: String,
    /// 1-based line of the character that completed the token.
    pub line: u32,
    /// 1-based column of the character that completed the token.
    pub col: u32,
}

impl Token {
    /// Create a token at the given position.
    #[must_use]
    pub const fn new(kind: TokenKind, value: String, line: u32, col: u32) -> Self {
        Self {
            kind,
            value,
            line,
            col,
        }
    }

    /// Returns true if this is a punctuation token with the given value.
    #[must_use]
    pub fn is_punctuation(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.value == value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.value)
    }
}
