//! Forgiving markup tokenizer and parser for the tern viewer.
//!
//! # Scope
//!
//! This crate implements the first two stages of the rendering pipeline:
//!
//! - **Tokenizer** - a single-pass scanner turning raw markup into a flat
//!   sequence of punctuation, quoted string, free text, and identifier
//!   tokens, with comments, doctype declarations, and raw script/style
//!   content stripped up front.
//! - **Parser** - a tree builder consuming that token sequence into an
//!   arena document tree, using one mutable open-node stack and lenient
//!   tag matching (unmatched closers are ignored, orphaned children are
//!   absorbed into the nearest matching ancestor).
//!
//! This is deliberately not a conforming HTML parser: real-world pages
//! abuse the format heavily, and the grammar here is built around
//! explicit recovery policies rather than the full standard.

/// Tree construction from the token sequence.
pub mod parser;
/// Token types shared by the tokenizer and parser.
pub mod token;
/// Scanner converting raw markup into tokens.
pub mod tokenizer;

pub use parser::{ParseIssue, Parser, print_tree};
pub use token::{Token, TokenKind};
pub use tokenizer::{ScanError, Tokenizer, tokenize};
