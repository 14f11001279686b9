//! ANSI style escape constants.
//!
//! Kept as one static table so transforms never repeat inline literals.
//! The pager treats these sequences as zero-width when measuring lines.

/// Bold on.
pub const BOLD: &str = "\x1b[1m";
/// Italic on.
pub const ITALIC: &str = "\x1b[3m";
/// Underline on.
pub const UNDERLINE: &str = "\x1b[4m";
/// Strikethrough on.
pub const STRIKE: &str = "\x1b[9m";
/// Reverse video on.
pub const REVERSE: &str = "\x1b[7m";
/// Reverse video off (keeps other styles intact, unlike a full reset).
pub const REVERSE_OFF: &str = "\x1b[27m";
/// Hyperlink styling: underline and bold combined.
pub const LINK: &str = "\x1b[1;4m";
/// Reset all styles.
pub const RESET: &str = "\x1b[0m";
