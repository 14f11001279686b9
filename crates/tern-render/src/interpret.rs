//! Tree walking and the per-tag transform table.
//!
//! The interpreter wraps the whole tree in an implicit root and recurses
//! depth-first, children left to right. Each child's local result is
//! merged into its parent's accumulator (title: first non-empty wins;
//! attachments: concatenated) before the child's own tag transform
//! shapes the text, so transforms always operate on already-assembled
//! child output.

use std::str::FromStr;

use strum_macros::EnumString;
use tern_dom::{DocTree, NodeId, NodeKind};

use crate::sanitize::sanitize;
use crate::style::{BOLD, ITALIC, LINK, RESET, REVERSE, REVERSE_OFF, STRIKE, UNDERLINE};

/// Fixed preamble seeding the hyperlink report.
const LINK_REPORT_PREAMBLE: &str =
    "Here are some links found in the site which you can copy and search:\n\n";

/// The output of rendering one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// The linear, style-annotated text stream.
    pub text_stream: String,
    /// The page title; empty if the document never set one.
    pub title: String,
    /// The hyperlink report: one `href: label` line per link, preceded
    /// by a fixed human-readable preamble.
    pub attachments: String,
}

/// Tag names with a dedicated transform. Parsed ASCII
/// case-insensitively; anything else falls through to the default
/// pass-through rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Tag {
    Title,
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Br,
    Hr,
    Div,
    Section,
    Article,
    Li,
    Img,
    B,
    Strong,
    I,
    Cite,
    U,
    Strike,
    Q,
    Mark,
    A,
    Span,
    Button,
    Template,
    Html,
    Body,
}

/// Render a document tree into a text stream plus metadata.
///
/// Pure and deterministic: rendering the same tree twice yields the same
/// result, and no I/O happens anywhere below this call.
#[must_use]
pub fn render(tree: &DocTree) -> RenderResult {
    let mut ancestors = Vec::new();
    let body = content(tree, tree.root(), &mut ancestors);
    RenderResult {
        text_stream: body.text_stream,
        title: body.title,
        attachments: format!("{LINK_REPORT_PREAMBLE}{}", body.attachments),
    }
}

/// Pick the separator inserted before a block: the longer of the pending
/// suffix from the previous sibling and the prefix this child demands.
/// Never both, and never anything before the first emitted child.
const fn negotiate(demanded: &'static str, pending: &'static str) -> &'static str {
    if demanded.len() > pending.len() {
        demanded
    } else {
        pending
    }
}

/// Render the children of `id`. `ancestors` holds the lowercased names
/// of the element chain from the root down to `id` itself (the document
/// root excluded); it is used to judge structural legality of `html` and
/// `body`.
fn content(tree: &DocTree, id: NodeId, ancestors: &mut Vec<String>) -> RenderResult {
    let mut out = String::new();
    let mut title = String::new();
    let mut attachments = String::new();

    // Separator negotiation state: the suffix demanded by the previously
    // emitted child, and whether anything was emitted yet.
    let mut pending: &'static str = "";
    let mut started = false;

    let children = tree.children(id);
    let last = children.len().saturating_sub(1);

    for (index, &child) in children.iter().enumerate() {
        let Some(node) = tree.get(child) else {
            continue;
        };

        let data = match &node.kind {
            NodeKind::Document => continue,
            NodeKind::Text(raw) => {
                let trim_start = !started || !pending.is_empty();
                let text = sanitize(raw, trim_start, index == last);
                if text.is_empty() {
                    continue;
                }
                out.push_str(pending);
                out.push_str(&text);
                pending = "";
                started = true;
                continue;
            }
            NodeKind::Element(data) => data,
        };

        ancestors.push(data.name.to_ascii_lowercase());
        let inner = content(tree, child, ancestors);
        let _ = ancestors.pop();

        // Merge the child's metadata before applying its transform.
        if title.is_empty() {
            title = inner.title;
        }
        attachments.push_str(&inner.attachments);
        let inner = inner.text_stream;

        let tag = Tag::from_str(&data.name).ok();
        let (chunk, demanded, suffix): (String, &'static str, &'static str) = match tag {
            Some(Tag::Title) => {
                if title.is_empty() {
                    title = inner;
                }
                continue;
            }
            Some(Tag::Template) => continue,
            // Structural legality: `html` renders only as the outermost
            // element, `body` only directly inside a legal `html`.
            // Fragment or duplicate roots contribute nothing visible.
            Some(Tag::Html) => {
                if ancestors.is_empty() {
                    (inner, "", "")
                } else {
                    continue;
                }
            }
            Some(Tag::Body) => {
                if ancestors.len() == 1 && ancestors[0] == "html" {
                    (inner, "", "")
                } else {
                    continue;
                }
            }
            Some(Tag::P) => (inner, "\n\n", "\n\n"),
            Some(Tag::H1 | Tag::H2 | Tag::H3 | Tag::H4 | Tag::H5 | Tag::H6) => {
                (format!("{BOLD}{inner}{RESET}"), "\n\n", "\n\n")
            }
            Some(Tag::Br | Tag::Hr) => ("\n".to_string(), "", ""),
            Some(Tag::Div | Tag::Section | Tag::Article) => (inner, "\n", "\n"),
            Some(Tag::Li) => {
                let suffix = if inner.is_empty() { "" } else { "\n" };
                (format!("- {inner}"), "\n", suffix)
            }
            Some(Tag::Img) => {
                let alt = data.attr("alt").map(str::to_string);
                (alt.unwrap_or(inner), "", "")
            }
            Some(Tag::B | Tag::Strong) => (format!("{BOLD}{inner}{RESET}"), "", ""),
            Some(Tag::I | Tag::Cite) => (format!("{ITALIC}{inner}{RESET}"), "", ""),
            Some(Tag::U) => (format!("{UNDERLINE}{inner}{RESET}"), "", ""),
            Some(Tag::Strike) => (format!("{STRIKE}{inner}{RESET}"), "", ""),
            Some(Tag::Q) => (format!("\u{201C}{inner}\u{201D}"), "", ""),
            Some(Tag::Mark) => (format!("{REVERSE}{inner}{REVERSE_OFF}"), "", ""),
            Some(Tag::A) => {
                if let Some(href) = data.attr("href") {
                    attachments.push_str(&format!("{LINK}{href}{RESET}: {inner}\n"));
                }
                (format!("{LINK}{inner}{RESET}"), "", "")
            }
            // Pass-through, no transform.
            Some(Tag::Span | Tag::Button) | None => (inner, "", ""),
        };

        // A child with nothing to show neither flushes the pending
        // separator nor demands one; this keeps blank lines from
        // doubling around empty elements.
        if chunk.is_empty() {
            continue;
        }
        if started {
            out.push_str(negotiate(demanded, pending));
        }
        out.push_str(&chunk);
        pending = suffix;
        started = true;
    }

    RenderResult {
        text_stream: out,
        title,
        attachments,
    }
}
