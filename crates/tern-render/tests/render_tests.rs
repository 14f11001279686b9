//! Integration tests for the interpreter: full markup in, styled text
//! stream and metadata out.

use tern_html::{Parser, tokenize};
use tern_render::{RenderResult, render};

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const LINK: &str = "\x1b[1;4m";
const RESET: &str = "\x1b[0m";

/// Helper to run the whole pipeline over a markup string.
fn compile(markup: &str) -> RenderResult {
    let tokens = tokenize(markup).expect("tokenization failed");
    let tree = Parser::new(tokens).run();
    render(&tree)
}

#[test]
fn test_plain_paragraph() {
    let result = compile("<p>hello</p>");
    assert_eq!(result.text_stream, "hello");
}

#[test]
fn test_block_spacing_never_doubles() {
    let result = compile("<p>a</p><p>b</p>");
    assert_eq!(result.text_stream, "a\n\nb");
}

#[test]
fn test_block_spacing_with_interleaved_whitespace() {
    let result = compile("<p>a</p>\n  <p>b</p>");
    assert_eq!(result.text_stream, "a\n\nb");
}

#[test]
fn test_stronger_separator_wins() {
    // div demands one newline, the preceding p demands two; the longer
    // one is used, never both.
    let result = compile("<p>a</p><div>b</div>");
    assert_eq!(result.text_stream, "a\n\nb");
}

#[test]
fn test_single_newline_between_divs() {
    let result = compile("<div>a</div><div>b</div>");
    assert_eq!(result.text_stream, "a\nb");
}

#[test]
fn test_no_separator_before_first_child() {
    let result = compile("<div><p>a</p></div>");
    assert_eq!(result.text_stream, "a");
}

#[test]
fn test_heading_is_bold() {
    let result = compile("<h1>Top</h1>");
    assert_eq!(result.text_stream, format!("{BOLD}Top{RESET}"));
}

#[test]
fn test_inline_styles() {
    let result = compile("<b>x</b><i>y</i>");
    assert_eq!(
        result.text_stream,
        format!("{BOLD}x{RESET}{ITALIC}y{RESET}")
    );
}

#[test]
fn test_quote_tag_wraps_in_curly_quotes() {
    let result = compile("<q>said</q>");
    assert_eq!(result.text_stream, "\u{201C}said\u{201D}");
}

#[test]
fn test_mark_uses_reverse_video_without_full_reset() {
    let result = compile("<mark>hit</mark>");
    assert_eq!(result.text_stream, "\x1b[7mhit\x1b[27m");
}

#[test]
fn test_br_emits_exactly_one_line_break() {
    let result = compile("a<br>b");
    assert_eq!(result.text_stream, "a\nb");
}

#[test]
fn test_list_items_get_dash_prefix() {
    // The final pending separator is dropped at the end of the parent.
    let result = compile("<li>one</li><li>two</li>");
    assert_eq!(result.text_stream, "- one\n- two");
}

#[test]
fn test_empty_list_item_has_no_newline_suffix() {
    let result = compile("<li></li>after");
    assert_eq!(result.text_stream, "- after");
}

#[test]
fn test_title_captured_and_excluded_from_stream() {
    let result = compile("<title>Home</title><p>Body</p>");
    assert_eq!(result.title, "Home");
    assert_eq!(result.text_stream, "Body");
}

#[test]
fn test_first_title_wins() {
    let result = compile("<title>First</title><title>Second</title>");
    assert_eq!(result.title, "First");
}

#[test]
fn test_link_styling_and_attachment_entry() {
    let result = compile("<a href=\"http://x\">go</a>");
    assert_eq!(result.text_stream, format!("{LINK}go{RESET}"));
    assert!(
        result
            .attachments
            .contains(&format!("{LINK}http://x{RESET}: go\n"))
    );
}

#[test]
fn test_attachments_preamble_is_always_present() {
    let result = compile("<p>no links here</p>");
    assert!(
        result
            .attachments
            .starts_with("Here are some links found in the site")
    );
}

#[test]
fn test_anchor_without_href_adds_no_attachment() {
    let result = compile("<a>nowhere</a>");
    assert!(result.attachments.ends_with("\n\n"));
}

#[test]
fn test_img_prefers_alt_attribute() {
    let result = compile("<img alt=\"a cat\">");
    assert_eq!(result.text_stream, "a cat");
}

#[test]
fn test_template_contributes_nothing() {
    let result = compile("<p>a</p><template><p>hidden</p></template><p>b</p>");
    assert_eq!(result.text_stream, "a\n\nb");
}

#[test]
fn test_unknown_tags_pass_through() {
    let result = compile("<widget>plain</widget>");
    assert_eq!(result.text_stream, "plain");
}

#[test]
fn test_script_is_never_rendered() {
    let result = compile("<script>alert(1)</script><p>ok</p>");
    assert_eq!(result.text_stream, "ok");
}

#[test]
fn test_entities_decode_in_text() {
    let result = compile("<p>&lt;b&gt; &amp; more</p>");
    assert_eq!(result.text_stream, "<b> & more");
}

#[test]
fn test_whitespace_collapses_inside_blocks() {
    let result = compile("<p>a\n   b\tc</p>");
    assert_eq!(result.text_stream, "a b c");
}

#[test]
fn test_html_and_body_wrappers_render_at_root() {
    let result = compile("<html><body><p>content</p></body></html>");
    assert_eq!(result.text_stream, "content");
}

#[test]
fn test_nested_html_contributes_nothing() {
    let result = compile("<div><html><p>bogus</p></html></div>");
    assert_eq!(result.text_stream, "");
}

#[test]
fn test_body_outside_html_contributes_nothing() {
    let result = compile("<div><body><p>bogus</p></body></div>");
    assert_eq!(result.text_stream, "");
}

#[test]
fn test_stray_closer_does_not_affect_output() {
    let result = compile("<p>hi</div>");
    assert_eq!(result.text_stream, "hi");
}

#[test]
fn test_rendering_is_deterministic() {
    let markup = "<h1>T</h1><p>a <b>b</b> c</p><ul><li>x</li></ul>";
    assert_eq!(compile(markup), compile(markup));
}

#[test]
fn test_unclosed_tags_still_render() {
    let result = compile("<div><p>a");
    assert_eq!(result.text_stream, "a");
}

#[test]
fn test_bold_inside_paragraph_flows_inline() {
    let result = compile("<p>say <b>it</b> loud</p>");
    assert_eq!(
        result.text_stream,
        format!("say {BOLD}it{RESET} loud")
    );
}
