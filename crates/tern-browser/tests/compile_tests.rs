//! End-to-end tests for the pure compile path (markup in, render out).

use tern_browser::compile;

#[test]
fn full_page_renders_with_title_and_links() {
    let markup = "<html><head><title>Home</title></head>\
                  <body><h1>Welcome</h1><p>See <a href=\"https://example.com\">docs</a>.</p></body></html>";
    let compiled = compile(markup).expect("compile");

    assert_eq!(compiled.result.title, "Home");
    assert!(compiled.result.text_stream.contains("\x1b[1mWelcome\x1b[0m"));
    assert!(
        compiled
            .result
            .attachments
            .contains("\x1b[1;4mhttps://example.com\x1b[0m: docs")
    );
    assert!(compiled.issues.is_empty());
}

#[test]
fn structural_anomalies_surface_as_issues_not_errors() {
    let compiled = compile("<p>hi</div>").expect("compile");
    assert_eq!(compiled.issues.len(), 1);
    assert!(compiled.result.text_stream.contains("hi"));
}

#[test]
fn lexical_errors_fail_the_document() {
    assert!(compile("<a href=\"http://x>").is_err());
}

#[test]
fn token_stream_and_tree_are_exposed() {
    let compiled = compile("<p>one</p>").expect("compile");
    assert!(!compiled.tokens.is_empty());
    assert!(compiled.tree.len() > 1);
}

#[test]
fn empty_markup_compiles_to_nothing() {
    let compiled = compile("").expect("compile");
    assert!(compiled.tokens.is_empty());
    assert!(compiled.result.text_stream.is_empty());
    assert!(compiled.result.title.is_empty());
}
