//! Page loading pipeline for the tern viewer.
//!
//! Ties the stages together: resolve user input to a [`Target`], obtain
//! markup from disk or over HTTP, and run it through the rendering core
//! (tokenize, parse, interpret). The CLI consumes [`LoadedPage`] values
//! and never touches the stages directly.

pub mod target;

use std::fs;

use thiserror::Error;

use tern_common::net::{FetchError, fetch_html};
use tern_dom::DocTree;
use tern_html::{ParseIssue, Parser, ScanError, Token, tokenize};
use tern_render::{RenderResult, render};

pub use target::{Target, resolve_target};

/// Error loading a page from user input.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The local file could not be read.
    #[error("failed to read file: {0}")]
    File(#[from] std::io::Error),

    /// The page could not be fetched over HTTP(S).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The markup could not be tokenized.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Output of running markup through the rendering core.
#[derive(Debug)]
pub struct Compiled {
    /// The token stream the scanner produced.
    pub tokens: Vec<Token>,
    /// The document tree built from the tokens.
    pub tree: DocTree,
    /// Recovered structural anomalies, in document order.
    pub issues: Vec<ParseIssue>,
    /// The rendered text and its extracted metadata.
    pub result: RenderResult,
}

/// Run markup through the full rendering core.
///
/// Structural anomalies are recovered from and reported as issues;
/// only lexical errors fail the document.
///
/// # Errors
///
/// Returns a [`ScanError`] if the markup cannot be tokenized.
pub fn compile(markup: &str) -> Result<Compiled, ScanError> {
    let tokens = tokenize(markup)?;
    let (tree, issues) = Parser::new(tokens.clone()).run_with_issues();
    let result = render(&tree);
    Ok(Compiled {
        tokens,
        tree,
        issues,
        result,
    })
}

/// A fully loaded and rendered page.
#[derive(Debug)]
pub struct LoadedPage {
    /// Where the markup came from.
    pub source: Target,
    /// The raw markup as loaded.
    pub markup: String,
    /// The token stream the scanner produced.
    pub tokens: Vec<Token>,
    /// The document tree built from the tokens.
    pub tree: DocTree,
    /// Recovered structural anomalies, in document order.
    pub issues: Vec<ParseIssue>,
    /// The rendered text and its extracted metadata.
    pub result: RenderResult,
}

/// Resolve user input, obtain its markup, and render it.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read, the fetch fails,
/// or the markup cannot be tokenized.
pub fn load(input: &str) -> Result<LoadedPage, LoadError> {
    let source = resolve_target(input);
    let markup = match &source {
        Target::File(path) => fs::read_to_string(path)?,
        Target::Url(url) | Target::Search(url) => fetch_html(url)?,
    };
    let compiled = compile(&markup)?;
    Ok(LoadedPage {
        source,
        markup,
        tokens: compiled.tokens,
        tree: compiled.tree,
        issues: compiled.issues,
        result: compiled.result,
    })
}
