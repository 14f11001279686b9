//! tern — a minimal terminal web page viewer.
//!
//! Loads a page (URL, local file, or search query), renders it to an
//! ANSI-styled text stream, and pages through it interactively. The
//! `--dump-*` flags run the pipeline headlessly for debugging.

mod pager;
mod session;

use anyhow::Result;
use clap::Parser;

use tern_browser::load;
use tern_common::warning::warn_once;
use tern_html::print_tree;

/// tern — minimal terminal web page viewer
#[derive(Parser, Debug)]
#[command(name = "tern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL, local file path, or search text to open
    #[arg(value_name = "TARGET")]
    target: Option<String>,

    /// Print the token stream as JSON and exit
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed document tree and any parse issues, then exit
    #[arg(long)]
    dump_tree: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.dump_tokens || cli.dump_tree {
        let Some(target) = cli.target else {
            anyhow::bail!("--dump-tokens and --dump-tree require a target");
        };
        let page = load(&target)?;
        if cli.dump_tokens {
            println!("{}", serde_json::to_string_pretty(&page.tokens)?);
        }
        if cli.dump_tree {
            print_tree(&page.tree, page.tree.root(), 0);
            for issue in &page.issues {
                warn_once(
                    "HTML",
                    &format!("{} at line {}, col {}", issue.message, issue.line, issue.col),
                );
            }
        }
        return Ok(());
    }

    session::run(cli.target)
}
