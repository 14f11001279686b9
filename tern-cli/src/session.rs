//! Interactive viewing session.
//!
//! Drives the prompt/load/view cycle: read a target, load and render it,
//! then page through the styled stream in the alternate screen with raw
//! keyboard input. Loading failures print a red status line and drop
//! back to the prompt.

use std::io::{self, Write as _};

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use owo_colors::OwoColorize;

use tern_browser::{LoadedPage, load};
use tern_common::warning::clear_warnings;
use tern_render::style::RESET;

use crate::pager::{clamp_page, paginate};

/// Key hints shown under every page.
const FOOTER: &str = "[Enter] to exit, [Arrow Keys] to scroll, [Tab] to show links in this site";

/// Rows reserved below the page for the footer and the cursor line.
const FOOTER_ALLOWANCE: u16 = 3;

/// How a page view ended.
enum ViewOutcome {
    /// Return to the prompt.
    Back,
    /// Quit the program.
    Exit,
}

/// Run the session loop. A target given on the command line is viewed
/// once and the program exits afterwards; otherwise the loop prompts
/// until the user quits.
pub fn run(target: Option<String>) -> Result<()> {
    let from_args = target.is_some();
    let mut pending = target;

    loop {
        let input = match pending.take() {
            Some(given) => given,
            None => prompt()?,
        };
        let input = input.trim().to_string();
        if input.is_empty() {
            if from_args {
                return Ok(());
            }
            continue;
        }

        clear_warnings();
        match load(&input) {
            Ok(page) => {
                let outcome = view(&page, &input)?;
                if from_args || matches!(outcome, ViewOutcome::Exit) {
                    return Ok(());
                }
            }
            Err(err) => {
                eprintln!("{}", format!("Unexpected error: {err}").red());
                if from_args {
                    return Ok(());
                }
            }
        }
    }
}

/// Read one line of input from the user.
fn prompt() -> Result<String> {
    print!("Search: ");
    io::stdout().flush()?;
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Show a loaded page in the alternate screen until the user leaves.
fn view(page: &LoadedPage, input: &str) -> Result<ViewOutcome> {
    let title = if page.result.title.is_empty() {
        input
    } else {
        &page.result.title
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        SetTitle(format!("tern: {title}"))
    )?;

    let outcome = page_loop(&mut stdout, page);

    execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    outcome
}

/// Key loop over the paginated stream. Runs with raw mode on.
fn page_loop(stdout: &mut io::Stdout, page: &LoadedPage) -> Result<ViewOutcome> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut show_links = false;
    let mut pages = repage(page, cols, rows, show_links);
    let mut current = 0;

    draw(stdout, &pages[current])?;

    loop {
        match read()? {
            Event::Key(KeyEvent {
                code, modifiers, ..
            }) => match code {
                KeyCode::Up => {
                    if current > 0 {
                        current -= 1;
                        draw(stdout, &pages[current])?;
                    }
                }
                KeyCode::Down => {
                    if current + 1 < pages.len() {
                        current += 1;
                        draw(stdout, &pages[current])?;
                    }
                }
                KeyCode::Tab => {
                    show_links = !show_links;
                    pages = repage(page, cols, rows, show_links);
                    current = 0;
                    draw(stdout, &pages[current])?;
                }
                KeyCode::Enter => return Ok(ViewOutcome::Back),
                KeyCode::Char('q') => return Ok(ViewOutcome::Exit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(ViewOutcome::Exit);
                }
                _ => {}
            },
            Event::Resize(new_cols, new_rows) => {
                cols = new_cols;
                rows = new_rows;
                pages = repage(page, cols, rows, show_links);
                current = clamp_page(current, pages.len());
                draw(stdout, &pages[current])?;
            }
            _ => {}
        }
    }
}

/// Paginate the active stream (page text or link report) for the current
/// terminal size.
fn repage(page: &LoadedPage, cols: u16, rows: u16, show_links: bool) -> Vec<Vec<String>> {
    let width = usize::from(cols);
    let height = usize::from(rows.saturating_sub(FOOTER_ALLOWANCE).max(1));
    let stream = if show_links {
        &page.result.attachments
    } else {
        &page.result.text_stream
    };
    paginate(stream, width, height)
}

/// Redraw the screen with one page and the footer.
fn draw(stdout: &mut io::Stdout, page_rows: &[String]) -> Result<()> {
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    for row in page_rows {
        write!(stdout, "{row}\r\n")?;
    }
    write!(stdout, "{RESET}{FOOTER}")?;
    stdout.flush()?;
    Ok(())
}
