// src/cli/page.rs
//! Interactive bookmark page: the list, a URL prompt and a few commands.

use crate::application::view::{BookmarkView, Submit};
use crate::cli::display::{render_view, INPUT_PROMPT};
use crate::cli::error::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use termcolor::WriteColor;
use tracing::{debug, instrument};

const HELP_TEXT: &str = r#"
       <url>:       add bookmark
       :d <n>:      delete bookmark number n
       :o <n>:      open bookmark number n in the browser
       :r:          reload the list
       :signout:    sign out and leave
       :q | Ctrl-D: quit
       :h:          help
   "#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// Anything that is not a command, sent as typed
    Submit(String),
    Delete(usize),
    Open(usize),
    Refresh,
    SignOut,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_page_input(line: &str) -> PageCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return PageCommand::Submit(line.to_string());
    };

    let tokens: Vec<&str> = command.split_whitespace().collect();
    match tokens.as_slice() {
        ["q"] | ["quit"] => PageCommand::Quit,
        ["r"] => PageCommand::Refresh,
        ["signout"] => PageCommand::SignOut,
        ["h"] | ["help"] => PageCommand::Help,
        ["d", n] => parse_position(n).map_or_else(invalid_number, PageCommand::Delete),
        ["o", n] => parse_position(n).map_or_else(invalid_number, PageCommand::Open),
        _ => PageCommand::Invalid(format!("Unknown command: {}", trimmed)),
    }
}

fn parse_position(token: &str) -> Option<usize> {
    token.parse::<usize>().ok().filter(|n| *n > 0)
}

fn invalid_number() -> PageCommand {
    PageCommand::Invalid("Invalid input, only positive numbers allowed".to_string())
}

/// What the page loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFlow {
    Continue,
    /// A submitted URL was stored
    Saved,
    Leave,
}

#[instrument(skip_all, level = "debug")]
pub fn run<W: WriteColor>(out: &mut W, services: &ServiceContainer) -> CliResult<()> {
    let mut view = services.bookmark_view()?;
    render_view(out, view.state())?;
    view.mount();
    render_view(out, view.state())?;

    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Other(format!("Failed to create readline editor: {}", e)))?;
    let prompt = format!("{} > ", INPUT_PROMPT);

    loop {
        // a rejected submit leaves its text in the input, offer it again
        let line = match editor.readline_with_initial(&prompt, (view.input(), "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("Leaving page");
                break;
            }
            Err(e) => return Err(CliError::Other(format!("Readline error: {}", e))),
        };

        let command = parse_page_input(&line);
        match handle_command(out, &mut view, command, |url| open::that(url))? {
            PageFlow::Saved => {
                let _ = editor.add_history_entry(line.as_str());
            }
            PageFlow::Continue => {}
            PageFlow::Leave => break,
        }
    }
    Ok(())
}

/// Applies one page command to the view. Problems with a single line
/// (bad index, browser not launching) are written to `out` and the page
/// stays open.
pub fn handle_command<W, F>(
    out: &mut W,
    view: &mut BookmarkView,
    command: PageCommand,
    open_url: F,
) -> CliResult<PageFlow>
where
    W: WriteColor,
    F: Fn(&str) -> io::Result<()>,
{
    match command {
        PageCommand::Submit(text) => {
            view.set_input(text);
            if view.submit() == Submit::Saved {
                render_view(out, view.state())?;
                return Ok(PageFlow::Saved);
            }
        }
        PageCommand::Delete(n) => match view.bookmark_at(n).map(|b| b.id.clone()) {
            Some(id) => {
                view.delete(&id);
                render_view(out, view.state())?;
            }
            None => writeln!(out, "Index {} out of range", n)?,
        },
        PageCommand::Open(n) => match view.bookmark_at(n) {
            Some(bookmark) => {
                if let Err(e) = open_url(&bookmark.url) {
                    writeln!(out, "Cannot open {}: {}", bookmark.url, e)?;
                }
            }
            None => writeln!(out, "Index {} out of range", n)?,
        },
        PageCommand::Refresh => {
            view.refresh();
            render_view(out, view.state())?;
        }
        PageCommand::SignOut => {
            view.sign_out()?;
            writeln!(out, "Signed out")?;
            return Ok(PageFlow::Leave);
        }
        PageCommand::Help => writeln!(out, "{}", HELP_TEXT)?,
        PageCommand::Quit => return Ok(PageFlow::Leave),
        PageCommand::Invalid(msg) => writeln!(out, "{}", msg)?,
    }
    Ok(PageFlow::Continue)
}
