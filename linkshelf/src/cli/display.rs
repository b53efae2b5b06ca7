// src/cli/display.rs

use crate::application::view::ViewState;
use crate::domain::bookmark::Bookmark;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub const HEADING: &str = "Bookmarks";
pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No bookmarks yet. Add your first one!";
pub const INPUT_PROMPT: &str = "Paste a URL...";

/// Human output goes to stderr so stdout stays usable for piping
pub fn stderr_stream(no_color: bool) -> StandardStream {
    let color_choice = if no_color || !io::stderr().is_terminal() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    StandardStream::stderr(color_choice)
}

/// Whole page: heading, then loading indicator, empty-state text or the list
pub fn render_view<W: WriteColor>(out: &mut W, state: ViewState<'_>) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{}", HEADING)?;
    out.reset()?;

    match state {
        ViewState::Loading => writeln!(out, "{}", LOADING_TEXT)?,
        ViewState::Empty => {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(out, "{}", EMPTY_TEXT)?;
            out.reset()?;
        }
        ViewState::Listing(bookmarks) => render_bookmarks(out, bookmarks)?,
    }
    Ok(())
}

/// Numbered rows in the order given
pub fn render_bookmarks<W: WriteColor>(out: &mut W, bookmarks: &[Bookmark]) -> io::Result<()> {
    let first_col_width = bookmarks.len().to_string().len();

    for (i, bm) in bookmarks.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:first_col_width$}. {}", i + 1, bm.display_title())?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
        writeln!(out, " [{}]", bm.id)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "{:first_col_width$}  {}", "", bm.url)?;

        if let Some(description) = bm.description_text() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
            writeln!(out, "{:first_col_width$}  {}", "", description)?;
        }

        let tags = bm.visible_tags();
        if !tags.is_empty() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
            writeln!(out, "{:first_col_width$}  {}", "", tags.join(" "))?;
        }

        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, bookmarks: &[Bookmark]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(bookmarks).map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}
