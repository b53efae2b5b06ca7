// src/cli/bookmark_commands.rs
use crate::application::view::{BookmarkView, Removal, Submit};
use crate::cli::display::{render_view, write_json};
use crate::cli::error::{CliError, CliResult};
use crate::domain::bookmark::parse_absolute_url;
use crate::infrastructure::di::ServiceContainer;
use std::io;
use termcolor::WriteColor;
use tracing::{debug, instrument};

#[instrument(skip(out, services))]
pub fn list<W: WriteColor>(out: &mut W, services: &ServiceContainer, is_json: bool) -> CliResult<()> {
    let mut view = services.bookmark_view()?;
    let refresh = view.mount();
    debug!("Mounted view: {:?}", refresh);

    if is_json {
        write_json(&mut io::stdout().lock(), view.bookmarks())?;
    } else {
        render_view(out, view.state())?;
    }
    Ok(())
}

/// Submits `url` through the view. A rejected insert ends with a non-zero
/// exit status but prints nothing.
#[instrument(skip(out, services))]
pub fn add<W: WriteColor>(out: &mut W, services: &ServiceContainer, url: &str) -> CliResult<()> {
    parse_absolute_url(url).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let mut view = services.bookmark_view()?;
    view.set_input(url);
    submit_and_render(out, &mut view)
}

fn submit_and_render<W: WriteColor>(
    out: &mut W,
    view: &mut BookmarkView,
) -> CliResult<()> {
    match view.submit() {
        Submit::Saved => {
            render_view(out, view.state())?;
            Ok(())
        }
        Submit::Ignored => Ok(()),
        Submit::Rejected => Err(CliError::Rejected(String::new())),
    }
}

#[instrument(skip(out, services))]
pub fn delete<W: WriteColor>(out: &mut W, services: &ServiceContainer, id: &str) -> CliResult<()> {
    let mut view = services.bookmark_view()?;
    let removal = view.delete(id);
    render_view(out, view.state())?;

    match removal {
        Removal::Removed => Ok(()),
        Removal::Failed => Err(CliError::Rejected(String::new())),
    }
}

#[instrument(skip(services))]
pub fn open(services: &ServiceContainer, id: &str) -> CliResult<()> {
    let mut view = services.bookmark_view()?;
    view.mount();

    let bookmark = view
        .bookmarks()
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| CliError::InvalidInput(format!("No bookmark with id {}", id)))?;

    debug!("Opening {}", bookmark.url);
    open::that(&bookmark.url)?;
    Ok(())
}
