// linkshelf/src/application/view.rs
//! The bookmark page: the displayed list, the pending URL input and the
//! actions that talk to the remote service.
//!
//! Remote failures never reach the caller as errors. The attempted change is
//! simply not applied and the failure is only traced; the returned outcome
//! values exist so a command line caller can pick an exit status.
use std::sync::Arc;

use crate::application::error::ApplicationResult;
use crate::application::services::session_service::SessionService;
use crate::domain::bookmark::{Bookmark, NewBookmark};
use crate::domain::repositories::query::ListQuery;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::session::User;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState<'a> {
    Loading,
    Empty,
    Listing(&'a [Bookmark]),
}

/// Result of a list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// List replaced with this many records
    Replaced(usize),
    /// Fetch failed, previous list kept
    Kept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// Blank input, nothing sent
    Ignored,
    Saved,
    /// Insert failed, input left as it was
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    Failed,
}

#[derive(Debug)]
pub struct BookmarkView {
    repository: Arc<dyn BookmarkRepository>,
    sessions: Arc<SessionService>,
    user: User,
    query: ListQuery,
    bookmarks: Vec<Bookmark>,
    input: String,
    loading: bool,
}

impl BookmarkView {
    pub fn new(
        repository: Arc<dyn BookmarkRepository>,
        sessions: Arc<SessionService>,
        user: User,
    ) -> Self {
        Self {
            repository,
            sessions,
            user,
            query: ListQuery::newest_first(),
            bookmarks: Vec::new(),
            input: String::new(),
            loading: true,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> ViewState<'_> {
        if self.loading {
            ViewState::Loading
        } else if self.bookmarks.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Listing(&self.bookmarks)
        }
    }

    /// Position (1-based) lookup into the displayed list
    pub fn bookmark_at(&self, position: usize) -> Option<&Bookmark> {
        position
            .checked_sub(1)
            .and_then(|index| self.bookmarks.get(index))
    }

    /// First load of the page
    pub fn mount(&mut self) -> Refresh {
        self.refresh()
    }

    /// Re-reads the whole collection. A successful read replaces the list
    /// wholesale; either way the view stops loading.
    #[instrument(skip(self), level = "debug", fields(query = %self.query))]
    pub fn refresh(&mut self) -> Refresh {
        let outcome = match self.repository.list(&self.query) {
            Ok(bookmarks) => {
                let count = bookmarks.len();
                self.bookmarks = bookmarks;
                Refresh::Replaced(count)
            }
            Err(e) => {
                warn!("Fetching bookmarks failed: {}", e);
                Refresh::Kept
            }
        };
        self.loading = false;
        outcome
    }

    pub fn set_input<S: Into<String>>(&mut self, input: S) {
        self.input = input.into();
    }

    /// Sends the pending input as a new bookmark for the current user.
    #[instrument(skip(self), level = "debug", fields(input = %self.input))]
    pub fn submit(&mut self) -> Submit {
        let new_bookmark = match NewBookmark::new(self.input.as_str(), &self.user.id) {
            Ok(new_bookmark) => new_bookmark,
            Err(_) => {
                debug!("Blank input, nothing to submit");
                return Submit::Ignored;
            }
        };

        match self.repository.insert(&new_bookmark) {
            Ok(()) => {
                self.input.clear();
                self.refresh();
                Submit::Saved
            }
            Err(e) => {
                warn!("Inserting bookmark failed: {}", e);
                Submit::Rejected
            }
        }
    }

    /// Deletes by id and re-reads the list whatever the delete returned.
    #[instrument(skip(self), level = "debug")]
    pub fn delete(&mut self, id: &str) -> Removal {
        let removal = match self.repository.delete(id) {
            Ok(()) => Removal::Removed,
            Err(e) => {
                warn!("Deleting bookmark {} failed: {}", id, e);
                Removal::Failed
            }
        };
        self.refresh();
        removal
    }

    /// Ends the session; the view itself stays as it is.
    #[instrument(skip(self), level = "debug")]
    pub fn sign_out(&self) -> ApplicationResult<()> {
        self.sessions.sign_out()
    }
}
