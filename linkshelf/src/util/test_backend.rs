// linkshelf/src/util/test_backend.rs
//! In-process stand-ins for the remote service, recording every call made.
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::bookmark::{Bookmark, BookmarkBuilder, NewBookmark};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::query::{ListQuery, SortDirection};
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::repositories::session_store::SessionStore;
use crate::domain::services::auth::AuthService;
use crate::domain::session::{Session, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List(String),
    Insert(NewBookmark),
    Delete(String),
    SignIn(String),
    Refresh(String),
    SignOut(String),
}

#[derive(Debug, Default)]
struct BackendState {
    records: Vec<Bookmark>,
    calls: Vec<BackendCall>,
    fail_list: bool,
    fail_insert: bool,
    fail_delete: bool,
    fail_auth: bool,
    inserted: i64,
}

/// Bookmark table and auth endpoints kept in memory.
///
/// Inserted records get ids `bm-1`, `bm-2`, ... and creation times one second
/// apart, after every seeded record.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    state: Mutex<BackendState>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Bookmark>) -> Self {
        let backend = Self::new();
        backend.state().records = records;
        backend
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn remove_record(&self, id: &str) {
        self.state().records.retain(|b| b.id != id);
    }

    pub fn fail_list(&self, fail: bool) {
        self.state().fail_list = fail;
    }

    pub fn fail_insert(&self, fail: bool) {
        self.state().fail_insert = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state().fail_delete = fail;
    }

    pub fn fail_auth(&self, fail: bool) {
        self.state().fail_auth = fail;
    }
}

impl BookmarkRepository for RecordingBackend {
    fn list(&self, query: &ListQuery) -> DomainResult<Vec<Bookmark>> {
        let mut state = self.state();
        state.calls.push(BackendCall::List(query.to_string()));
        if state.fail_list {
            return Err(DomainError::RemoteRejected("list failed".to_string()));
        }

        let mut records = state.records.clone();
        records.sort_by_key(|b| b.created_at);
        if query.direction == SortDirection::Descending {
            records.reverse();
        }
        Ok(records)
    }

    fn insert(&self, bookmark: &NewBookmark) -> DomainResult<()> {
        let mut state = self.state();
        state.calls.push(BackendCall::Insert(bookmark.clone()));
        if state.fail_insert {
            return Err(DomainError::RemoteRejected("insert failed".to_string()));
        }

        state.inserted += 1;
        let latest = state
            .records
            .iter()
            .map(|b| b.created_at)
            .max()
            .unwrap_or_else(|| at(0));
        let record = BookmarkBuilder::default()
            .id(format!("bm-{}", state.inserted))
            .url(bookmark.url.clone())
            .created_at(latest + chrono::Duration::seconds(1))
            .build()?;
        state.records.push(record);
        Ok(())
    }

    fn delete(&self, id: &str) -> DomainResult<()> {
        let mut state = self.state();
        state.calls.push(BackendCall::Delete(id.to_string()));
        if state.fail_delete {
            return Err(DomainError::RemoteRejected("delete failed".to_string()));
        }
        state.records.retain(|b| b.id != id);
        Ok(())
    }
}

impl AuthService for RecordingBackend {
    fn sign_in_with_password(&self, email: &str, _password: &str) -> DomainResult<Session> {
        let mut state = self.state();
        state.calls.push(BackendCall::SignIn(email.to_string()));
        if state.fail_auth {
            return Err(DomainError::NotAuthenticated("invalid credentials".to_string()));
        }
        Ok(test_session("user-1"))
    }

    fn refresh_session(&self, refresh_token: &str) -> DomainResult<Session> {
        let mut state = self.state();
        state.calls.push(BackendCall::Refresh(refresh_token.to_string()));
        if state.fail_auth {
            return Err(DomainError::NotAuthenticated("refresh token revoked".to_string()));
        }
        let mut session = test_session("user-1");
        session.access_token = "access-refreshed".to_string();
        Ok(session)
    }

    fn sign_out(&self, access_token: &str) -> DomainResult<()> {
        let mut state = self.state();
        state.calls.push(BackendCall::SignOut(access_token.to_string()));
        if state.fail_auth {
            return Err(DomainError::RemoteRejected("logout failed".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> DomainResult<Option<Session>> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> DomainResult<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> DomainResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Fixed point in time plus `secs`
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0)
        .single()
        .unwrap_or_default()
}

pub fn bookmark(id: &str, url: &str, created_secs: i64) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        url: url.to_string(),
        title: None,
        description: None,
        tags: None,
        created_at: at(created_secs),
    }
}

/// Session valid for an hour, tokens derived from the user id
pub fn test_session(user_id: &str) -> Session {
    Session {
        access_token: format!("access-{}", user_id),
        refresh_token: format!("refresh-{}", user_id),
        expires_at: Some(Utc::now().timestamp() + 3600),
        user: User {
            id: user_id.to_string(),
            email: Some(format!("{}@example.com", user_id)),
        },
    }
}
