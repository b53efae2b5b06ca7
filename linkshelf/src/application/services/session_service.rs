// linkshelf/src/application/services/session_service.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::repositories::session_store::SessionStore;
use crate::domain::services::auth::AuthService;
use crate::domain::session::Session;
use tracing::{debug, instrument, warn};

/// Glue between the remote auth endpoints and the locally stored session.
#[derive(Debug)]
pub struct SessionService {
    auth: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthService>, store: Arc<dyn SessionStore>) -> Self {
        Self { auth, store }
    }

    /// Stored session, refreshed once if it has expired.
    /// A session that cannot be refreshed is dropped.
    #[instrument(skip(self), level = "debug")]
    pub fn current(&self) -> ApplicationResult<Option<Session>> {
        let Some(session) = self.store.load()? else {
            debug!("No stored session");
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        debug!("Session for {} expired, refreshing", session.user.id);
        match self.auth.refresh_session(&session.refresh_token) {
            Ok(fresh) => {
                self.store.save(&fresh)?;
                Ok(Some(fresh))
            }
            Err(e) => {
                warn!("Session refresh failed, discarding stored session: {}", e);
                self.store.clear()?;
                Ok(None)
            }
        }
    }

    pub fn require(&self) -> ApplicationResult<Session> {
        self.current()?.ok_or(ApplicationError::NotSignedIn)
    }

    #[instrument(skip(self, password), level = "debug")]
    pub fn sign_in(&self, email: &str, password: &str) -> ApplicationResult<Session> {
        if email.trim().is_empty() {
            return Err(ApplicationError::Validation("email cannot be empty".to_string()));
        }
        if password.is_empty() {
            return Err(ApplicationError::Validation(
                "password cannot be empty".to_string(),
            ));
        }

        let session = self
            .auth
            .sign_in_with_password(email.trim(), password)
            .map_err(|e| ApplicationError::Domain(e).context("Sign in failed"))?;
        self.store.save(&session)?;
        debug!("Signed in as {}", session.user.id);
        Ok(session)
    }

    /// Ends the remote session and forgets the local one.
    /// The local session is removed even when the remote call fails.
    #[instrument(skip(self), level = "debug")]
    pub fn sign_out(&self) -> ApplicationResult<()> {
        if let Some(session) = self.store.load()? {
            if let Err(e) = self.auth.sign_out(&session.access_token) {
                debug!("Remote sign out failed: {}", e);
            }
        }
        self.store.clear()?;
        Ok(())
    }
}
