use crate::application::error::ApplicationResult;
use crate::application::{BookmarkView, SessionService};
use crate::config::Settings;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::repositories::session_store::SessionStore;
use crate::domain::services::auth::AuthService;
use crate::domain::session::Session;
use crate::infrastructure::rest::{RestAuthService, RestBookmarkRepository};
use crate::infrastructure::session_store::FileSessionStore;
use std::sync::Arc;
use tracing::debug;

/// Production service container - single composition root.
///
/// The bookmark repository depends on who is signed in, so it is built per
/// session instead of up front.
pub struct ServiceContainer {
    pub settings: Settings,
    pub session_service: Arc<SessionService>,
}

impl ServiceContainer {
    pub fn new(settings: &Settings) -> ApplicationResult<Self> {
        let auth_service: Arc<dyn AuthService> = Arc::new(RestAuthService::from_settings(settings)?);
        let session_store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(settings.session_path()));
        debug!("Session file: {}", settings.session_path().display());

        Ok(Self::from_parts(settings.clone(), auth_service, session_store))
    }

    pub fn from_parts(
        settings: Settings,
        auth_service: Arc<dyn AuthService>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        let session_service = Arc::new(SessionService::new(auth_service, session_store));
        Self {
            settings,
            session_service,
        }
    }

    pub fn bookmark_repository(
        &self,
        session: &Session,
    ) -> ApplicationResult<Arc<dyn BookmarkRepository>> {
        let repository = RestBookmarkRepository::from_settings(&self.settings, &session.access_token)?;
        Ok(Arc::new(repository))
    }

    /// View for the signed-in user; fails with `NotSignedIn` otherwise
    pub fn bookmark_view(&self) -> ApplicationResult<BookmarkView> {
        let session = self.session_service.require()?;
        let repository = self.bookmark_repository(&session)?;
        Ok(BookmarkView::new(
            repository,
            self.session_service.clone(),
            session.user,
        ))
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("api_url", &self.settings.api_url)
            .field("session_service", &"Arc<SessionService>")
            .finish()
    }
}
