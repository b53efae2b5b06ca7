// linkshelf/src/domain/repositories/session_store.rs
use crate::domain::error::DomainResult;
use crate::domain::session::Session;

/// Local persistence of the signed-in session between runs
pub trait SessionStore: std::fmt::Debug + Send + Sync {
    fn load(&self) -> DomainResult<Option<Session>>;

    fn save(&self, session: &Session) -> DomainResult<()>;

    /// Removing a session that does not exist is not an error
    fn clear(&self) -> DomainResult<()>;
}
