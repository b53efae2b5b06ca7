// linkshelf/src/domain/services/auth.rs
use crate::domain::error::DomainResult;
use crate::domain::session::Session;

/// Session endpoints of the remote service
pub trait AuthService: std::fmt::Debug + Send + Sync {
    fn sign_in_with_password(&self, email: &str, password: &str) -> DomainResult<Session>;

    fn refresh_session(&self, refresh_token: &str) -> DomainResult<Session>;

    /// Terminate the remote session the token belongs to
    fn sign_out(&self, access_token: &str) -> DomainResult<()>;
}
