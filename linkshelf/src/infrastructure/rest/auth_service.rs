// linkshelf/src/infrastructure/rest/auth_service.rs
use crate::config::Settings;
use crate::domain::error::DomainResult;
use crate::domain::services::auth::AuthService;
use crate::domain::session::Session;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::http::RestClient;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument};

const TOKEN_PATH: &str = "/auth/v1/token";
const LOGOUT_PATH: &str = "/auth/v1/logout";

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Debug)]
pub struct RestAuthService {
    client: RestClient,
}

impl RestAuthService {
    pub(crate) fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &Settings) -> DomainResult<Self> {
        let client = RestClient::new(&settings.api_url, &settings.api_key, settings.timeout_ms)?;
        Ok(Self::new(client))
    }

    fn token_request<B: Serialize>(&self, grant_type: &str, body: &B) -> DomainResult<Session> {
        let request = self
            .client
            .request(Method::POST, TOKEN_PATH)
            .query(&[("grant_type", grant_type)])
            .json(body);

        let session: Session = self
            .client
            .send(request)?
            .json()
            .map_err(InfrastructureError::from)?;
        Ok(session)
    }
}

impl AuthService for RestAuthService {
    #[instrument(skip(self, password), level = "debug")]
    fn sign_in_with_password(&self, email: &str, password: &str) -> DomainResult<Session> {
        let session = self.token_request("password", &PasswordGrant { email, password })?;
        debug!("Signed in user {}", session.user.id);
        Ok(session)
    }

    #[instrument(skip_all, level = "debug")]
    fn refresh_session(&self, refresh_token: &str) -> DomainResult<Session> {
        self.token_request("refresh_token", &RefreshGrant { refresh_token })
    }

    #[instrument(skip_all, level = "debug")]
    fn sign_out(&self, access_token: &str) -> DomainResult<()> {
        let request = self
            .client
            .request_with_token(Method::POST, LOGOUT_PATH, access_token);
        self.client.send(request)?;
        Ok(())
    }
}
