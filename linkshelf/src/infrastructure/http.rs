use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use std::time::Duration;
use tracing::{debug, trace};

/// Blocking HTTP client for the hosted service.
///
/// Every request carries the `apikey` header and a bearer token: the user's
/// access token when signed in, the API key itself otherwise.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
    bearer: String,
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str, timeout_ms: u64) -> InfrastructureResult<Self> {
        url::Url::parse(base_url).map_err(|e| {
            InfrastructureError::Configuration(format!("invalid api_url '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bearer: api_key.to_string(),
        })
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = token.to_string();
        self
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_with_token(method, path, &self.bearer)
    }

    pub fn request_with_token(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        trace!("{} {}", method, url);
        self.client
            .request(method, url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(token)
    }

    /// Sends the request; any non-2xx status becomes an error carrying the body.
    pub fn send(&self, request: RequestBuilder) -> InfrastructureResult<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        debug!("Request failed with {}: {}", status, body);
        Err(InfrastructureError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
