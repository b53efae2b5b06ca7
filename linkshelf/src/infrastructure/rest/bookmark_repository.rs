// linkshelf/src/infrastructure/rest/bookmark_repository.rs
use crate::config::Settings;
use crate::domain::bookmark::{Bookmark, NewBookmark};
use crate::domain::error::DomainResult;
use crate::domain::repositories::query::ListQuery;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::http::RestClient;
use reqwest::Method;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct RestBookmarkRepository {
    client: RestClient,
    table: String,
}

impl RestBookmarkRepository {
    pub(crate) fn new(client: RestClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    /// Repository acting on behalf of the user owning `access_token`
    pub fn from_settings(settings: &Settings, access_token: &str) -> DomainResult<Self> {
        let client = RestClient::new(&settings.api_url, &settings.api_key, settings.timeout_ms)?
            .with_bearer(access_token);
        Ok(Self::new(client, &settings.table))
    }

    fn table_path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }
}

impl BookmarkRepository for RestBookmarkRepository {
    #[instrument(skip(self), level = "debug")]
    fn list(&self, query: &ListQuery) -> DomainResult<Vec<Bookmark>> {
        let order = query.to_string();
        let request = self
            .client
            .request(Method::GET, &self.table_path())
            .query(&[("select", "*"), ("order", order.as_str())]);

        let bookmarks: Vec<Bookmark> = self
            .client
            .send(request)?
            .json()
            .map_err(InfrastructureError::from)?;
        debug!("Fetched {} bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    #[instrument(skip(self), level = "debug")]
    fn insert(&self, bookmark: &NewBookmark) -> DomainResult<()> {
        let request = self
            .client
            .request(Method::POST, &self.table_path())
            .header("Prefer", "return=minimal")
            .json(bookmark);

        self.client.send(request)?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, id: &str) -> DomainResult<()> {
        let request = self
            .client
            .request(Method::DELETE, &self.table_path())
            .query(&[("id", format!("eq.{}", id))]);

        self.client.send(request)?;
        Ok(())
    }
}
