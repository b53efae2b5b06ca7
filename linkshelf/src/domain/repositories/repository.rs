// linkshelf/src/domain/repositories/repository.rs
use crate::domain::bookmark::{Bookmark, NewBookmark};
use crate::domain::error::DomainResult;
use crate::domain::repositories::query::ListQuery;

/// The remote bookmark collection.
///
/// Each call is one request against the service; there is no caching or retry
/// behind it. Uniqueness and ownership checks are the service's business.
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Read every visible bookmark in the order requested
    fn list(&self, query: &ListQuery) -> DomainResult<Vec<Bookmark>>;

    /// Create a bookmark; the service assigns id and timestamp
    fn insert(&self, bookmark: &NewBookmark) -> DomainResult<()>;

    /// Delete the bookmark with this id
    fn delete(&self, id: &str) -> DomainResult<()>;
}
