// linkshelf/src/infrastructure/rest/mod.rs
//! Adapters for the hosted service: a PostgREST table for bookmarks and a
//! GoTrue style auth API.
pub mod auth_service;
pub mod bookmark_repository;

pub use auth_service::RestAuthService;
pub use bookmark_repository::RestBookmarkRepository;
