// linkshelf/src/application/mod.rs
pub mod error;
pub mod services;
pub mod view;

pub use services::session_service::SessionService;
pub use view::BookmarkView;
