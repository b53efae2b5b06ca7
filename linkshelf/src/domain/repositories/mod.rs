pub mod query;
pub mod repository;
pub mod session_store;
