pub mod di;
pub mod error;
pub(crate) mod http;
pub mod rest;
pub mod session_store;
