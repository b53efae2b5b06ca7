pub mod test_backend;
pub mod testing;
