pub mod order_repo;
pub mod status_source;
