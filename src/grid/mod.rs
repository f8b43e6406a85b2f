pub mod mapper;
pub mod snapshot;
