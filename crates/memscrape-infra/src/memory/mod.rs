pub mod http;

pub use http::HttpMemoryGateway;
