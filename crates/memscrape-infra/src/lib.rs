//! Infrastructure implementations for memscrape.
//!
//! Concrete HTTP adapters for the ports defined in memscrape-core: the
//! semantic memory store gateway and the dataset-API scrape provider, plus
//! service configuration assembly.

pub mod config;
pub mod memory;
pub mod scrape;

pub use config::ServiceConfig;
pub use memory::HttpMemoryGateway;
pub use scrape::DatasetScrapeClient;
