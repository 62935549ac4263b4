pub mod dataset;

pub use dataset::DatasetScrapeClient;
