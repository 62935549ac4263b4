//! Application state wiring the retrieval service together.
//!
//! The retrieval service is generic over the memory gateway and scrape
//! provider traits; AppState pins it to the concrete HTTP implementations.

use std::sync::Arc;

use memscrape_core::retrieval::RetrievalService;
use memscrape_infra::{DatasetScrapeClient, HttpMemoryGateway, ServiceConfig};
use memscrape_types::config::RetrievalConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteRetrievalService = RetrievalService<HttpMemoryGateway, DatasetScrapeClient>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub retrieval: Arc<ConcreteRetrievalService>,
}

impl AppState {
    /// Wire the concrete clients and the retrieval service from validated
    /// configuration.
    pub fn init(config: ServiceConfig) -> Self {
        let gateway =
            HttpMemoryGateway::new(config.memory_server_url.clone(), config.namespace.clone());
        let provider = DatasetScrapeClient::new(config.scrape_api_token, config.dataset_id);

        let retrieval_config = RetrievalConfig {
            namespace: config.namespace,
            ..RetrievalConfig::default()
        };

        Self {
            retrieval: Arc::new(RetrievalService::new(gateway, provider, retrieval_config)),
        }
    }
}
