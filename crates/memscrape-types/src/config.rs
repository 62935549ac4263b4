//! Retrieval configuration passed into the orchestrator.
//!
//! The namespace and default owner used to be ambient constants baked into
//! call sites; they are explicit constructor inputs here.

use serde::{Deserialize, Serialize};

/// Configuration for the cache-first orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Memory store namespace all records are scoped to.
    pub namespace: String,
    /// Owner id used when a request does not supply one.
    pub default_owner: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            namespace: "linkedin_scraper".to_string(),
            default_owner: "api_user".to_string(),
        }
    }
}
