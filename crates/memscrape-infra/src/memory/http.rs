//! HttpMemoryGateway -- concrete [`MemoryGateway`] over the memory store's
//! REST API.
//!
//! The store exposes long-term memory search, batch create, batch delete,
//! and a health probe, all scoped to a namespace. The gateway owns a pooled
//! reqwest client; a connection is acquired per call and returned on every
//! exit path, which is how the per-orchestration session scoping is realized.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use memscrape_core::memory::MemoryGateway;
use memscrape_types::error::MemoryError;
use memscrape_types::memory::{MemoryRecord, SearchRequest, StoredMemory};

/// HTTP gateway to the semantic memory store.
pub struct HttpMemoryGateway {
    client: reqwest::Client,
    base_url: String,
    namespace: String,
}

#[derive(Serialize)]
struct SearchBody<'a> {
    text: &'a str,
    topics: &'a [String],
    user_id: &'a str,
    namespace: &'a str,
    limit: usize,
    min_relevance: f32,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    memories: Vec<WireMemory>,
}

#[derive(Deserialize)]
struct WireMemory {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    relevance: Option<f32>,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    memories: &'a [MemoryRecord],
}

impl HttpMemoryGateway {
    pub fn new(base_url: String, namespace: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            namespace,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response into a [`MemoryError::Store`].
    async fn store_error(response: reqwest::Response) -> MemoryError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        MemoryError::Store { status, message }
    }
}

impl MemoryGateway for HttpMemoryGateway {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<StoredMemory>, MemoryError> {
        let body = SearchBody {
            text: &request.query,
            topics: &request.topics,
            user_id: &request.owner_id,
            namespace: &self.namespace,
            limit: request.max_results,
            min_relevance: request.min_relevance,
        };

        let response = self
            .client
            .post(self.url("/v1/long-term-memory/search"))
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| MemoryError::Decode(e.to_string()))?;

        debug!(query = %request.query, hits = parsed.memories.len(), "memory search");

        Ok(parsed
            .memories
            .into_iter()
            .map(|m| StoredMemory {
                id: m.id,
                text: m.text,
                relevance: m.relevance,
            })
            .collect())
    }

    async fn write(&self, records: &[MemoryRecord]) -> Result<(), MemoryError> {
        let response = self
            .client
            .post(self.url("/v1/long-term-memory"))
            .json(&CreateBody { memories: records })
            .send()
            .await
            .map_err(|e| MemoryError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }

        debug!(count = records.len(), "memory batch written");
        Ok(())
    }

    async fn delete(&self, ids: &[String]) -> Result<(), MemoryError> {
        let params: Vec<(&str, &str)> = ids.iter().map(|id| ("memory_ids", id.as_str())).collect();

        let response = self
            .client
            .delete(self.url("/v1/long-term-memory"))
            .query(&params)
            .send()
            .await
            .map_err(|e| MemoryError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }

        debug!(count = ids.len(), "memory batch deleted");
        Ok(())
    }

    async fn health(&self) -> Result<(), MemoryError> {
        let response = self
            .client
            .get(self.url("/v1/health"))
            .send()
            .await
            .map_err(|e| MemoryError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(())
    }
}
