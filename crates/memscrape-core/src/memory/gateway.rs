//! MemoryGateway trait definition.
//!
//! Thin semantic interface over the external memory store: search by
//! query/topics, batch write, batch delete, liveness probe. The concrete
//! HTTP implementation lives in memscrape-infra; the connection held by the
//! implementation is acquired per call and released on every exit path.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use memscrape_types::error::MemoryError;
use memscrape_types::memory::{MemoryRecord, SearchRequest, StoredMemory};

/// Gateway to the external semantic memory store.
pub trait MemoryGateway: Send + Sync {
    /// Search for records semantically matching the request.
    ///
    /// Returns records ranked by the store's own relevance scoring, truncated
    /// to `max_results`. Zero matches is an empty vector, never an error.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl std::future::Future<Output = Result<Vec<StoredMemory>, MemoryError>> + Send;

    /// Persist all records as one batch.
    ///
    /// Partial failure is signaled as failure for the whole batch; no
    /// partial-commit contract is assumed.
    fn write(
        &self,
        records: &[MemoryRecord],
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;

    /// Delete records by store-assigned id.
    fn delete(
        &self,
        ids: &[String],
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;

    /// Liveness probe against the store.
    fn health(&self) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;
}
