//! ScrapeProvider trait definition.
//!
//! Abstraction over the external scraping service: submit a trigger payload
//! to start an asynchronous job, poll the job by handle. The concrete
//! dataset-API implementation lives in memscrape-infra.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use serde_json::Value;

use memscrape_types::error::ScrapeError;
use memscrape_types::job::JobHandle;

/// Outcome of a single poll of an in-flight job.
#[derive(Debug, Clone, PartialEq)]
pub enum PollStatus {
    /// The provider reported an in-progress status; keep polling.
    Running,
    /// The job completed; the payload is the scraped result.
    Ready(Value),
}

/// External asynchronous scrape provider.
pub trait ScrapeProvider: Send + Sync {
    /// Submit one trigger payload.
    ///
    /// `Ok(Some(handle))` means the provider explicitly accepted the payload
    /// and started a job. `Ok(None)` means this payload shape was rejected;
    /// the caller may try the next variant. `Err` is a transport-level
    /// failure for this attempt (also treated as "try the next variant" by
    /// the initiator).
    fn submit(
        &self,
        payload: &Value,
    ) -> impl std::future::Future<Output = Result<Option<JobHandle>, ScrapeError>> + Send;

    /// Poll a job once.
    ///
    /// Errors are terminal for the job: an unexpected HTTP status or an
    /// undecodable body means the job failed.
    fn poll(
        &self,
        handle: &JobHandle,
    ) -> impl std::future::Future<Output = Result<PollStatus, ScrapeError>> + Send;
}
