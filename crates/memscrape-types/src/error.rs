use thiserror::Error;

/// Errors from the scrape provider path (trigger + polling).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("every trigger payload variant was rejected by the provider")]
    ProviderRejected,

    #[error("scrape job failed: {0}")]
    JobFailed(String),

    #[error("scrape job still running after {attempts} polling attempts")]
    JobTimedOut { attempts: u32 },

    #[error("provider transport error: {0}")]
    Transport(String),
}

/// Errors from the external memory store.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory store unavailable: {0}")]
    Unavailable(String),

    #[error("memory store returned HTTP {status}: {message}")]
    Store { status: u16, message: String },

    #[error("failed to decode memory store response: {0}")]
    Decode(String),
}

/// Errors surfaced by the cache-first orchestrator.
///
/// Recoverable conditions (cache miss, corrupt cached record, duplicate
/// found) never appear here -- they are absorbed as control flow. Only
/// non-recoverable failures reach the caller.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to scrape profile {url}: {source}")]
    ScrapeFailed {
        url: String,
        #[source]
        source: ScrapeError,
    },

    #[error(transparent)]
    Store(#[from] MemoryError),

    #[error("profile url has no usable path segment: '{0}'")]
    InvalidUrl(String),

    #[error("failed to serialize profile for storage: {0}")]
    Serialize(String),
}
