//! Cache-first orchestrator.
//!
//! Given a profile URL, consult the memory store for a semantically matching
//! cached record; on miss, run the scrape initiator and job poller, then
//! deduplicate and persist the fresh result. Recoverable conditions -- cache
//! miss, corrupt cached record, duplicate found -- are absorbed here and only
//! alter control flow; non-recoverable ones surface as [`RetrievalError`].

use serde_json::Value;
use tracing::{debug, info, warn};

use memscrape_types::config::RetrievalConfig;
use memscrape_types::error::{MemoryError, RetrievalError, ScrapeError};
use memscrape_types::memory::SearchRequest;
use memscrape_types::profile::{ProfileRecord, identity_indicator_of};

use crate::memory::MemoryGateway;
use crate::retrieval::identity::identity_key;
use crate::retrieval::records::build_memory_records;
use crate::scrape::initiator;
use crate::scrape::poller::JobPoller;
use crate::scrape::provider::ScrapeProvider;

/// Narrow cache lookup: a single best match above a strict threshold.
const LOOKUP_MAX_RESULTS: usize = 1;
const LOOKUP_MIN_RELEVANCE: f32 = 0.5;

/// Wider duplicate guard before persisting. The narrow lookup may miss
/// records a broader search would surface, and true duplicates must not be
/// written even when the narrow read misses them.
const DEDUP_MAX_RESULTS: usize = 5;
const DEDUP_MIN_RELEVANCE: f32 = 0.3;

/// Whether a fetch may be served from the memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Consult the cache first; scrape only on miss.
    CacheFirst,
    /// Always scrape fresh. The duplicate-guarded persist still runs.
    Bypass,
}

/// Result of a fetch, with an explicit cache indicator rather than a
/// field-presence heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub profile: ProfileRecord,
    pub cache_hit: bool,
}

/// The top-level retrieval coordinator.
///
/// Generic over the memory gateway and scrape provider ports so the concrete
/// HTTP implementations stay in memscrape-infra. No state is shared between
/// concurrent fetches; identical concurrent URLs are not coordinated
/// (no single-flight guarantee).
pub struct RetrievalService<G: MemoryGateway, P: ScrapeProvider> {
    gateway: G,
    provider: P,
    poller: JobPoller,
    config: RetrievalConfig,
}

impl<G: MemoryGateway, P: ScrapeProvider> RetrievalService<G, P> {
    pub fn new(gateway: G, provider: P, config: RetrievalConfig) -> Self {
        Self {
            gateway,
            provider,
            poller: JobPoller::default(),
            config,
        }
    }

    /// Replace the default poller (tests shrink its budget and interval).
    pub fn with_poller(mut self, poller: JobPoller) -> Self {
        self.poller = poller;
        self
    }

    /// Retrieve the profile behind `profile_url`.
    ///
    /// Cache-first unless `mode` bypasses the lookup. There is no freshness
    /// check on hits and no secondary data source on scrape failure.
    pub async fn fetch(
        &self,
        profile_url: &str,
        owner_id: Option<&str>,
        mode: CacheMode,
    ) -> Result<FetchOutcome, RetrievalError> {
        let key = identity_key(profile_url)
            .ok_or_else(|| RetrievalError::InvalidUrl(profile_url.to_string()))?;
        let owner = owner_id.unwrap_or(&self.config.default_owner);

        if mode == CacheMode::CacheFirst {
            if let Some(profile) = self.lookup_cached(&key, owner).await? {
                info!(identity_key = %key, "cache hit");
                return Ok(FetchOutcome {
                    profile,
                    cache_hit: true,
                });
            }
            debug!(identity_key = %key, "cache miss, scraping");
        }

        let profile = self.scrape_fresh(profile_url).await?;

        if self.already_stored(&key, owner).await? {
            debug!(identity_key = %key, "profile already stored, skipping write");
        } else {
            let records =
                build_memory_records(&profile, &key, &self.config.namespace, owner)?;
            let episodic = records.len() - 1;
            self.gateway.write(&records).await?;
            info!(identity_key = %key, episodic, "stored profile in memory store");
        }

        Ok(FetchOutcome {
            profile,
            cache_hit: false,
        })
    }

    /// Delete cached records whose identity indicator matches `identity_key`.
    ///
    /// Returns the number of records deleted.
    pub async fn evict(
        &self,
        identity_key: &str,
        owner_id: Option<&str>,
    ) -> Result<usize, RetrievalError> {
        let owner = owner_id.unwrap_or(&self.config.default_owner);
        let hits = self
            .gateway
            .search(&SearchRequest {
                query: format!("LinkedIn profile {identity_key}"),
                topics: vec![
                    "linkedin".to_string(),
                    "profile".to_string(),
                    identity_key.to_string(),
                ],
                owner_id: owner.to_string(),
                max_results: DEDUP_MAX_RESULTS,
                min_relevance: DEDUP_MIN_RELEVANCE,
            })
            .await?;

        let ids: Vec<String> = hits
            .iter()
            .filter(|hit| {
                serde_json::from_str::<Value>(&hit.text)
                    .ok()
                    .as_ref()
                    .and_then(identity_indicator_of)
                    .is_some_and(|indicator| indicator == identity_key)
            })
            .filter_map(|hit| hit.id.clone())
            .collect();

        if ids.is_empty() {
            debug!(identity_key, "no cached records to evict");
            return Ok(0);
        }

        self.gateway.delete(&ids).await?;
        info!(identity_key, deleted = ids.len(), "evicted cached records");
        Ok(ids.len())
    }

    /// Probe the memory store, for the liveness route.
    pub async fn health(&self) -> Result<(), MemoryError> {
        self.gateway.health().await
    }

    /// Narrow lookup. A hit whose text fails to deserialize is treated as a
    /// miss (corrupt cache falls through to scraping, never to the caller).
    async fn lookup_cached(
        &self,
        key: &str,
        owner: &str,
    ) -> Result<Option<ProfileRecord>, RetrievalError> {
        let hits = self
            .gateway
            .search(&SearchRequest {
                query: format!("LinkedIn profile {key}"),
                topics: vec![
                    "linkedin".to_string(),
                    "profile".to_string(),
                    key.to_string(),
                ],
                owner_id: owner.to_string(),
                max_results: LOOKUP_MAX_RESULTS,
                min_relevance: LOOKUP_MIN_RELEVANCE,
            })
            .await?;

        if let Some(hit) = hits.first() {
            match serde_json::from_str::<ProfileRecord>(&hit.text) {
                Ok(profile) => return Ok(Some(profile)),
                Err(err) => {
                    warn!(identity_key = %key, error = %err, "cached record corrupted, falling through to scrape");
                }
            }
        }
        Ok(None)
    }

    /// Start a scrape job and drive it to completion.
    async fn scrape_fresh(&self, profile_url: &str) -> Result<ProfileRecord, RetrievalError> {
        let wrap = |source: ScrapeError| RetrievalError::ScrapeFailed {
            url: profile_url.to_string(),
            source,
        };

        let handle = initiator::start_job(&self.provider, profile_url)
            .await
            .map_err(wrap)?;
        let payload = self.poller.drive(&self.provider, &handle).await.map_err(wrap)?;

        serde_json::from_value(payload).map_err(|e| {
            wrap(ScrapeError::JobFailed(format!(
                "result payload is not a profile object: {e}"
            )))
        })
    }

    /// Wider duplicate-write guard: does any candidate's stored identity
    /// indicator match the freshly derived key?
    async fn already_stored(&self, key: &str, owner: &str) -> Result<bool, RetrievalError> {
        let hits = self
            .gateway
            .search(&SearchRequest {
                query: format!("LinkedIn profile {key}"),
                topics: vec![
                    "linkedin".to_string(),
                    "profile".to_string(),
                    key.to_string(),
                ],
                owner_id: owner.to_string(),
                max_results: DEDUP_MAX_RESULTS,
                min_relevance: DEDUP_MIN_RELEVANCE,
            })
            .await?;

        for hit in &hits {
            // Episodic texts and corrupt records simply don't parse; skip them.
            let Ok(value) = serde_json::from_str::<Value>(&hit.text) else {
                continue;
            };
            if identity_indicator_of(&value) == Some(key) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
