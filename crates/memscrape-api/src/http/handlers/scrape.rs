//! Profile retrieval and cache eviction handlers.
//!
//! POST /scrape is the main entry point; GET /scrape/{username} is a
//! convenience wrapper that builds the canonical profile URL from a bare
//! username. Failures during scraping or storage come back as
//! `success: false` payloads with HTTP 200 -- callers distinguish outcomes by
//! the body, not the status code.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use memscrape_core::retrieval::CacheMode;
use memscrape_types::profile::ProfileRecord;

use crate::http::format::format_profile_output;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    pub user_id: Option<String>,
    #[serde(default)]
    pub bypass_cache: bool,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<ProfileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub cached: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeByUsernameQuery {
    pub user_id: Option<String>,
    #[serde(default)]
    pub bypass_cache: bool,
}

#[derive(Debug, Serialize)]
pub struct EvictResponse {
    pub success: bool,
    pub deleted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            profile_data: None,
            formatted_output: None,
            error: Some(error),
            cached: false,
        }
    }
}

/// POST /scrape - Retrieve a profile, cache-first.
pub async fn scrape_profile(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Json<ScrapeResponse> {
    Json(run_scrape(&state, &request).await)
}

/// GET /scrape/{username} - Retrieve a profile by bare username.
pub async fn scrape_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ScrapeByUsernameQuery>,
) -> Json<ScrapeResponse> {
    let request = ScrapeRequest {
        url: format!("https://www.linkedin.com/in/{username}/"),
        user_id: query.user_id,
        bypass_cache: query.bypass_cache,
    };
    Json(run_scrape(&state, &request).await)
}

/// DELETE /cache/{username} - Evict cached records for one profile.
pub async fn evict_cached(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<EvictResponse> {
    match state.retrieval.evict(&username, None).await {
        Ok(deleted) => {
            info!(username = %username, deleted, "cache eviction");
            Json(EvictResponse {
                success: true,
                deleted,
                error: None,
            })
        }
        Err(e) => {
            error!(username = %username, error = %e, "cache eviction failed");
            Json(EvictResponse {
                success: false,
                deleted: 0,
                error: Some(e.to_string()),
            })
        }
    }
}

async fn run_scrape(state: &AppState, request: &ScrapeRequest) -> ScrapeResponse {
    let request_id = uuid::Uuid::now_v7();
    let mode = if request.bypass_cache {
        CacheMode::Bypass
    } else {
        CacheMode::CacheFirst
    };

    info!(%request_id, url = %request.url, ?mode, "scrape request");

    let outcome = match state
        .retrieval
        .fetch(&request.url, request.user_id.as_deref(), mode)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(%request_id, url = %request.url, error = %e, "scrape request failed");
            return ScrapeResponse::failure(e.to_string());
        }
    };

    let formatted_output = match format_profile_output(&outcome.profile) {
        Ok(text) => Some(text),
        Err(e) => {
            error!(%request_id, error = %e, "profile formatting failed");
            return ScrapeResponse::failure(e.to_string());
        }
    };

    info!(%request_id, cached = outcome.cache_hit, "scrape request served");

    ScrapeResponse {
        success: true,
        profile_data: Some(outcome.profile),
        formatted_output,
        error: None,
        cached: outcome.cache_hit,
    }
}
