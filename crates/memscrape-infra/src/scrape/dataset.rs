//! DatasetScrapeClient -- concrete [`ScrapeProvider`] for the dataset-style
//! scrape API.
//!
//! Jobs are started with a POST to the trigger endpoint (dataset id and
//! error inclusion as query parameters) and polled with a GET on the
//! snapshot endpoint. A 200 whose body carries a `status` marker and a 202
//! both mean the job is still running; a 200 body without the marker is the
//! result. Bodies that are not valid JSON get one fallback decode attempt on
//! the first line (the provider emits line-delimited records for some
//! datasets).
//!
//! The bearer credential is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in Debug output.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use memscrape_core::scrape::{PollStatus, ScrapeProvider};
use memscrape_types::error::ScrapeError;
use memscrape_types::job::JobHandle;

const DEFAULT_BASE_URL: &str = "https://api.brightdata.com";

/// Scrape provider client over the dataset trigger/snapshot API.
pub struct DatasetScrapeClient {
    client: reqwest::Client,
    api_token: SecretString,
    base_url: String,
    dataset_id: String,
}

#[derive(Deserialize)]
struct TriggerResponse {
    #[serde(default)]
    snapshot_id: Option<String>,
}

impl DatasetScrapeClient {
    pub fn new(api_token: SecretString, dataset_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset_id,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a 200 snapshot body.
///
/// An object containing a `status` key is an in-progress report regardless
/// of the status string; any other valid JSON is the finished payload. On a
/// parse failure the first line alone gets one more attempt.
pub(crate) fn decode_snapshot_body(body: &str) -> Result<PollStatus, ScrapeError> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            if value.as_object().is_some_and(|obj| obj.contains_key("status")) {
                Ok(PollStatus::Running)
            } else {
                Ok(PollStatus::Ready(value))
            }
        }
        Err(_) => {
            let first_line = body.lines().next().unwrap_or_default();
            match serde_json::from_str::<Value>(first_line) {
                Ok(value) => Ok(PollStatus::Ready(value)),
                Err(_) => Err(ScrapeError::JobFailed(
                    "snapshot body is not decodable".to_string(),
                )),
            }
        }
    }
}

impl ScrapeProvider for DatasetScrapeClient {
    async fn submit(&self, payload: &Value) -> Result<Option<JobHandle>, ScrapeError> {
        let response = self
            .client
            .post(self.url("/datasets/v3/trigger"))
            .query(&[
                ("dataset_id", self.dataset_id.as_str()),
                ("include_errors", "true"),
            ])
            .bearer_auth(self.api_token.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "trigger rejected");
            return Ok(None);
        }

        let parsed: TriggerResponse = response
            .json()
            .await
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        // A 2xx without a job id is treated as a rejection so the caller can
        // try the next payload variant.
        Ok(parsed.snapshot_id.map(JobHandle))
    }

    async fn poll(&self, handle: &JobHandle) -> Result<PollStatus, ScrapeError> {
        let response = self
            .client
            .get(self.url(&format!("/datasets/v3/snapshot/{handle}")))
            .bearer_auth(self.api_token.expose_secret())
            .send()
            .await
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::ACCEPTED {
            return Ok(PollStatus::Running);
        }
        if !status.is_success() {
            return Err(ScrapeError::JobFailed(format!(
                "snapshot poll returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Transport(e.to_string()))?;

        decode_snapshot_body(&body)
    }
}
