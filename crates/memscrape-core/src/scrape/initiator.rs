//! Scrape initiation: ordered trigger-payload fallback.
//!
//! The provider accepts different payload shapes depending on its own
//! configuration drift, so variants are tried in a fixed priority order and
//! the first explicit acceptance wins. This is a same-pass linear fallback
//! across payload shapes, not a retry across time: if every variant is
//! rejected or errors, no job was started and the submission fails.

use serde_json::{Value, json};
use tracing::{debug, info};

use memscrape_types::error::ScrapeError;
use memscrape_types::job::JobHandle;

use crate::scrape::provider::ScrapeProvider;

/// The trigger payload shapes to try, in priority order.
pub fn trigger_variants(profile_url: &str) -> Vec<Value> {
    vec![
        // Plain URL only
        json!([{ "url": profile_url }]),
        // With endpoint parameter
        json!([{ "url": profile_url, "endpoint": "linkedin_profile" }]),
        // With the short endpoint value
        json!([{ "url": profile_url, "endpoint": "linkedin" }]),
        // With an extra flag
        json!([{ "url": profile_url, "include_skills": true }]),
    ]
}

/// Submit trigger payload variants until the provider accepts one.
///
/// Returns the handle of the started job, or [`ScrapeError::ProviderRejected`]
/// when every variant was refused or errored.
pub async fn start_job<P: ScrapeProvider>(
    provider: &P,
    profile_url: &str,
) -> Result<JobHandle, ScrapeError> {
    for (index, payload) in trigger_variants(profile_url).iter().enumerate() {
        let variant = index + 1;
        match provider.submit(payload).await {
            Ok(Some(handle)) => {
                info!(variant, handle = %handle, "scrape job accepted");
                return Ok(handle);
            }
            Ok(None) => {
                debug!(variant, "trigger payload variant rejected");
            }
            Err(err) => {
                debug!(variant, error = %err, "trigger attempt errored");
            }
        }
    }

    Err(ScrapeError::ProviderRejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::scrape::provider::PollStatus;

    /// Provider that accepts the payload at `accept_at` (1-based) and records
    /// every submitted payload.
    struct ScriptedProvider {
        accept_at: Option<usize>,
        submitted: Mutex<Vec<Value>>,
    }

    impl ScriptedProvider {
        fn accepting_variant(accept_at: usize) -> Self {
            Self {
                accept_at: Some(accept_at),
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn rejecting_all() -> Self {
            Self {
                accept_at: None,
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn submissions(&self) -> Vec<Value> {
            self.submitted.lock().unwrap().clone()
        }
    }

    impl ScrapeProvider for ScriptedProvider {
        async fn submit(&self, payload: &Value) -> Result<Option<JobHandle>, ScrapeError> {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(payload.clone());
            let attempt = submitted.len();
            if self.accept_at == Some(attempt) {
                Ok(Some(JobHandle(format!("snap_{attempt}"))))
            } else {
                Ok(None)
            }
        }

        async fn poll(&self, _handle: &JobHandle) -> Result<PollStatus, ScrapeError> {
            unreachable!("initiator tests never poll")
        }
    }

    #[test]
    fn test_variant_shapes_in_priority_order() {
        let variants = trigger_variants("https://example.com/in/jane-doe");
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[0][0]["url"], "https://example.com/in/jane-doe");
        assert!(variants[0][0].get("endpoint").is_none());
        assert_eq!(variants[1][0]["endpoint"], "linkedin_profile");
        assert_eq!(variants[2][0]["endpoint"], "linkedin");
        assert_eq!(variants[3][0]["include_skills"], true);
    }

    #[tokio::test]
    async fn test_first_acceptance_short_circuits() {
        let provider = ScriptedProvider::accepting_variant(1);
        let handle = start_job(&provider, "https://example.com/in/jane-doe")
            .await
            .unwrap();
        assert_eq!(handle, JobHandle("snap_1".to_string()));
        assert_eq!(provider.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_through_to_later_variant() {
        let provider = ScriptedProvider::accepting_variant(3);
        let handle = start_job(&provider, "https://example.com/in/jane-doe")
            .await
            .unwrap();
        assert_eq!(handle, JobHandle("snap_3".to_string()));

        let submitted = provider.submissions();
        assert_eq!(submitted.len(), 3);
        assert_eq!(submitted[2][0]["endpoint"], "linkedin");
    }

    #[tokio::test]
    async fn test_all_rejected_yields_provider_rejected() {
        let provider = ScriptedProvider::rejecting_all();
        let err = start_job(&provider, "https://example.com/in/jane-doe")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::ProviderRejected));
        assert_eq!(provider.submissions().len(), 4);
    }

    #[tokio::test]
    async fn test_transport_errors_continue_to_next_variant() {
        struct ErrThenAccept {
            calls: Mutex<usize>,
        }

        impl ScrapeProvider for ErrThenAccept {
            async fn submit(&self, _payload: &Value) -> Result<Option<JobHandle>, ScrapeError> {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                if *calls == 1 {
                    Err(ScrapeError::Transport("connection reset".to_string()))
                } else {
                    Ok(Some(JobHandle("snap_ok".to_string())))
                }
            }

            async fn poll(&self, _handle: &JobHandle) -> Result<PollStatus, ScrapeError> {
                unreachable!()
            }
        }

        let provider = ErrThenAccept {
            calls: Mutex::new(0),
        };
        let handle = start_job(&provider, "https://example.com/in/jane-doe")
            .await
            .unwrap();
        assert_eq!(handle, JobHandle("snap_ok".to_string()));
        assert_eq!(*provider.calls.lock().unwrap(), 2);
    }
}
