//! Job poller: drives one scrape job to a terminal state.
//!
//! State machine over pending -> running -> {succeeded, failed, timed_out}.
//! Polling is strictly sequential with a fixed delay between attempts -- no
//! backoff, no jitter -- and a hard budget of attempts after which the job
//! is abandoned as timed out. Pending and running share the same cadence.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use memscrape_types::error::ScrapeError;
use memscrape_types::job::{JobHandle, JobState};

use crate::scrape::provider::{PollStatus, ScrapeProvider};

/// Maximum number of polling attempts before the job is abandoned.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// Fixed delay between polling attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polls an in-flight scrape job until it reaches a terminal state.
#[derive(Debug, Clone)]
pub struct JobPoller {
    max_attempts: u32,
    poll_interval: Duration,
}

impl Default for JobPoller {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl JobPoller {
    /// Create a poller with a custom budget and interval (tests shrink both).
    pub fn new(max_attempts: u32, poll_interval: Duration) -> Self {
        Self {
            max_attempts,
            poll_interval,
        }
    }

    /// Drive the job to completion or failure, consuming the handle.
    ///
    /// Returns the result payload on success. The handle is never persisted;
    /// a process restart abandons the job.
    pub async fn drive<P: ScrapeProvider>(
        &self,
        provider: &P,
        handle: &JobHandle,
    ) -> Result<Value, ScrapeError> {
        let mut state = JobState::Pending;

        for attempt in 1..=self.max_attempts {
            match provider.poll(handle).await {
                Ok(PollStatus::Ready(payload)) => {
                    debug!(handle = %handle, attempt, from = %state, to = %JobState::Succeeded, "job completed");
                    return Ok(payload);
                }
                Ok(PollStatus::Running) => {
                    if state != JobState::Running {
                        debug!(handle = %handle, attempt, from = %state, to = %JobState::Running, "job in progress");
                        state = JobState::Running;
                    }
                    // Same cadence for pending and running; skip the final
                    // sleep because the budget is exhausted anyway.
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
                Err(err) => {
                    warn!(handle = %handle, attempt, from = %state, to = %JobState::Failed, error = %err, "job failed");
                    return Err(err);
                }
            }
        }

        warn!(handle = %handle, attempts = self.max_attempts, to = %JobState::TimedOut, "job polling budget exhausted");
        Err(ScrapeError::JobTimedOut {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;

    /// Provider whose poll results are scripted; submission is unused here.
    struct ScriptedPoll {
        script: Mutex<Vec<Result<PollStatus, ScrapeError>>>,
        polls: Mutex<u32>,
    }

    impl ScriptedPoll {
        fn new(script: Vec<Result<PollStatus, ScrapeError>>) -> Self {
            Self {
                script: Mutex::new(script),
                polls: Mutex::new(0),
            }
        }

        fn always_running() -> Self {
            Self::new(Vec::new())
        }

        fn poll_count(&self) -> u32 {
            *self.polls.lock().unwrap()
        }
    }

    impl ScrapeProvider for ScriptedPoll {
        async fn submit(&self, _payload: &Value) -> Result<Option<JobHandle>, ScrapeError> {
            unreachable!("poller tests never submit")
        }

        async fn poll(&self, _handle: &JobHandle) -> Result<PollStatus, ScrapeError> {
            *self.polls.lock().unwrap() += 1;
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Ok(PollStatus::Running)
            } else {
                script.remove(0)
            }
        }
    }

    fn fast_poller() -> JobPoller {
        JobPoller::new(DEFAULT_MAX_ATTEMPTS, Duration::ZERO)
    }

    fn handle() -> JobHandle {
        JobHandle("snap_test".to_string())
    }

    #[tokio::test]
    async fn test_immediate_completion() {
        let provider = ScriptedPoll::new(vec![Ok(PollStatus::Ready(json!({"name": "Jane"})))]);
        let payload = fast_poller().drive(&provider, &handle()).await.unwrap();
        assert_eq!(payload["name"], "Jane");
        assert_eq!(provider.poll_count(), 1);
    }

    #[tokio::test]
    async fn test_running_then_completion() {
        let provider = ScriptedPoll::new(vec![
            Ok(PollStatus::Running),
            Ok(PollStatus::Running),
            Ok(PollStatus::Ready(json!({"name": "Jane"}))),
        ]);
        let payload = fast_poller().drive(&provider, &handle()).await.unwrap();
        assert_eq!(payload["name"], "Jane");
        assert_eq!(provider.poll_count(), 3);
    }

    #[tokio::test]
    async fn test_always_running_times_out_after_budget() {
        let provider = ScriptedPoll::always_running();
        let err = fast_poller().drive(&provider, &handle()).await.unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::JobTimedOut {
                attempts: DEFAULT_MAX_ATTEMPTS
            }
        ));
        assert_eq!(provider.poll_count(), DEFAULT_MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_poll_error_is_terminal_failure() {
        let provider = ScriptedPoll::new(vec![
            Ok(PollStatus::Running),
            Err(ScrapeError::JobFailed("snapshot poll returned HTTP 500".to_string())),
        ]);
        let err = fast_poller().drive(&provider, &handle()).await.unwrap_err();
        assert!(matches!(err, ScrapeError::JobFailed(_)));
        assert_eq!(provider.poll_count(), 2);
    }

    #[tokio::test]
    async fn test_custom_budget_is_respected() {
        let provider = ScriptedPoll::always_running();
        let poller = JobPoller::new(3, Duration::ZERO);
        let err = poller.drive(&provider, &handle()).await.unwrap_err();
        assert!(matches!(err, ScrapeError::JobTimedOut { attempts: 3 }));
        assert_eq!(provider.poll_count(), 3);
    }
}
