//! Scrape job types.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Opaque identifier for an in-flight scrape job.
///
/// Created when the provider accepts a trigger payload, consumed by the
/// poller once a terminal state is reached. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle(pub String);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Poller state machine over a scrape job.
///
/// `Pending` is entered when the handle is obtained; the provider reporting
/// an in-progress status moves the job to `Running` (same poll cadence).
/// `Succeeded`, `Failed`, and `TimedOut` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
    TimedOut,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Pending => write!(f, "pending"),
            JobState::Running => write!(f, "running"),
            JobState::Succeeded => write!(f, "succeeded"),
            JobState::Failed => write!(f, "failed"),
            JobState::TimedOut => write!(f, "timed_out"),
        }
    }
}
