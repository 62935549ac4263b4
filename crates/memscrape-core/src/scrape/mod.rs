//! Scrape provider port and the logic that drives it: payload-variant
//! fallback on submission, bounded polling to a terminal state.

pub mod initiator;
pub mod poller;
pub mod provider;

pub use poller::JobPoller;
pub use provider::{PollStatus, ScrapeProvider};
