//! The cache-first retrieval algorithm.

pub mod identity;
pub mod orchestrator;
pub mod records;

pub use identity::identity_key;
pub use orchestrator::{CacheMode, FetchOutcome, RetrievalService};
