//! Shared domain types for memscrape.
//!
//! Pure data: profile records as returned by the scrape provider, memory
//! records as stored in the external semantic store, job handles for
//! in-flight scrape jobs, and the error taxonomy. No IO lives here.

pub mod config;
pub mod error;
pub mod job;
pub mod memory;
pub mod profile;
