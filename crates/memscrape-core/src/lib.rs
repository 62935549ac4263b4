//! Cache-first retrieval logic for memscrape.
//!
//! This crate defines the "ports" (the [`memory::MemoryGateway`] and
//! [`scrape::ScrapeProvider`] traits) that the infrastructure layer
//! implements, plus the orchestration built on top of them: trigger-payload
//! fallback, job polling, and the cache-first retrieval algorithm. It
//! depends only on `memscrape-types` -- never on `memscrape-infra` or any
//! HTTP crate.

pub mod memory;
pub mod retrieval;
pub mod scrape;
