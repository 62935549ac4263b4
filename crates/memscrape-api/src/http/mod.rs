//! HTTP/REST API layer for memscrape.
//!
//! Axum-based REST API with CORS, request tracing, and the original wire
//! contract: scrape failures are reported inside a `success: false` payload
//! rather than as HTTP error statuses.

pub mod format;
pub mod handlers;
pub mod router;
