//! Memory store types.
//!
//! The external semantic store persists fragments of scraped profiles: one
//! semantic record holding the full serialized profile, plus up to ten
//! episodic records each summarizing a single activity event.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Kind of a stored memory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// A durable fact -- here, a whole profile.
    Semantic,
    /// A time-bound event -- here, one activity entry.
    Episodic,
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryKind::Semantic => write!(f, "semantic"),
            MemoryKind::Episodic => write!(f, "episodic"),
        }
    }
}

impl FromStr for MemoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "semantic" => Ok(MemoryKind::Semantic),
            "episodic" => Ok(MemoryKind::Episodic),
            other => Err(format!("invalid memory kind: '{other}'")),
        }
    }
}

/// A record to be persisted in the external memory store.
///
/// Field names match the store's wire format (`memory_type`, `user_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Serialized payload: the full profile JSON for semantic records, a
    /// one-line activity summary for episodic ones.
    pub text: String,
    #[serde(rename = "memory_type")]
    pub kind: MemoryKind,
    /// Semantic tags used for topic-filtered search.
    pub topics: Vec<String>,
    /// Related names (identity key, display name, affiliation).
    pub entities: Vec<String>,
    pub namespace: String,
    /// Owner of the record within the namespace.
    pub user_id: String,
}

/// A record returned from a memory store search, with the store's own
/// relevance ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMemory {
    /// Store-assigned record id; required for deletion.
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    /// Relevance score assigned by the store (higher is more relevant).
    #[serde(default)]
    pub relevance: Option<f32>,
}

/// Parameters for a semantic search against the memory store.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub topics: Vec<String>,
    pub owner_id: String,
    pub max_results: usize,
    pub min_relevance: f32,
}
