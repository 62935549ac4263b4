//! Memory record construction for a freshly scraped profile.
//!
//! One semantic record carries the full serialized profile; each of the
//! first [`ACTIVITY_CAP`] activity events becomes an episodic record with
//! its title truncated to [`TITLE_MAX_CHARS`] characters.

use memscrape_types::error::RetrievalError;
use memscrape_types::memory::{MemoryKind, MemoryRecord};
use memscrape_types::profile::ProfileRecord;

/// Episodic records are capped to the first N activity events.
pub const ACTIVITY_CAP: usize = 10;

/// Activity titles are truncated to this many characters when persisted.
pub const TITLE_MAX_CHARS: usize = 100;

/// Build the batch of records to persist for a scraped profile: one semantic
/// record plus up to [`ACTIVITY_CAP`] episodic ones.
pub fn build_memory_records(
    profile: &ProfileRecord,
    identity_key: &str,
    namespace: &str,
    owner_id: &str,
) -> Result<Vec<MemoryRecord>, RetrievalError> {
    let text = serde_json::to_string(profile)
        .map_err(|e| RetrievalError::Serialize(e.to_string()))?;

    let mut entities = vec![identity_key.to_string()];
    if let Some(name) = profile.name.as_deref().filter(|n| !n.is_empty()) {
        entities.push(name.to_string());
    }
    if let Some(company) = profile
        .current_company
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .filter(|n| !n.is_empty())
    {
        entities.push(company.to_string());
    }

    let mut records = vec![MemoryRecord {
        text,
        kind: MemoryKind::Semantic,
        topics: vec![
            "linkedin".to_string(),
            "profile".to_string(),
            identity_key.to_string(),
            "scraped_data".to_string(),
        ],
        entities: entities.clone(),
        namespace: namespace.to_string(),
        user_id: owner_id.to_string(),
    }];

    let episodic_entities: Vec<String> = entities
        .iter()
        .take(2) // identity key + display name only
        .cloned()
        .collect();

    if let Some(activity) = &profile.activity {
        for event in activity.iter().take(ACTIVITY_CAP) {
            let interaction = event.interaction.as_deref().unwrap_or("Unknown");
            let title = truncate_chars(event.title.as_deref().unwrap_or("No title"), TITLE_MAX_CHARS);
            records.push(MemoryRecord {
                text: format!("{identity_key} activity: {interaction} - {title}"),
                kind: MemoryKind::Episodic,
                topics: vec![
                    "linkedin".to_string(),
                    "activity".to_string(),
                    identity_key.to_string(),
                    "engagement".to_string(),
                ],
                entities: episodic_entities.clone(),
                namespace: namespace.to_string(),
                user_id: owner_id.to_string(),
            });
        }
    }

    Ok(records)
}

/// Truncate on character boundaries; byte slicing could split a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
