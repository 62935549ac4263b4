//! Profile types as returned by the scrape provider.
//!
//! The provider payload is mostly free-form: a handful of fields are modeled
//! explicitly (name, current company, activity log) and everything else is
//! retained in a flattened map so a cached record round-trips byte-for-byte
//! equivalent through serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An organization the profile is affiliated with (e.g. current employer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Provider-defined fields we don't model explicitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One interaction record within a profile's activity log.
///
/// Owned by exactly one [`ProfileRecord`]; the `interaction` string may embed
/// an actor clause after a `" by "` separator (e.g. "Liked by Jane Doe").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The canonical scraped profile entity.
///
/// The identity key (last non-empty path segment of the source URL) is
/// derived by the orchestrator rather than stored here, because the provider
/// payload does not reliably carry it. [`ProfileRecord::identity_indicator`]
/// exposes the provider's own id fields for duplicate detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_company: Option<Affiliation>,

    /// Ordered activity log, most recent first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<ActivityEvent>>,

    /// Provider-defined fields we don't model explicitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileRecord {
    /// The provider's own identity field, used by the duplicate-write guard.
    ///
    /// Checks `linkedin_id` first, then falls back to `id`.
    pub fn identity_indicator(&self) -> Option<&str> {
        self.extra
            .get("linkedin_id")
            .or_else(|| self.extra.get("id"))
            .and_then(Value::as_str)
    }
}

/// Read the identity indicator out of raw stored JSON.
///
/// Same lookup as [`ProfileRecord::identity_indicator`], but usable on
/// records that may not deserialize into a full profile.
pub fn identity_indicator_of(value: &Value) -> Option<&str> {
    value
        .get("linkedin_id")
        .or_else(|| value.get("id"))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_roundtrip_preserves_unknown_fields() {
        let raw = json!({
            "name": "Jane Doe",
            "current_company": {"name": "Acme", "company_id": "acme-co"},
            "city": "Berlin",
            "followers": 1234,
        });
        let profile: ProfileRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            profile.current_company.as_ref().and_then(|c| c.name.as_deref()),
            Some("Acme")
        );

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_identity_indicator_prefers_linkedin_id() {
        let profile: ProfileRecord = serde_json::from_value(json!({
            "linkedin_id": "jane-doe",
            "id": "something-else",
        }))
        .unwrap();
        assert_eq!(profile.identity_indicator(), Some("jane-doe"));
    }

    #[test]
    fn test_identity_indicator_falls_back_to_id() {
        let profile: ProfileRecord =
            serde_json::from_value(json!({"id": "jane-doe"})).unwrap();
        assert_eq!(profile.identity_indicator(), Some("jane-doe"));
    }

    #[test]
    fn test_identity_indicator_missing() {
        let profile = ProfileRecord::default();
        assert_eq!(profile.identity_indicator(), None);
    }

    #[test]
    fn test_identity_indicator_of_raw_value() {
        let value = json!({"id": "jane-doe", "name": "Jane"});
        assert_eq!(identity_indicator_of(&value), Some("jane-doe"));
        assert_eq!(identity_indicator_of(&json!("not an object")), None);
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(serde_json::from_value::<ProfileRecord>(json!(["a", "b"])).is_err());
        assert!(serde_json::from_str::<ProfileRecord>("not json at all").is_err());
    }
}
