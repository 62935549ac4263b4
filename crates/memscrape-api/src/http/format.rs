//! Human-friendly profile rendering.
//!
//! Collapses the activity log into a one-line summary so the formatted output
//! stays short even for very active profiles. The detailed `activity` array
//! is removed and replaced with an `activity_summary` string; everything else
//! is pretty-printed as-is.

use serde_json::Value;

use memscrape_types::profile::ProfileRecord;

/// Render a profile as a pretty-printed JSON string with the activity log
/// summarized.
///
/// Interaction kinds are counted in first-seen order. An interaction string
/// may embed an actor clause after `" by "` (e.g. "Liked by Jane Doe"); only
/// the part before the clause is counted, so all likes group together.
pub fn format_profile_output(profile: &ProfileRecord) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(profile)?;

    let Some(obj) = value.as_object_mut() else {
        return serde_json::to_string_pretty(&value);
    };

    let activities = match obj.remove("activity") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(other) => {
            // Empty or unexpected shape: keep it, no summary.
            obj.insert("activity".to_string(), other);
            return serde_json::to_string_pretty(&value);
        }
        None => return serde_json::to_string_pretty(&value),
    };

    // First-seen order, so the summary reads in the same order as the log.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for activity in &activities {
        let interaction = activity
            .get("interaction")
            .and_then(Value::as_str)
            .unwrap_or("Unknown interaction");
        let kind = interaction.split(" by ").next().unwrap_or(interaction);

        match counts.iter_mut().find(|(k, _)| k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind.to_string(), 1)),
        }
    }

    let stats = counts
        .iter()
        .map(|(kind, n)| format!("{n} {}", kind.to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ");

    obj.insert(
        "activity_summary".to_string(),
        Value::String(format!(
            "User has {} recent activities: {stats}.",
            activities.len()
        )),
    );

    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_from(value: Value) -> ProfileRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_summary_replaces_activity_list() {
        let profile = profile_from(json!({
            "name": "Jane Doe",
            "activity": [
                {"interaction": "Liked by Jane Doe", "title": "Post one"},
                {"interaction": "Liked by Jane Doe", "title": "Post two"},
                {"interaction": "Shared by Jane Doe", "title": "Post three"},
            ],
        }));

        let output = format_profile_output(&profile).unwrap();
        let rendered: Value = serde_json::from_str(&output).unwrap();

        assert!(rendered.get("activity").is_none());
        assert_eq!(
            rendered["activity_summary"],
            "User has 3 recent activities: 2 liked, 1 shared."
        );
        assert_eq!(rendered["name"], "Jane Doe");
    }

    #[test]
    fn test_interaction_without_actor_clause() {
        let profile = profile_from(json!({
            "activity": [{"interaction": "Commented", "title": "t"}],
        }));

        let output = format_profile_output(&profile).unwrap();
        let rendered: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            rendered["activity_summary"],
            "User has 1 recent activities: 1 commented."
        );
    }

    #[test]
    fn test_missing_interaction_counts_as_unknown() {
        let profile = profile_from(json!({
            "activity": [{"title": "t"}],
        }));

        let output = format_profile_output(&profile).unwrap();
        let rendered: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            rendered["activity_summary"],
            "User has 1 recent activities: 1 unknown interaction."
        );
    }

    #[test]
    fn test_profile_without_activity_is_untouched() {
        let profile = profile_from(json!({"name": "Jane Doe", "city": "Berlin"}));

        let output = format_profile_output(&profile).unwrap();
        let rendered: Value = serde_json::from_str(&output).unwrap();
        assert!(rendered.get("activity_summary").is_none());
        assert_eq!(rendered["city"], "Berlin");
    }

    #[test]
    fn test_empty_activity_list_gets_no_summary() {
        let profile = profile_from(json!({"name": "Jane Doe", "activity": []}));

        let output = format_profile_output(&profile).unwrap();
        let rendered: Value = serde_json::from_str(&output).unwrap();
        assert!(rendered.get("activity_summary").is_none());
        assert_eq!(rendered["activity"], json!([]));
    }
}
