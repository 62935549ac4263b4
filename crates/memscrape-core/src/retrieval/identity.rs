//! Identity key derivation.

/// Derive the identity key from a profile URL: the last non-empty path
/// segment, with trailing slashes stripped first.
///
/// The key is stable and unique per source profile and serves as the
/// deduplication key. Returns `None` when the URL has no usable segment.
pub fn identity_key(profile_url: &str) -> Option<String> {
    profile_url
        .trim_end_matches('/')
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_path_segment() {
        assert_eq!(
            identity_key("https://example.com/in/jane-doe").as_deref(),
            Some("jane-doe")
        );
    }

    #[test]
    fn test_trailing_slash_is_idempotent() {
        let with = identity_key("https://example.com/in/jane-doe/");
        let without = identity_key("https://example.com/in/jane-doe");
        assert_eq!(with, without);
        assert_eq!(with.as_deref(), Some("jane-doe"));

        // Multiple trailing slashes normalize the same way.
        assert_eq!(identity_key("https://example.com/in/jane-doe///"), with);
    }

    #[test]
    fn test_bare_host() {
        assert_eq!(
            identity_key("https://example.com").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_no_usable_segment() {
        assert_eq!(identity_key(""), None);
        assert_eq!(identity_key("////"), None);
    }
}
