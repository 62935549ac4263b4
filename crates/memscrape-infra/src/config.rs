//! Service configuration.
//!
//! Assembled at process startup from environment-bound CLI flags. The scrape
//! provider credential is mandatory: startup fails fatally when it is absent
//! or blank, and the value is wrapped in [`SecretString`] so it never appears
//! in Debug output or logs.

use secrecy::SecretString;

/// Default memory store address for local development.
pub const DEFAULT_MEMORY_SERVER_URL: &str = "http://localhost:8000";

/// Default memory store namespace.
pub const DEFAULT_NAMESPACE: &str = "linkedin_scraper";

/// Everything the infrastructure layer needs to talk to the two external
/// services.
#[derive(Debug)]
pub struct ServiceConfig {
    pub memory_server_url: String,
    pub namespace: String,
    pub scrape_api_token: SecretString,
    pub dataset_id: String,
}

impl ServiceConfig {
    /// Validate and assemble the configuration.
    ///
    /// # Errors
    ///
    /// Fails when the scrape credential is missing or blank; the process
    /// must not start without it.
    pub fn new(
        memory_server_url: String,
        namespace: String,
        scrape_api_token: Option<String>,
        dataset_id: String,
    ) -> anyhow::Result<Self> {
        let token = scrape_api_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "SCRAPE_API_TOKEN must be set: the scrape provider requires a bearer credential"
                )
            })?;

        if dataset_id.trim().is_empty() {
            anyhow::bail!("SCRAPE_DATASET_ID must not be empty");
        }

        Ok(Self {
            memory_server_url,
            namespace,
            scrape_api_token: SecretString::from(token),
            dataset_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: Option<&str>) -> anyhow::Result<ServiceConfig> {
        ServiceConfig::new(
            DEFAULT_MEMORY_SERVER_URL.to_string(),
            DEFAULT_NAMESPACE.to_string(),
            token.map(str::to_string),
            "gd_l1viktl72bvl7bjuj0".to_string(),
        )
    }

    #[test]
    fn test_valid_config() {
        let config = config_with_token(Some("tok_abc")).unwrap();
        assert_eq!(config.memory_server_url, "http://localhost:8000");
        assert_eq!(config.namespace, "linkedin_scraper");
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = config_with_token(None).unwrap_err();
        assert!(err.to_string().contains("SCRAPE_API_TOKEN"));
    }

    #[test]
    fn test_blank_token_is_fatal() {
        assert!(config_with_token(Some("   ")).is_err());
    }

    #[test]
    fn test_empty_dataset_id_is_fatal() {
        let err = ServiceConfig::new(
            DEFAULT_MEMORY_SERVER_URL.to_string(),
            DEFAULT_NAMESPACE.to_string(),
            Some("tok_abc".to_string()),
            "".to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("SCRAPE_DATASET_ID"));
    }
}
