//! Client configuration with defaults matching the public English Wikipedia.
//!
//! [`ApiConfig`] controls the endpoint, request behaviour, category
//! filtering and article truncation. It is embedded in the application's
//! TOML config as the `[api]` table.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::WikiError;

/// Default Action API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default site root used for "read more" links.
pub const DEFAULT_SITE_ROOT: &str = "https://en.wikipedia.org/";

/// What to do with a search result whose category lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFailurePolicy {
    /// Fail the whole search with the lookup error.
    #[default]
    Propagate,
    /// Keep the result as if it had no categories (fail-open).
    Keep,
    /// Drop the result as if it had matched (fail-closed).
    Drop,
}

/// Configuration for the Wikipedia client and its post-processing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Action API endpoint all three query shapes are sent to.
    pub endpoint: String,
    /// Site root for `?curid=` links.
    pub site_root: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// User-Agent sent with every request. Wikimedia asks clients to
    /// identify themselves.
    pub user_agent: String,
    /// Case-insensitive substrings; a result with a category containing
    /// any of them is removed. Empty disables the category stage.
    pub excluded_category_terms: Vec<String>,
    /// Behaviour when a category lookup fails.
    pub category_failure_policy: CategoryFailurePolicy,
    /// Number of `</p>`-separated segments kept from an article.
    pub paragraph_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            site_root: DEFAULT_SITE_ROOT.to_owned(),
            timeout_seconds: 10,
            user_agent: format!("wikiseek/{}", env!("CARGO_PKG_VERSION")),
            excluded_category_terms: vec!["sex".to_owned()],
            category_failure_policy: CategoryFailurePolicy::Propagate,
            paragraph_limit: 4,
        }
    }
}

impl ApiConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoint` and `site_root` must parse as absolute URLs
    /// - `timeout_seconds` must be greater than 0
    /// - `paragraph_limit` must be greater than 0
    /// - `excluded_category_terms` must not contain blank entries
    pub fn validate(&self) -> Result<(), WikiError> {
        Url::parse(&self.endpoint)
            .map_err(|e| WikiError::Config(format!("invalid endpoint {:?}: {e}", self.endpoint)))?;
        Url::parse(&self.site_root).map_err(|e| {
            WikiError::Config(format!("invalid site_root {:?}: {e}", self.site_root))
        })?;
        if self.timeout_seconds == 0 {
            return Err(WikiError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.paragraph_limit == 0 {
            return Err(WikiError::Config(
                "paragraph_limit must be greater than 0".into(),
            ));
        }
        if self.excluded_category_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(WikiError::Config(
                "excluded_category_terms must not contain blank terms".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_public_wikipedia() {
        let config = ApiConfig::default();
        assert_eq!(config.endpoint, "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.site_root, "https://en.wikipedia.org/");
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.excluded_category_terms, vec!["sex".to_string()]);
        assert_eq!(
            config.category_failure_policy,
            CategoryFailurePolicy::Propagate
        );
        assert_eq!(config.paragraph_limit, 4);
        assert!(config.user_agent.starts_with("wikiseek/"));
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(ApiConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ApiConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_paragraph_limit_rejected() {
        let config = ApiConfig {
            paragraph_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("paragraph_limit"));
    }

    #[test]
    fn relative_endpoint_rejected() {
        let config = ApiConfig {
            endpoint: "/w/api.php".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn blank_category_term_rejected() {
        let config = ApiConfig {
            excluded_category_terms: vec!["sex".into(), "  ".into()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn empty_category_terms_valid() {
        let config = ApiConfig {
            excluded_category_terms: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn failure_policy_deserialises_snake_case() {
        let policy: CategoryFailurePolicy = serde_json::from_str("\"keep\"").expect("deserialize");
        assert_eq!(policy, CategoryFailurePolicy::Keep);
        let policy: CategoryFailurePolicy = serde_json::from_str("\"drop\"").expect("deserialize");
        assert_eq!(policy, CategoryFailurePolicy::Drop);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"timeout_seconds": 3}"#).expect("deserialize");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.paragraph_limit, 4);
    }
}
