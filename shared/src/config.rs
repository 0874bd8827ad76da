//! Site configuration.
//!
//! Deployments override the defaults with a JSON document embedded in the page;
//! every field is optional and missing ones fall back to [`SiteConfig::default`].

use serde::{Deserialize, Serialize};

use crate::submission::SubmissionMethod;

/// Credential value that marks a provider as not yet set up
pub const PLACEHOLDER_ACCESS_KEY: &str = "YOUR_WEB3FORMS_ACCESS_KEY";

pub const WEB3FORMS_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse site configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Endpoint and credential for one submission provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub access_key: String,
}

impl ProviderConfig {
    /// A provider is configured iff its credential is not the placeholder sentinel
    pub fn is_configured(&self) -> bool {
        self.access_key != PLACEHOLDER_ACCESS_KEY
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: WEB3FORMS_ENDPOINT.to_string(),
            access_key: PLACEHOLDER_ACCESS_KEY.to_string(),
        }
    }
}

/// Provider table, one entry per [`SubmissionMethod`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderTable {
    pub web3forms: ProviderConfig,
}

impl ProviderTable {
    pub fn get(&self, method: SubmissionMethod) -> &ProviderConfig {
        match method {
            SubmissionMethod::Web3Forms => &self.web3forms,
        }
    }
}

/// Configuration for the whole page behavior layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub providers: ProviderTable,
    /// Address offered to the visitor when a submission fails
    pub fallback_contact: String,
    /// Anti-spam field that never leaves the browser
    pub honeypot_field: String,
    /// Name under which the provider credential is posted
    pub credential_field: String,
    /// Storage key holding the theme preference
    pub theme_storage_key: String,
    /// Attribute on the document root that carries the theme
    pub theme_attribute: String,
    pub toast_ttl_ms: u32,
    pub welcome_delay_ms: u32,
    pub welcome_message: Option<String>,
    /// `tracing` filter directive, e.g. `"info"` or `"portfolio_frontend=debug"`
    pub log_filter: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            providers: ProviderTable::default(),
            fallback_contact: "hello@example.com".to_string(),
            honeypot_field: "botcheck".to_string(),
            credential_field: "access_key".to_string(),
            theme_storage_key: "theme".to_string(),
            theme_attribute: "data-color-scheme".to_string(),
            toast_ttl_ms: 6000,
            welcome_delay_ms: 2000,
            welcome_message: Some(
                "Welcome to my portfolio! Feel free to explore and get in touch.".to_string(),
            ),
            log_filter: "info".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn provider(&self, method: SubmissionMethod) -> &ProviderConfig {
        self.providers.get(method)
    }

    pub fn is_method_configured(&self, method: SubmissionMethod) -> bool {
        self.provider(method).is_configured()
    }

    /// Configured/not configured for every known method, for startup diagnostics
    pub fn method_status(&self) -> Vec<(SubmissionMethod, bool)> {
        SubmissionMethod::ALL
            .iter()
            .map(|&method| (method, self.is_method_configured(method)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfigured() {
        let config = SiteConfig::default();
        assert!(!config.is_method_configured(SubmissionMethod::Web3Forms));
        assert_eq!(config.provider(SubmissionMethod::Web3Forms).endpoint, WEB3FORMS_ENDPOINT);
        assert_eq!(config.toast_ttl_ms, 6000);
        assert_eq!(config.theme_storage_key, "theme");
        assert_eq!(config.honeypot_field, "botcheck");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SiteConfig::from_json(
            r#"{"providers": {"web3forms": {"endpoint": "https://relay.test/submit", "access_key": "k-123"}},
                "fallback_contact": "me@site.test"}"#,
        )
        .unwrap();

        assert!(config.is_method_configured(SubmissionMethod::Web3Forms));
        assert_eq!(config.fallback_contact, "me@site.test");
        assert_eq!(config.theme_attribute, "data-color-scheme");
        assert_eq!(config.method_status(), vec![(SubmissionMethod::Web3Forms, true)]);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse site configuration"));
    }
}
