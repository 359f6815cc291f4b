//! # Validator Configuration
//!
//! Settings loaded from environment variables.

use crate::constants::{DEFAULT_DPA_NAME, DEFAULT_NAMESPACE};
use crate::store::ResourceKey;

/// Validator configuration
///
/// All settings have defaults and can be overridden via environment variables.
/// Command-line flags take precedence over both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Namespace of the DataProtectionApplication and its secrets
    pub namespace: String,
    /// Name of the DataProtectionApplication to validate
    pub dpa_name: String,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            dpa_name: DEFAULT_DPA_NAME.to_string(),
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            log_enable_color: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            namespace: env_var_or_default_str("POD_NAMESPACE", DEFAULT_NAMESPACE),
            dpa_name: env_var_or_default_str("DPA_NAME", DEFAULT_DPA_NAME),
            log_level: env_var_or_default_str("LOG_LEVEL", "INFO"),
            log_format: env_var_or_default_str("LOG_FORMAT", "text"),
            log_enable_color: env_var_or_default_bool("LOG_ENABLE_COLOR", true),
        }
    }

    /// Key of the DataProtectionApplication to validate
    #[must_use]
    pub fn resource_key(&self) -> ResourceKey {
        ResourceKey::new(&self.namespace, &self.dpa_name)
    }

    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
