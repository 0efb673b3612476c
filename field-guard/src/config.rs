//! Validator configuration.

use crate::constraints::EmailPolicy;
use crate::error::Result;
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};

/// Settings applied when a [`Validator`](crate::core::Validator) registers
/// its built-in constraint kinds and while it validates.
///
/// # Examples
///
/// ```rust
/// use field_guard::config::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json(r#"{"email": {"max_tld_len": 4}}"#).unwrap();
/// assert_eq!(config.email.min_tld_len, 2);
/// assert_eq!(config.email.max_tld_len, Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Top-level-domain policy of the built-in `format=email` pattern
    pub email: EmailPolicy,
    /// Which events the validator logs
    pub log: LogConfig,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email_policy(mut self, email: EmailPolicy) -> Self {
        self.email = email;
        self
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
