//! Logging utilities and configuration for field-guard.
//!
//! The crate emits `tracing` events and never installs a subscriber itself.
//! [`LogConfig`] controls which of the crate's own events are produced;
//! [`setup`] offers a ready-made `tracing-subscriber` installation for
//! applications that do not configure one.

use serde::{Deserialize, Serialize};

/// Controls the events field-guard emits while validating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether to log each constraint compiled into a plan
    pub log_compilations: bool,
    /// Whether to log every per-record validation failure
    pub log_failures: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_compilations: true,
            log_failures: false,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            log_compilations: true,
            log_failures: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            log_compilations: false,
            log_failures: false,
            max_field_length: 128,
        }
    }
}

/// Macro for conditional validation failure logging.
#[macro_export]
macro_rules! log_failure {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_failures {
            tracing::debug!($($arg)*);
        }
    };
}

/// Macro for conditional plan compilation logging.
#[macro_export]
macro_rules! log_compilation {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_compilations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to at most `max_length` bytes, on a character boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let cut = value
        .char_indices()
        .map(|(idx, _)| idx)
        .take_while(|idx| *idx <= max_length)
        .last()
        .unwrap_or(0);
    format!("{}...(truncated)", &value[..cut])
}

/// Installs a `tracing-subscriber` that shows field-guard's own events.
pub mod setup {
    use super::LogConfig;
    use crate::error::{GuardError, Result};
    use tracing::Level;

    /// Output format of the installed subscriber.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum OutputFormat {
        #[default]
        Text,
        Json,
    }

    /// Settings for the subscriber installed by [`init_logging`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SubscriberConfig {
        /// Level for targets outside field-guard
        pub default_level: Level,
        /// Level for `field_guard` targets
        pub guard_level: Level,
        pub format: OutputFormat,
    }

    impl SubscriberConfig {
        /// Admits the events a validator configured with `log` emits:
        /// compilations at `info`, failures at `debug`.
        pub fn for_log_config(log: &LogConfig) -> Self {
            let guard_level = if log.log_failures {
                Level::DEBUG
            } else if log.log_compilations {
                Level::INFO
            } else {
                Level::WARN
            };
            Self {
                default_level: Level::WARN,
                guard_level,
                format: OutputFormat::Text,
            }
        }

        pub fn json(mut self) -> Self {
            self.format = OutputFormat::Json;
            self
        }

        /// The `EnvFilter` directives for this configuration.
        pub fn directives(&self) -> String {
            format!(
                "{},field_guard={}",
                self.default_level.as_str().to_lowercase(),
                self.guard_level.as_str().to_lowercase()
            )
        }
    }

    impl Default for SubscriberConfig {
        fn default() -> Self {
            Self::for_log_config(&LogConfig::default())
        }
    }

    /// Installs a global subscriber.
    ///
    /// `RUST_LOG` takes precedence over [`SubscriberConfig::directives`].
    /// Fails with [`GuardError::Configuration`] if the directives do not parse
    /// or a global subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use field_guard::logging::setup::{init_logging, SubscriberConfig};
    /// use field_guard::logging::LogConfig;
    ///
    /// init_logging(&SubscriberConfig::for_log_config(&LogConfig::verbose()).json()).unwrap();
    /// ```
    pub fn init_logging(config: &SubscriberConfig) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.directives()))
            .map_err(|e| GuardError::Configuration(format!("Invalid log filter: {e}")))?;

        let fmt_layer = match config.format {
            OutputFormat::Text => tracing_subscriber::fmt::layer().boxed(),
            OutputFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| {
                GuardError::Configuration(format!("Failed to install tracing subscriber: {e}"))
            })
    }
}
