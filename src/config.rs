//! Countdown settings loaded from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! initial = 90
//! interval_ms = 500
//! immediate = true
//! ```
//!
//! Values are passed through as given. A zero `interval_ms` is not rejected;
//! it makes the runtime deliver ticks back to back.

use crate::countdown::{self, CountdownOptions};
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// File-level countdown configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Value the countdown starts from and resets to.
    pub initial: u64,
    /// Tick period in milliseconds.
    pub interval_ms: u64,
    /// Start ticking on construction.
    pub immediate: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            initial: 60,
            interval_ms: countdown::DEFAULT_INTERVAL.as_millis() as u64,
            immediate: false,
        }
    }
}

impl CountdownConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(?path, ?config, "loaded countdown config");
        Ok(config)
    }

    /// Tick period as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Options carrying the configured interval and start mode.
    ///
    /// Callbacks, style and key bindings can be layered on with the
    /// `with_*` builders.
    pub fn options(&self) -> CountdownOptions {
        CountdownOptions::new()
            .with_interval(self.interval())
            .with_immediate(self.immediate)
    }

    /// Builds a countdown from this configuration.
    pub fn build(&self) -> countdown::Model {
        countdown::new_with_options(self.initial, self.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = CountdownConfig::from_toml_str("").unwrap();
        assert_eq!(config, CountdownConfig::default());
        assert_eq!(config.initial, 60);
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert!(!config.immediate);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = CountdownConfig::from_toml_str(
            "initial = 3\ninterval_ms = 10\nimmediate = true\n",
        )
        .unwrap();
        assert_eq!(
            config,
            CountdownConfig {
                initial: 3,
                interval_ms: 10,
                immediate: true,
            }
        );
    }

    #[test]
    fn test_parse_error() {
        let err = CountdownConfig::from_toml_str("initial = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse countdown config"));
    }

    #[test]
    fn test_negative_initial_rejected_by_type() {
        let err = CountdownConfig::from_toml_str("initial = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CountdownConfig::load("/nonexistent/countdown.toml").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/countdown.toml"));
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "bubbletea-countdown-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "initial = 5\n").unwrap();
        let config = CountdownConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.initial, 5);
        assert_eq!(config.interval_ms, 1000);
    }

    #[test]
    fn test_build() {
        let config = CountdownConfig {
            initial: 3,
            interval_ms: 10,
            immediate: true,
        };
        let countdown = config.build();
        assert_eq!(countdown.remaining(), 3);
        assert!(countdown.is_active());
        assert_eq!(
            countdown.scheduler().interval.resolve(),
            Duration::from_millis(10)
        );
    }
}
