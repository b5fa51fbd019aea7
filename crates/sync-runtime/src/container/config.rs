//! # Runtime Configuration
//!
//! Defaults for every setting, overridable from `CS_*` environment variables.
//!
//! | Setting | Variable | Default |
//! |---------|----------|---------|
//! | channel topic | `CS_CHANNEL_TOPIC` | `crud-channel` |
//! | channel capacity | `CS_CHANNEL_CAPACITY` | 1000 |
//! | remote base URL | `CS_REMOTE_BASE_URL` | `http://localhost:8080` |
//! | remote timeout (s) | `CS_REMOTE_TIMEOUT_SECS` | 30 |
//! | canonical store file | `CS_STORE_PATH` | `./data/integrador.db` |
//! | in-memory store | `CS_STORE_IN_MEMORY` | false |

use std::path::PathBuf;
use std::time::Duration;

use cs_03_remote_sync::RemoteConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::DEFAULT_TOPIC;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncConfig {
    pub channel: ChannelConfig,
    pub remote: RemoteSettings,
    pub storage: StorageConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Channel topic must not be empty")]
    EmptyTopic,

    #[error("Channel capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Remote base URL must start with http:// or https://, got `{0}`")]
    InvalidBaseUrl(String),

    #[error("Remote timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Invalid value `{value}` for {var}")]
    InvalidValue { var: &'static str, value: String },
}

impl SyncConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by `lookup(var)` for each known variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(topic) = lookup("CS_CHANNEL_TOPIC") {
            config.channel.topic = topic;
        }
        if let Some(value) = lookup("CS_CHANNEL_CAPACITY") {
            config.channel.capacity = parse("CS_CHANNEL_CAPACITY", value)?;
        }
        if let Some(url) = lookup("CS_REMOTE_BASE_URL") {
            config.remote.base_url = url;
        }
        if let Some(value) = lookup("CS_REMOTE_TIMEOUT_SECS") {
            config.remote.timeout_secs = parse("CS_REMOTE_TIMEOUT_SECS", value)?;
        }
        if let Some(path) = lookup("CS_STORE_PATH") {
            config.storage.canonical_store_path = PathBuf::from(path);
        }
        if let Some(value) = lookup("CS_STORE_IN_MEMORY") {
            config.storage.in_memory = parse_flag("CS_STORE_IN_MEMORY", value)?;
        }

        Ok(config)
    }

    /// Reject settings the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.topic.trim().is_empty() {
            return Err(ConfigError::EmptyTopic);
        }
        if self.channel.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let url = self.remote.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.to_string()));
        }
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue { var, value }),
    }
}

/// Message channel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Topic carrying change events.
    pub topic: String,
    /// Messages buffered per subscriber before publishers wait.
    pub capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Remote system configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl RemoteSettings {
    /// Client settings for the remote sync adapter.
    #[must_use]
    pub fn client_config(&self) -> RemoteConfig {
        RemoteConfig::new(self.base_url.clone()).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: cs_03_remote_sync::domain::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Canonical store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// File holding canonical students and identity mappings.
    pub canonical_store_path: PathBuf,
    /// Keep the canonical store in memory only.
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            canonical_store_path: PathBuf::from("./data/integrador.db"),
            in_memory: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.channel.topic, "crud-channel");
        assert_eq!(config.channel.capacity, 1000);
        assert_eq!(config.remote.base_url, "http://localhost:8080");
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(
            config.storage.canonical_store_path,
            PathBuf::from("./data/integrador.db")
        );
        assert!(!config.storage.in_memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = SyncConfig::from_lookup(lookup(&[
            ("CS_CHANNEL_TOPIC", "students"),
            ("CS_CHANNEL_CAPACITY", "64"),
            ("CS_REMOTE_BASE_URL", "https://biblioteca.local"),
            ("CS_REMOTE_TIMEOUT_SECS", "5"),
            ("CS_STORE_PATH", "/var/lib/sync/canon.db"),
            ("CS_STORE_IN_MEMORY", "true"),
        ]))
        .unwrap();

        assert_eq!(config.channel.topic, "students");
        assert_eq!(config.channel.capacity, 64);
        assert_eq!(config.remote.base_url, "https://biblioteca.local");
        assert_eq!(config.remote.timeout_secs, 5);
        assert_eq!(
            config.storage.canonical_store_path,
            PathBuf::from("/var/lib/sync/canon.db")
        );
        assert!(config.storage.in_memory);

        let client = config.remote.client_config();
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_unparsable_override_fails() {
        let err = SyncConfig::from_lookup(lookup(&[("CS_CHANNEL_CAPACITY", "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "CS_CHANNEL_CAPACITY",
                value: "lots".into()
            }
        );
        assert!(SyncConfig::from_lookup(lookup(&[("CS_STORE_IN_MEMORY", "maybe")])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = SyncConfig::default();
        config.channel.topic = "  ".into();
        assert_eq!(config.validate(), Err(ConfigError::EmptyTopic));

        let mut config = SyncConfig::default();
        config.channel.capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));

        let mut config = SyncConfig::default();
        config.remote.base_url = "ftp://remote".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));

        let mut config = SyncConfig::default();
        config.remote.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
