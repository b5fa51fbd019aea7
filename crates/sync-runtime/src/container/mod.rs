//! # Sync Container
//!
//! Configuration and the component container built from it.

pub mod components;
pub mod config;

pub use components::SyncContainer;
pub use config::{ChannelConfig, ConfigError, RemoteSettings, StorageConfig, SyncConfig};
