//! # Adapters Layer

pub mod http;

pub use http::HttpRemoteSyncClient;
