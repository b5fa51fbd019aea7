//! # Remote Sync Subsystem (cs-03)
//!
//! Sends a transformed payload to the remote system and reports the
//! identifier the remote system assigned.
//!
//! ## Request Flow
//!
//! ```text
//! PipelineController
//!        │  DispatchRequest { verb, path, body }
//!        ▼
//! RemoteSyncClient::dispatch
//!        │  {verb} {base_url}{path}   (JSON body)
//!        ▼
//! Remote API ──→ 2xx + {"id": ...} ──→ DispatchOutcome { target_id, .. }
//!            └─→ anything else    ──→ DispatchError (logged, dropped)
//! ```
//!
//! There is no retry. A failed dispatch is final for that event.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::HttpRemoteSyncClient;
pub use domain::{DispatchError, DispatchOutcome, DispatchRequest, HttpVerb, RemoteConfig};
pub use ports::RemoteSyncClient;
