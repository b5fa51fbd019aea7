//! # Outbound Ports (Driven Ports)

use async_trait::async_trait;

use crate::domain::{DispatchError, DispatchOutcome, DispatchRequest};

/// Client for the remote system.
///
/// One call per request, no retry. Implementations report every non-success
/// as a [`DispatchError`].
#[async_trait]
pub trait RemoteSyncClient: Send + Sync {
    async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchOutcome, DispatchError>;
}
