//! # Domain Errors

use cs_02_entity_transform::TransformError;
use cs_03_remote_sync::DispatchError;
use shared_types::DecodeError;
use thiserror::Error;

/// Why an event was dropped. None of these stop the listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Invalid change event: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("Remote dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

impl PipelineError {
    /// Short label for flow logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_failed",
            Self::Transform(_) => "transform_failed",
            Self::Dispatch(_) => "dispatch_failed",
        }
    }
}
