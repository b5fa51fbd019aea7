//! Dispatch request and outcome.

use serde_json::Value;
use shared_types::{json_id, OperationKind};
use std::fmt;

/// HTTP verb used for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    /// Verb for a change-event operation.
    #[must_use]
    pub fn from_operation(operation: OperationKind) -> Self {
        match operation {
            OperationKind::Create => Self::Post,
            OperationKind::Update => Self::Put,
            OperationKind::Delete => Self::Delete,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call to the remote system.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub verb: HttpVerb,
    /// Destination path relative to the remote base URL, e.g. `/usuarios`.
    pub path: String,
    pub body: Value,
}

impl DispatchRequest {
    pub fn new(verb: HttpVerb, path: impl Into<String>, body: Value) -> Self {
        Self {
            verb,
            path: path.into(),
            body,
        }
    }
}

/// Successful remote response.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Identifier assigned by the remote system, when the response carried one.
    pub target_id: Option<String>,
    /// HTTP status code.
    pub status: u16,
    /// Parsed response body (`Null` for an empty body).
    pub body: Value,
}

impl DispatchOutcome {
    /// Build an outcome, reading `target_id` from the body's `"id"` field.
    #[must_use]
    pub fn from_response(status: u16, body: Value) -> Self {
        Self {
            target_id: json_id(&body),
            status,
            body,
        }
    }
}
