//! # Domain Errors

use thiserror::Error;

/// A dispatch did not reach a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {message}")]
    Client { message: String },

    /// The remote host could not be reached.
    #[error("Cannot connect to {url}: {message}")]
    Connection { url: String, message: String },

    /// The request exceeded the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The remote system answered with a non-success status.
    #[error("Remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The success response body was not valid JSON.
    #[error("Unparsable response body: {message}")]
    InvalidResponse { message: String },

    /// Any other transport failure.
    #[error("HTTP request failed: {message}")]
    Transport { message: String },
}
