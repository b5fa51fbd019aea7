//! reqwest-backed remote client.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{DispatchError, DispatchOutcome, DispatchRequest, HttpVerb, RemoteConfig};
use crate::ports::RemoteSyncClient;

/// HTTP client for the remote system's REST API.
pub struct HttpRemoteSyncClient {
    client: Client,
    config: RemoteConfig,
}

impl HttpRemoteSyncClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: RemoteConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DispatchError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn method(verb: HttpVerb) -> Method {
        match verb {
            HttpVerb::Post => Method::POST,
            HttpVerb::Put => Method::PUT,
            HttpVerb::Delete => Method::DELETE,
        }
    }

    fn transport_error(url: &str, error: reqwest::Error) -> DispatchError {
        if error.is_timeout() {
            DispatchError::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            DispatchError::Connection {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            DispatchError::Transport {
                message: error.to_string(),
            }
        }
    }

    async fn send(&self, request: &DispatchRequest, url: &str) -> Result<DispatchOutcome, DispatchError> {
        let response = self
            .client
            .request(Self::method(request.verb), url)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| Self::transport_error(url, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(url, e))?;

        if !status.is_success() {
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        // An empty success body carries no id.
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| DispatchError::InvalidResponse {
                message: e.to_string(),
            })?
        };

        Ok(DispatchOutcome::from_response(status.as_u16(), body))
    }
}

#[async_trait]
impl RemoteSyncClient for HttpRemoteSyncClient {
    async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        let url = self.config.url_for(&request.path);
        debug!(verb = %request.verb, url = %url, "[cs-03] Dispatching to remote");

        match self.send(&request, &url).await {
            Ok(outcome) => {
                info!(
                    verb = %request.verb,
                    url = %url,
                    status = outcome.status,
                    target_id = ?outcome.target_id,
                    "[cs-03] Remote accepted"
                );
                Ok(outcome)
            }
            Err(error) => {
                warn!(verb = %request.verb, url = %url, error = %error, "[cs-03] Dispatch failed");
                Err(error)
            }
        }
    }
}
