//! HTTP transport seam.
//!
//! [`HttpExchange`] is the one async boundary between the client and the
//! network. Production uses [`ReqwestExchange`]; tests substitute a mock.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::LlmError;

/// A fully assembled HTTP POST: endpoint, headers, and JSON body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Minimal async HTTP POST abstraction.
#[async_trait]
pub trait HttpExchange: Send + Sync {
    /// Send the request and return the status code and raw response body.
    async fn post(&self, request: HttpRequest) -> Result<(u16, String), LlmError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct ReqwestExchange {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ReqwestExchange {
    pub fn new(timeout_secs: u64) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn post(&self, request: HttpRequest) -> Result<(u16, String), LlmError> {
        let mut builder = self
            .client
            .post(&request.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout_secs))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout_secs))?;
        debug!(status, bytes = body.len(), "Received chat-completion response");
        Ok((status, body))
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout_secs: u64) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(timeout_secs)
    } else if err.is_connect() {
        LlmError::Network(format!("connection failed: {err}"))
    } else {
        LlmError::Network(err.to_string())
    }
}
