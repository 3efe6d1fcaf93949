//! OllamaApiClient - Direct REST client for a local Ollama server.
//!
//! Sends non-streaming `/api/generate` requests and returns the parsed body.
//! No timeout and no retry: a stalled server stalls the awaiting turn.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tolk_core::config::DEFAULT_ENDPOINT;
use tolk_core::session::{GenerateClient, GenerateRequest, GenerateResponse};
use tolk_core::{Result, TolkError};

/// Client implementation that talks to the Ollama HTTP API.
#[derive(Clone)]
pub struct OllamaApiClient {
    client: Client,
    endpoint: String,
}

impl OllamaApiClient {
    /// Creates a client for the given generate endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn send_request(&self, body: &GenerateRequest) -> Result<GenerateResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| TolkError::transport(format!("Ollama API request failed: {err}")))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| TolkError::transport(format!("Failed to read Ollama response: {err}")))?;

        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                "[OllamaApiClient] Non-success response from {}",
                self.endpoint
            );
            return Err(TolkError::api(status.as_u16(), body_text));
        }

        parse_generate_response(&body_text)
    }
}

impl Default for OllamaApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl GenerateClient for OllamaApiClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.send_request(request).await
    }
}

fn parse_generate_response(body: &str) -> Result<GenerateResponse> {
    serde_json::from_str(body).map_err(|err| {
        tracing::error!("[OllamaApiClient] Unparseable success body: {}", err);
        TolkError::from(err)
    })
}
