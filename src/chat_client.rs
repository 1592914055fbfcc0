use crate::error::SubmitError;
use crate::schemas::prompt_request::PromptRequest;
use crate::schemas::prompt_response::PromptResponse;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;

/// Chat endpoint of the local assistant backend.
pub const CHAT_ENDPOINT: &str = "http://localhost:8000/assistant/chat";

#[derive(Clone, Debug)]
pub struct ChatClient {
    inner: Arc<Client>,
    endpoint: Arc<str>,
}

impl ChatClient {
    pub fn new() -> Self {
        Self::with_endpoint(CHAT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl AsRef<str>) -> Self {
        Self {
            inner: Arc::new(Client::new()),
            endpoint: Arc::from(endpoint.as_ref()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one prompt and parses whatever JSON comes back.
    ///
    /// The status code is only logged: an error status with a JSON body is
    /// parsed like any other reply.
    pub async fn send_prompt(&self, request: &PromptRequest) -> Result<PromptResponse, SubmitError> {
        let response = self
            .inner
            .post(self.endpoint.as_ref())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let err = SubmitError::request(e);
                tracing::warn!("Chat request to {} failed: {}", self.endpoint, err);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Chat endpoint answered with status {}", status);
        }

        let body = response.bytes().await.map_err(SubmitError::Body)?;
        let parsed = PromptResponse::from_slice(&body)?;

        tracing::debug!(
            "Chat reply parsed ({} bytes, answer present: {})",
            body.len(),
            parsed.response.is_some()
        );

        Ok(parsed)
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}
