use crate::error::{GenerationError, GenerationResult};
use crate::{GenerateRequest, GenerateResponse, Generator, NO_CODE_RETURNED};
use async_trait::async_trait;
use tracing::debug;

/// Generator backed by a remote `POST {prompt} -> {code}` endpoint
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        debug!(endpoint = %self.endpoint, "requesting generation");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        Ok(body
            .code
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| NO_CODE_RETURNED.to_string()))
    }
}
