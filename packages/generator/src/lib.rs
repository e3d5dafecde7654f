//! # Livepad Generator
//!
//! Turns a natural-language prompt into a code snippet. The offline
//! [`StubGenerator`] always answers with a counter demo; [`HttpGenerator`]
//! talks to a remote endpoint with the same wire shape.

pub mod error;
pub mod http;
pub mod stub;
pub mod template;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use error::{GenerationError, GenerationResult};
pub use http::HttpGenerator;
pub use stub::StubGenerator;
pub use template::{escape_prompt, render_snippet};

/// Placeholder used when a response carries no code
pub const NO_CODE_RETURNED: &str = "// no code returned";

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> GenerationResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub code: Option<String>,
}

/// The HTTP generator when an endpoint is configured, the stub otherwise
pub fn generator_for(endpoint: Option<&str>, stub_delay: Duration) -> Arc<dyn Generator> {
    match endpoint {
        Some(endpoint) => Arc::new(HttpGenerator::new(endpoint)),
        None => Arc::new(StubGenerator::new(stub_delay)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_code_decodes() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.code, None);
    }

    #[test]
    fn test_request_without_prompt_decodes_as_empty() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.prompt, "");
    }

    #[tokio::test]
    async fn test_generator_for_defaults_to_stub() {
        let generator = generator_for(None, Duration::ZERO);
        let code = generator.generate("hello").await.unwrap();
        assert!(code.contains("hello"));
    }
}
