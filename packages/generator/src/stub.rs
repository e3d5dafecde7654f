use crate::error::GenerationResult;
use crate::template::render_snippet;
use crate::Generator;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Offline generator returning the counter demo after a fixed delay
#[derive(Debug, Clone)]
pub struct StubGenerator {
    delay: Duration,
}

impl StubGenerator {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for StubGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        debug!(delay_ms = self.delay.as_millis() as u64, "stub generation");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(render_snippet(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_generate_contains_prompt_without_raw_lt() {
        let code = StubGenerator::new(Duration::ZERO)
            .generate("Test")
            .await
            .unwrap();
        assert!(code.contains("Test"));
        assert!(!code.contains('<'));
    }

    #[tokio::test]
    async fn test_generate_waits_for_delay() {
        let generator = StubGenerator::new(Duration::from_millis(20));
        let started = Instant::now();
        generator.generate("x").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(StubGenerator::default().delay(), Duration::from_millis(300));
    }
}
