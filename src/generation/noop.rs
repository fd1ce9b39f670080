use super::provider::{GenerationError, GenerationOptions, TextGenerator};
use async_trait::async_trait;

/// Generator used when generation is disabled in the configuration.
///
/// Every call fails with [`GenerationError::Disabled`], so replies always come
/// from the canned responders.
pub struct NoOpGenerator;

#[async_trait]
impl TextGenerator for NoOpGenerator {
    fn name(&self) -> &str {
        "noop"
    }

    fn model(&self) -> &str {
        "none"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        Ok(())
    }
}
