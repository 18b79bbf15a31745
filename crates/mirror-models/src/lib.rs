//! Model implementations for Mirror.
//!
//! This crate provides concrete implementations of the `Model` trait.
//!
//! # Supported Providers
//!
//! - **Mock**: Testing and offline development
//! - **Gemini**: Google's Gemini models (API key required)

pub mod factory;
pub mod gemini;

use async_trait::async_trait;
use mirror_abstraction::{
    GenerateResponse, GenerationOptions, Model, ModelError, UsageMetadata,
};
use tracing::debug;

pub use factory::{ModelConfig, ModelFactory, ModelType};
pub use gemini::GeminiModel;

/// A mock implementation of the `Model` trait for testing and demonstration.
#[derive(Debug, Default)]
pub struct MockModel {
    id: String,
}

impl MockModel {
    /// Creates a new `MockModel` with the given ID.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerateResponse, ModelError> {
        debug!(
            model_id = %self.id,
            prompt = %prompt,
            options = ?options,
            "MockModel generating content"
        );

        let response_content = format!("Mock response for: {prompt}\nModel ID: {}", self.id);

        let prompt_tokens = count_tokens(prompt);
        let completion_tokens = count_tokens(&response_content);

        let mut response = GenerateResponse::from_text(response_content);
        response.usage_metadata = Some(UsageMetadata {
            prompt_token_count: prompt_tokens,
            candidates_token_count: completion_tokens,
            total_token_count: prompt_tokens + completion_tokens,
        });
        Ok(response)
    }

    fn model_id(&self) -> &str {
        &self.id
    }
}

/// Count tokens in a string (simplified: word count).
///
/// For a real implementation, this would use a proper tokenizer.
#[allow(clippy::cast_possible_truncation)]
fn count_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_echoes_prompt() {
        let model = MockModel::new("test-mock".to_string());
        let response =
            model.generate("hello there", &GenerationOptions::default()).await.unwrap();

        assert_eq!(response.candidates.len(), 1);
        let content = response.candidates[0].content.as_ref().unwrap();
        let text = content.parts[0].text.as_deref().unwrap();
        assert!(text.contains("hello there"));

        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 2);
        assert_eq!(
            usage.total_token_count,
            usage.prompt_token_count + usage.candidates_token_count
        );
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("one two three"), 3);
    }
}
