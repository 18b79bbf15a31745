//! Google Gemini model implementation.
//!
//! This module provides an implementation of the `Model` trait for Google's
//! Gemini API. The client deliberately returns the raw response tree on any
//! 2xx status: a blocked, truncated, or empty body is not an error at this
//! layer, it is a classification problem for the extraction layer.

use async_trait::async_trait;
use mirror_abstraction::{Content, GenerateResponse, GenerationOptions, Model, ModelError, Part};
use reqwest::Client;
use serde::Serialize;
use std::env;
use tracing::{debug, error};

/// Environment variable holding the Gemini API key.
const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Google Gemini model implementation.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    /// The model ID (e.g., "gemini-2.5-pro").
    model_id: String,
    /// The API key for authentication.
    api_key: String,
    /// The base URL for the Gemini API.
    base_url: String,
    /// HTTP client for making requests.
    client: Client,
}

impl GeminiModel {
    /// Creates a new `GeminiModel` with the given model ID.
    ///
    /// # Errors
    /// Returns a `ModelError` if the API key is not found in environment variables.
    pub fn new(model_id: String) -> Result<Self, ModelError> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| {
            ModelError::UnsupportedModelProvider(format!(
                "{API_KEY_ENV} environment variable not set"
            ))
        })?;

        Ok(Self::with_api_key(model_id, api_key))
    }

    /// Creates a new `GeminiModel` with a custom API key.
    #[must_use]
    pub fn with_api_key(model_id: String, api_key: String) -> Self {
        Self {
            model_id,
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: Client::new(),
        }
    }

    /// Overrides the API base URL. Used by tests to point at a local server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl Model for GeminiModel {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerateResponse, ModelError> {
        debug!(
            model_id = %self.model_id,
            prompt_len = prompt.len(),
            max_output_tokens = options.max_output_tokens,
            "GeminiModel generating content"
        );

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_id, self.api_key
        );

        let request_body = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
            generation_config: Some(GeminiGenerationConfig::from(options)),
        };

        let response = self.client.post(&url).json(&request_body).send().await.map_err(|e| {
            error!(error = %e, "Failed to send request to Gemini API");
            ModelError::RequestError(format!("Network error: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                status = %status,
                error = %error_text,
                "Gemini API returned error status"
            );

            // Map quota/rate limit errors to QuotaExceeded
            if status == 402 || status == 429 {
                return Err(ModelError::QuotaExceeded {
                    provider: "gemini".to_string(),
                    message: Some(error_text),
                });
            }

            // Map authentication errors (401, 403) to UnsupportedModelProvider
            if status == 401 || status == 403 {
                return Err(ModelError::UnsupportedModelProvider(format!(
                    "Authentication failed ({}): {}",
                    status, error_text
                )));
            }

            // Map server errors (500-599) to ModelResponseError
            if (500..=599).contains(&status.as_u16()) {
                return Err(ModelError::ModelResponseError(format!(
                    "Server error ({}): {}",
                    status, error_text
                )));
            }

            return Err(ModelError::ModelResponseError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        // Parse the raw tree. No shortcut accessor: candidates, parts, and
        // prompt feedback all stay exactly as the wire carried them, and a
        // body with zero candidates is a valid response.
        response.json::<GenerateResponse>().await.map_err(|e| {
            error!(error = %e, "Failed to parse Gemini API response");
            ModelError::SerializationError(format!("Failed to parse response: {}", e))
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Gemini API request structures

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
}

impl From<&GenerationOptions> for GeminiGenerationConfig {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            max_output_tokens: options.max_output_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_abstraction::FinishReason;

    fn mock_model(server: &mockito::Server) -> GeminiModel {
        GeminiModel::with_api_key("test-model".to_string(), "test-key".to_string())
            .with_base_url(server.url())
    }

    #[test]
    fn test_gemini_model_creation_with_api_key() {
        let model = GeminiModel::with_api_key("gemini-2.5-pro".to_string(), "test-key".to_string());
        assert_eq!(model.model_id(), "gemini-2.5-pro");
    }

    #[test]
    fn test_generation_config_serialization() {
        let options = GenerationOptions::default()
            .with_max_output_tokens(800)
            .with_temperature(0.7)
            .with_top_p(0.95);
        let config = GeminiGenerationConfig::from(&options);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"maxOutputTokens\":800"));
        assert!(json.contains("\"topP\":0.95"));
        assert!(json.contains("\"temperature\":0.7"));
    }

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let request = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some("안녕".to_string()) }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: 1200,
                temperature: 0.9,
                top_p: 0.9,
            }),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"maxOutputTokens\""));
        assert!(!json.contains("max_output_tokens"));
    }

    #[tokio::test]
    async fn test_generate_success_returns_raw_tree() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "Hello, world!"}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 3, "totalTokenCount": 5}
                }"#,
            )
            .create_async()
            .await;

        let model = mock_model(&server);
        let response =
            model.generate("Say hello", &GenerationOptions::default()).await.unwrap();

        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Stop));
        let content = response.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.parts[0].text.as_deref(), Some("Hello, world!"));
        assert_eq!(response.usage_metadata.as_ref().unwrap().total_token_count, 5);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_blocked_body_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .create_async()
            .await;

        let model = mock_model(&server);
        let response =
            model.generate("blocked prompt", &GenerationOptions::default()).await.unwrap();

        assert!(response.candidates.is_empty());
        assert_eq!(
            response.prompt_feedback.and_then(|pf| pf.block_reason),
            Some("SAFETY".to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_quota_error_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .with_status(429)
            .with_body("RESOURCE_EXHAUSTED: quota exceeded")
            .create_async()
            .await;

        let model = mock_model(&server);
        let error =
            model.generate("hello", &GenerationOptions::default()).await.unwrap_err();

        match error {
            ModelError::QuotaExceeded { provider, message } => {
                assert_eq!(provider, "gemini");
                assert!(message.unwrap().contains("RESOURCE_EXHAUSTED"));
            }
            other => panic!("Expected QuotaExceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_auth_error_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .with_status(403)
            .with_body("API key not valid")
            .create_async()
            .await;

        let model = mock_model(&server);
        let error =
            model.generate("hello", &GenerationOptions::default()).await.unwrap_err();

        match error {
            ModelError::UnsupportedModelProvider(message) => {
                assert!(message.contains("Authentication failed"));
            }
            other => panic!("Expected UnsupportedModelProvider, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_server_error_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let model = mock_model(&server);
        let error =
            model.generate("hello", &GenerationOptions::default()).await.unwrap_err();

        match error {
            ModelError::ModelResponseError(message) => {
                assert!(message.contains("Server error"));
            }
            other => panic!("Expected ModelResponseError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_serialization_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".to_string(), "test-key".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let model = mock_model(&server);
        let error =
            model.generate("hello", &GenerationOptions::default()).await.unwrap_err();

        assert!(matches!(error, ModelError::SerializationError(_)));
    }
}
