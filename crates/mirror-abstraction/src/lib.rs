//! Model abstraction layer for Mirror.
//!
//! This crate defines the core trait and currency types for talking to a
//! hosted generation API: the `Model` trait, the error taxonomy, bounded
//! generation options, and the raw response tree that providers return
//! without flattening. Classification of that tree into usable text or a
//! diagnosable failure lives downstream in `mirror-core`.

pub mod options;
pub mod response;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use options::GenerationOptions;
pub use response::{
    Candidate, Content, FinishReason, GenerateResponse, Part, PromptFeedback, UsageMetadata,
};

/// Represents an error that can occur when interacting with an AI model.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelError {
    /// An error occurred during the API request (e.g., network issues, invalid request).
    #[error("Request Error: {0}")]
    RequestError(String),

    /// The model returned an error (e.g., invalid input, server failure).
    #[error("Model Response Error: {0}")]
    ModelResponseError(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization Error: {0}")]
    SerializationError(String),

    /// The model provider is not supported or configured.
    #[error("Unsupported Model Provider: {0}")]
    UnsupportedModelProvider(String),

    /// Provider quota exceeded or rate limit hit (hard stop error).
    #[error("Provider '{provider}' quota exceeded{}", message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    QuotaExceeded {
        /// The provider name (e.g., "gemini").
        provider: String,
        /// Optional error message from the provider.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Other unexpected errors.
    #[error("Other Model Error: {0}")]
    Other(String),
}

/// A trait for interacting with different AI models.
///
/// All models must be `Send + Sync` to allow concurrent use across threads.
/// A model instance is bound to one fixed model identifier for its lifetime.
#[async_trait]
pub trait Model: Send + Sync {
    /// Sends a single prompt and returns the provider's raw response tree.
    ///
    /// A successful call means the transport and HTTP layers succeeded; it
    /// says nothing about whether the response carries usable text. Blocked,
    /// truncated, and empty responses all come back as `Ok` with the
    /// corresponding signals populated in the tree.
    ///
    /// # Errors
    /// Returns a `ModelError` on network, auth, quota, or protocol failure.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerateResponse, ModelError>;

    /// Returns the ID of the model.
    fn model_id(&self) -> &str;
}
