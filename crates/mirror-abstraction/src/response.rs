//! Raw response tree returned by the generation API.
//!
//! These structures mirror the Gemini REST schema, with one deliberate
//! property: every substructure that can be absent, filtered, or partially
//! populated on the wire deserializes to an `Option` or an empty container.
//! A blocked or degenerate response is still a well-formed
//! `GenerateResponse`; no accessor here can fail mid-read.

use serde::{Deserialize, Serialize};

/// A full response from a `generateContent` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Alternative generations for the request. May be empty when the
    /// prompt was blocked before any generation happened.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Candidate>,

    /// Feedback about the prompt itself, including a block reason when the
    /// request was refused.
    #[serde(
        rename = "promptFeedback",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_feedback: Option<PromptFeedback>,

    /// Token accounting for the request.
    #[serde(
        rename = "usageMetadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One alternative generation returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The generated content. Absent when generation stopped before
    /// producing anything (e.g., a safety stop on the first token).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Why this candidate stopped generating.
    #[serde(
        rename = "finishReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub finish_reason: Option<FinishReason>,
}

/// A piece of structured content: an ordered list of parts with a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The role of the content producer ("user" or "model").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Ordered fragments of the content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

/// One fragment of a candidate's output. Non-text parts deserialize with
/// `text: None` and are skipped by the extraction layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// The text carried by this part, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Enumerated cause a candidate stopped generating.
///
/// Unknown wire values deserialize to `Unspecified` so that new API values
/// never break parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural stop point or configured stop sequence.
    Stop,
    /// Generation hit the output-length limit.
    MaxTokens,
    /// Generation was stopped by a safety filter.
    Safety,
    /// Generation was stopped for recitation of source material.
    Recitation,
    /// The provider reported some other stop cause.
    Other,
    /// Missing or unrecognized stop cause.
    #[default]
    #[serde(other, rename = "FINISH_REASON_UNSPECIFIED")]
    Unspecified,
}

/// Feedback about the prompt, populated when the request was refused
/// before or during generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptFeedback {
    /// Enumerated cause the request was refused (e.g., "SAFETY"). Kept as a
    /// raw string: the provider adds values over time and nothing branches
    /// on individual reasons.
    #[serde(
        rename = "blockReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub block_reason: Option<String>,
}

/// Token accounting for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,

    /// Number of tokens across all candidates.
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,

    /// Total number of tokens used.
    #[serde(rename = "totalTokenCount", default)]
    pub total_token_count: u32,
}

impl GenerateResponse {
    /// Builds a single-candidate text response. Convenience for tests and
    /// mock providers; production responses come off the wire.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part { text: Some(text.into()) }],
                }),
                finish_reason: Some(FinishReason::Stop),
            }],
            prompt_feedback: None,
            usage_metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response_deserializes() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "안녕하세요"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 5, "totalTokenCount": 8}
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Stop));
        let content = response.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.parts[0].text.as_deref(), Some("안녕하세요"));
        assert_eq!(response.usage_metadata.as_ref().unwrap().total_token_count, 8);
    }

    #[test]
    fn test_blocked_response_without_candidates_deserializes() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.is_empty());
        assert_eq!(
            response.prompt_feedback.as_ref().and_then(|pf| pf.block_reason.as_deref()),
            Some("SAFETY")
        );
    }

    #[test]
    fn test_candidate_without_content_deserializes() {
        let json = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates[0].content, None);
        assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::MaxTokens));
    }

    #[test]
    fn test_empty_object_deserializes() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.prompt_feedback.is_none());
        assert!(response.usage_metadata.is_none());
    }

    #[test]
    fn test_unknown_finish_reason_degrades_to_unspecified() {
        let json = r#"{"candidates": [{"finishReason": "PROHIBITED_CONTENT"}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Unspecified));
    }

    #[test]
    fn test_non_text_part_deserializes_as_textless() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": ""}}]}
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        let content = response.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.parts.len(), 1);
        assert_eq!(content.parts[0].text, None);
    }

    #[test]
    fn test_from_text_roundtrip() {
        let response = GenerateResponse::from_text("거울");
        let json = serde_json::to_string(&response).unwrap();
        let parsed: GenerateResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }
}
