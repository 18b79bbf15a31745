//! Response extraction and classification.
//!
//! Turns a raw `GenerateResponse` into a deterministic text-or-diagnostic
//! outcome. The walk only ever touches the explicit structural tree; there
//! is no convenience accessor that can fail mid-read, so filtered, partial,
//! and blocked responses degrade to a classified outcome instead of an
//! error. Any retrievable text wins over a block or length-limit signal:
//! text presence is the strongest indicator of usability.

use mirror_abstraction::{FinishReason, GenerateResponse};

/// The classified result of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Non-empty joined text, trimmed of surrounding whitespace.
    Text(String),
    /// The prompt or response was blocked by policy, with the reported reason.
    Blocked(String),
    /// Generation stopped at the output-length limit with no usable text.
    Truncated,
    /// No text, no block reason, no length-limit signal.
    Empty,
}

impl ExtractionOutcome {
    /// Maps the outcome to the string shown to the user.
    ///
    /// Every variant yields a displayable message; blocked, truncated, and
    /// empty outcomes are local recoveries, not failures to propagate.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocked(reason) => {
                format!("⚠️ 응답이 안전 정책에 의해 차단되었습니다. (사유: {reason})")
            }
            Self::Truncated => "⚠️ 응답이 토큰 한도(MAX_TOKENS)에 먼저 도달해 비어 있었습니다.\n\
                → 제안: 프롬프트를 조금 줄이거나, max_new_tokens 값을 높여 다시 시도해 보세요."
                .to_string(),
            Self::Empty => {
                "응답을 생성하지 못했습니다. 프롬프트를 조금 바꿔 다시 시도해 주세요.".to_string()
            }
        }
    }
}

/// The message shown when the generation call itself failed in transit.
#[must_use]
pub fn transport_failure_message(detail: &str) -> String {
    format!("⚠️ Gemini 호출 중 오류가 발생했습니다: {detail}")
}

/// Raw signals observed during the last extraction. Observability only;
/// nothing outside this module branches on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// One finish reason per candidate, in candidate order. A candidate
    /// without a reported reason contributes `Unspecified`.
    pub finish_reasons: Vec<FinishReason>,
    /// The prompt-feedback block reason, when present and non-empty.
    pub block_reason: Option<String>,
    /// Number of text-bearing parts found across all candidates.
    pub text_part_count: usize,
    /// Description of a transport failure, when the call never produced a
    /// response to extract from.
    pub transport_error: Option<String>,
}

impl DiagnosticRecord {
    /// Builds the record for a call that failed before any response existed.
    #[must_use]
    pub fn from_transport_failure(detail: impl Into<String>) -> Self {
        Self { transport_error: Some(detail.into()), ..Self::default() }
    }
}

/// Extracts usable text from a raw response, or classifies why there is none.
///
/// Priority order, first match wins:
/// 1. Any non-empty joined text across candidates → `Text`.
/// 2. A non-empty block reason → `Blocked`.
/// 3. Any candidate that stopped at the length limit → `Truncated`.
/// 4. Otherwise → `Empty`.
#[must_use]
pub fn extract(response: &GenerateResponse) -> (ExtractionOutcome, DiagnosticRecord) {
    let mut fragments: Vec<&str> = Vec::new();
    let mut finish_reasons = Vec::with_capacity(response.candidates.len());

    for candidate in &response.candidates {
        finish_reasons.push(candidate.finish_reason.unwrap_or_default());
        let parts = candidate.content.as_ref().map_or(&[][..], |content| &content.parts[..]);
        for part in parts {
            if let Some(text) = part.text.as_deref() {
                if !text.is_empty() {
                    fragments.push(text);
                }
            }
        }
    }

    let block_reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
        .filter(|reason| !reason.is_empty())
        .map(str::to_string);

    let record = DiagnosticRecord {
        finish_reasons,
        block_reason: block_reason.clone(),
        text_part_count: fragments.len(),
        transport_error: None,
    };

    let joined = fragments.join("\n");
    let trimmed = joined.trim();

    let outcome = if !trimmed.is_empty() {
        ExtractionOutcome::Text(trimmed.to_string())
    } else if let Some(reason) = block_reason {
        ExtractionOutcome::Blocked(reason)
    } else if record.finish_reasons.contains(&FinishReason::MaxTokens) {
        ExtractionOutcome::Truncated
    } else {
        ExtractionOutcome::Empty
    };

    (outcome, record)
}
