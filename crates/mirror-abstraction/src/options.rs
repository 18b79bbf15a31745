//! Bounded generation options.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Inclusive bounds for `max_output_tokens`.
pub const MAX_OUTPUT_TOKENS_RANGE: (u32, u32) = (10, 8192);
/// Inclusive bounds for `temperature`.
pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);
/// Inclusive bounds for `top_p`.
pub const TOP_P_RANGE: (f32, f32) = (0.0, 1.0);

/// Parameters for controlling the model's generation.
///
/// All numeric fields are bounded; the builder methods clamp out-of-range
/// values instead of erroring. Two sampling controls sometimes surfaced in
/// front-end captions (top-k and repetition penalty) are intentionally not
/// represented here: the underlying API binding does not support them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// The maximum number of tokens to generate, in `[10, 8192]`.
    pub max_output_tokens: u32,

    /// Sampling temperature, in `[0.0, 2.0]`. Higher values mean the model
    /// will take more risks.
    pub temperature: f32,

    /// Nucleus sampling threshold, in `[0.0, 1.0]`.
    pub top_p: f32,

    /// Overrides the session's fixed monologue self-prompt when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monologue_prompt: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: 1200,
            temperature: 0.9,
            top_p: 0.9,
            monologue_prompt: None,
        }
    }
}

impl GenerationOptions {
    /// Creates options with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum output token count, clamped to `[10, 8192]`.
    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        let (lo, hi) = MAX_OUTPUT_TOKENS_RANGE;
        let clamped = max_output_tokens.clamp(lo, hi);
        if clamped != max_output_tokens {
            warn!(
                original = max_output_tokens,
                clamped = clamped,
                "Clamping max_output_tokens to [{lo}, {hi}]"
            );
        }
        self.max_output_tokens = clamped;
        self
    }

    /// Sets the sampling temperature, clamped to `[0.0, 2.0]`.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        let (lo, hi) = TEMPERATURE_RANGE;
        let clamped = temperature.clamp(lo, hi);
        if (clamped - temperature).abs() > f32::EPSILON {
            warn!(
                original = temperature,
                clamped = clamped,
                "Clamping temperature to [{lo}, {hi}]"
            );
        }
        self.temperature = clamped;
        self
    }

    /// Sets the nucleus sampling threshold, clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        let (lo, hi) = TOP_P_RANGE;
        let clamped = top_p.clamp(lo, hi);
        if (clamped - top_p).abs() > f32::EPSILON {
            warn!(original = top_p, clamped = clamped, "Clamping top_p to [{lo}, {hi}]");
        }
        self.top_p = clamped;
        self
    }

    /// Sets a custom monologue self-prompt.
    #[must_use]
    pub fn with_monologue_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.monologue_prompt = Some(prompt.into());
        self
    }
}
