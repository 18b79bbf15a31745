//! Conversation session: transcript, monologue flag, last diagnostic.
//!
//! One `ConversationSession` owns one conversation's mutable state. The
//! host serializes calls into it; nothing here locks. The monologue flag
//! only records whether the host should keep issuing `tick` calls - the
//! cadence (and any pause between turns) belongs to the host's loop.

use chrono::{DateTime, Utc};
use mirror_abstraction::{GenerationOptions, Model};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extractor::{self, DiagnosticRecord};
use crate::mirror;

/// The fixed monologue self-prompt, overridable via
/// `GenerationOptions::monologue_prompt`.
pub const MONOLOGUE_PROMPT: &str =
    "은은하고 조용한 혼잣말을 한국어로 1~3문장 해줘. '예수님의 평화와 양의 문' 상징을 가볍게 담아.";

/// Mirror subject used for self-generated turns.
pub const MONOLOGUE_SUBJECT: &str = "혼잣말";

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The human participant.
    User,
    /// The model (or a synthesized fallback standing in for it).
    Assistant,
}

/// One line of the conversation, in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who produced this entry.
    pub role: Role,
    /// The display text.
    pub text: String,
    /// When this entry was appended.
    pub timestamp: DateTime<Utc>,
    /// True for self-generated monologue turns.
    pub machine_initiated: bool,
}

impl TranscriptEntry {
    fn now(role: Role, text: String, machine_initiated: bool) -> Self {
        Self { role, text, timestamp: Utc::now(), machine_initiated }
    }
}

/// Whether the host should be driving monologue ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonologueState {
    /// No self-generated turns.
    #[default]
    Idle,
    /// The host keeps issuing `tick` calls at its own cadence.
    Running,
}

/// Per-conversation mutable state with a defined lifecycle: created at
/// conversation start, dropped at session end.
#[derive(Debug, Default)]
pub struct ConversationSession {
    transcript: Vec<TranscriptEntry>,
    monologue: MonologueState,
    last_diagnostic: Option<DiagnosticRecord>,
}

impl ConversationSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits one user turn and appends the resulting entries.
    ///
    /// Returns exactly the entries appended by this call: the user entry
    /// (when `user_text` is non-empty) followed by the assistant entry.
    /// A transport failure never propagates; it becomes a fallback message
    /// and a diagnostic carrying the failure description.
    pub async fn submit(
        &mut self,
        user_text: &str,
        options: &GenerationOptions,
        mirror_enabled: bool,
        model: &dyn Model,
    ) -> Vec<TranscriptEntry> {
        let trimmed = user_text.trim();
        let mut appended = Vec::with_capacity(2);

        if !trimmed.is_empty() {
            appended.push(TranscriptEntry::now(Role::User, user_text.to_string(), false));
        }

        let mut answer = self.generate_answer(user_text, options, model).await;
        if mirror_enabled {
            let subject = trimmed.split_whitespace().next().unwrap_or_default();
            answer = mirror::transform(subject, &answer);
        }
        appended.push(TranscriptEntry::now(Role::Assistant, answer, false));

        self.transcript.extend(appended.iter().cloned());
        appended
    }

    /// Runs one self-generated monologue turn and appends its entry.
    ///
    /// The session does not check the monologue flag here: the flag gates
    /// the host's decision to call, not the call itself.
    pub async fn tick(
        &mut self,
        options: &GenerationOptions,
        mirror_enabled: bool,
        model: &dyn Model,
    ) -> TranscriptEntry {
        let prompt = options.monologue_prompt.as_deref().unwrap_or(MONOLOGUE_PROMPT);
        let mut answer = self.generate_answer(prompt, options, model).await;
        if mirror_enabled {
            answer = mirror::transform(MONOLOGUE_SUBJECT, &answer);
        }

        let entry = TranscriptEntry::now(Role::Assistant, answer, true);
        self.transcript.push(entry.clone());
        entry
    }

    /// Calls the model and maps the result to a display string, recording
    /// the diagnostic either way.
    async fn generate_answer(
        &mut self,
        prompt: &str,
        options: &GenerationOptions,
        model: &dyn Model,
    ) -> String {
        match model.generate(prompt, options).await {
            Ok(raw) => {
                let (outcome, record) = extractor::extract(&raw);
                debug!(outcome = ?outcome, "extracted model response");
                self.last_diagnostic = Some(record);
                outcome.user_message()
            }
            Err(error) => {
                let detail = error.to_string();
                self.last_diagnostic =
                    Some(DiagnosticRecord::from_transport_failure(detail.clone()));
                extractor::transport_failure_message(&detail)
            }
        }
    }

    /// Signals the host to start driving monologue ticks.
    pub fn start_monologue(&mut self) {
        self.monologue = MonologueState::Running;
    }

    /// Signals the host to stop driving monologue ticks.
    pub fn stop_monologue(&mut self) {
        self.monologue = MonologueState::Idle;
    }

    /// Current monologue state.
    #[must_use]
    pub fn monologue_state(&self) -> MonologueState {
        self.monologue
    }

    /// True while the monologue flag is `Running`.
    #[must_use]
    pub fn is_monologue_running(&self) -> bool {
        self.monologue == MonologueState::Running
    }

    /// The full transcript, in append order.
    #[must_use]
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Raw signals from the most recent generation, if any happened yet.
    #[must_use]
    pub fn last_diagnostic(&self) -> Option<&DiagnosticRecord> {
        self.last_diagnostic.as_ref()
    }
}
