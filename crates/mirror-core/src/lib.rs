//! Conversational core for Mirror.
//!
//! Owns the pieces between the model gateway and the host UI: the
//! response-extraction and classification layer, the mirror metaphor
//! transform, the per-conversation session state, and the best-effort
//! side channels (transcript logging, speech output, credential loading).

pub mod credentials;
pub mod extractor;
pub mod mirror;
pub mod session;
pub mod speech;
pub mod transcript;

pub use extractor::{DiagnosticRecord, ExtractionOutcome, extract, transport_failure_message};
pub use session::{
    ConversationSession, MONOLOGUE_PROMPT, MONOLOGUE_SUBJECT, MonologueState, Role,
    TranscriptEntry,
};
pub use speech::Speaker;
pub use transcript::TranscriptLog;
