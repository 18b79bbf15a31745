//! Optional speech output.
//!
//! Vocalization is a fire-and-forget side channel: playback is handed to a
//! system TTS command and never awaited, so it may outlive the turn that
//! started it. When no TTS command exists on this machine the speaker is
//! `Unavailable` and `speak` is a no-op.

use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// TTS commands probed in order.
const TTS_CANDIDATES: &[&str] = &["say", "espeak-ng", "espeak"];

/// A best-effort text-to-speech sink.
#[derive(Debug)]
pub enum Speaker {
    /// A system TTS command found on PATH.
    Command {
        /// Resolved program path.
        program: PathBuf,
    },
    /// No TTS capability on this host.
    Unavailable,
}

impl Speaker {
    /// Probes PATH for a known TTS command.
    #[must_use]
    pub fn detect() -> Self {
        for candidate in TTS_CANDIDATES {
            if let Some(program) = find_in_path(candidate) {
                debug!(program = %program.display(), "speech output available");
                return Self::Command { program };
            }
        }
        Self::Unavailable
    }

    /// A speaker that never speaks.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self::Unavailable
    }

    /// True when `speak` will actually start playback.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Command { .. })
    }

    /// Starts vocalizing `text` without waiting for playback to finish.
    ///
    /// Empty and whitespace-only text is skipped. Spawn failures are
    /// swallowed: speech has no effect on the transcript either way.
    pub fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let Self::Command { program } = self else { return };

        let spawned = Command::new(program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            // Playback runs detached; the child is not awaited.
            Ok(_child) => {}
            Err(error) => debug!(error = %error, "speech output failed"),
        }
    }
}

fn find_in_path(program: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var).map(|dir| dir.join(program)).find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_speaker_is_a_noop() {
        let speaker = Speaker::unavailable();
        assert!(!speaker.is_available());
        speaker.speak("이 문장은 어디에도 가지 않는다");
    }

    #[test]
    fn test_empty_text_is_skipped() {
        // Even with a bogus program, empty text never attempts a spawn.
        let speaker = Speaker::Command { program: PathBuf::from("/nonexistent/tts") };
        speaker.speak("");
        speaker.speak("   ");
    }

    #[test]
    fn test_spawn_failure_is_swallowed() {
        let speaker = Speaker::Command { program: PathBuf::from("/nonexistent/tts") };
        assert!(speaker.is_available());
        speaker.speak("음성");
    }

    #[test]
    fn test_find_in_path_misses_unknown_program() {
        assert_eq!(find_in_path("definitely-not-a-real-tts-binary"), None);
    }
}
