//! Best-effort transcript logging.
//!
//! One append-only text file per process lifetime, named from the
//! process-start timestamp. Logging is a side channel, not part of the
//! conversational contract: creation and write failures degrade to a
//! disabled sink and are never surfaced to call sites.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// An append-only newline-delimited transcript sink.
#[derive(Debug)]
pub enum TranscriptLog {
    /// An open log file.
    Active {
        /// Where the records go.
        path: PathBuf,
        /// The open append handle.
        file: File,
    },
    /// Logging is off (by choice or because creation failed).
    Disabled,
}

impl TranscriptLog {
    /// Opens a session log under `dir`, named from the current time.
    ///
    /// Best-effort: on any filesystem failure this returns `Disabled` with
    /// a warning instead of erroring.
    #[must_use]
    pub fn create(dir: &Path) -> Self {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("session_{timestamp}.txt"));

        if let Err(error) = fs::create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %error, "transcript log disabled");
            return Self::Disabled;
        }

        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Self::Active { path, file },
            Err(error) => {
                warn!(path = %path.display(), error = %error, "transcript log disabled");
                Self::Disabled
            }
        }
    }

    /// A sink that drops everything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::Disabled
    }

    /// True when records actually reach a file.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// The log file path, when active.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Active { path, .. } => Some(path),
            Self::Disabled => None,
        }
    }

    /// Records one user/assistant exchange.
    pub fn log_exchange(&mut self, user: &str, assistant: &str) {
        self.write_record(&format!("USER: {user}\nASSISTANT: {assistant}\n"));
    }

    /// Records one self-generated monologue turn.
    pub fn log_monologue(&mut self, assistant: &str) {
        self.write_record(&format!("ASSISTANT(MONO): {assistant}\n"));
    }

    fn write_record(&mut self, record: &str) {
        if let Self::Active { path, file } = self {
            let result = file.write_all(record.as_bytes()).and_then(|()| file.flush());
            if let Err(error) = result {
                // Best-effort sink: swallow and keep the conversation going.
                warn!(path = %path.display(), error = %error, "transcript write failed");
            }
        }
    }
}
