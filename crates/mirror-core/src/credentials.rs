//! API key loading.
//!
//! One string secret, read once at process start: the environment variable
//! first, then the host secrets file. Absence is a fatal startup condition
//! and the error names both checked sources.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable checked first for the API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Errors that can occur while loading credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Neither source held a key.
    #[error(
        "API key not found: set the {env_var} environment variable, or put {env_var} = \"...\" in {secrets_file}"
    )]
    Missing {
        /// The environment variable that was checked.
        env_var: String,
        /// The secrets file that was checked.
        secrets_file: String,
    },
}

/// Path of the host secrets file (`<config dir>/mirror/secrets.toml`).
#[must_use]
pub fn secrets_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mirror").join("secrets.toml"))
}

/// Loads the API key from the environment or the host secrets file.
///
/// # Errors
/// Returns `CredentialError::Missing` naming both checked sources when
/// neither holds a non-empty key.
pub fn load_api_key() -> Result<String, CredentialError> {
    let secrets = secrets_path();
    load_api_key_from(env::var(API_KEY_ENV).ok(), secrets.as_deref())
}

/// Source-injectable variant of [`load_api_key`], used directly by tests.
pub fn load_api_key_from(
    env_value: Option<String>,
    secrets_file: Option<&Path>,
) -> Result<String, CredentialError> {
    if let Some(value) = env_value {
        let value = value.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }

    if let Some(path) = secrets_file {
        if let Some(key) = read_secrets_key(path) {
            return Ok(key);
        }
    }

    Err(CredentialError::Missing {
        env_var: API_KEY_ENV.to_string(),
        secrets_file: secrets_file
            .map_or_else(|| "the host secrets store".to_string(), |p| p.display().to_string()),
    })
}

/// Reads the key out of a TOML secrets file. Any read or parse failure is
/// treated as "no key here".
fn read_secrets_key(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let table: toml::Table = content.parse().ok()?;
    let key = table.get(API_KEY_ENV)?.as_str()?.trim().to_string();
    (!key.is_empty()).then_some(key)
}

/// Masks a key for display: first six and last four characters, or
/// `(none)` when the key is too short to mask meaningfully.
#[must_use]
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 10 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "(none)".to_string()
    }
}
