//! CLI configuration file support.
//!
//! Optional TOML file at `<config dir>/mirror/config.toml`. Values here sit
//! below CLI arguments and above built-in defaults; a missing or unreadable
//! file just means defaults.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// CLI configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Default provider (gemini, mock)
    #[serde(default)]
    pub provider: Option<String>,

    /// Default model ID
    #[serde(default)]
    pub model: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: Option<String>,

    /// Default maximum new tokens per response
    #[serde(default)]
    pub max_new_tokens: Option<u32>,

    /// Default sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Default nucleus sampling threshold
    #[serde(default)]
    pub top_p: Option<f32>,

    /// Directory for transcript logs
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Parses a configuration document.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Path of the config file (`<config dir>/mirror/config.toml`).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mirror").join("config.toml"))
}

/// Loads the config file, falling back to defaults when absent or invalid.
pub fn load_config() -> CliConfig {
    let Some(path) = config_path() else {
        return CliConfig::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        return CliConfig::default();
    };
    match CliConfig::parse(&content) {
        Ok(config) => config,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "ignoring invalid config file");
            CliConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::parse(
            r#"
            provider = "mock"
            model = "gemini-2.5-pro"
            log_level = "debug"
            max_new_tokens = 800
            temperature = 0.7
            top_p = 0.95
            log_dir = "/tmp/mirror-logs"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.as_deref(), Some("mock"));
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.max_new_tokens, Some(800));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/mirror-logs")));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config.provider, None);
        assert_eq!(config.max_new_tokens, None);
    }

    #[test]
    fn test_parse_invalid_config_errors() {
        assert!(CliConfig::parse("max_new_tokens = \"lots\"").is_err());
    }
}
