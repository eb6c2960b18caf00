//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reasoning model settings, passed through to the service constructor
    pub llm: ModelSettings,

    /// Outer iterations allowed before the host aborts the run
    #[serde(rename = "max-loops")]
    pub max_loops: u32,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `.autoagent.yml` in the working directory, then
    /// `~/.config/autoagent/autoagent.yml`, then built-in defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".autoagent.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => warn!("Failed to load config from {}: {}", local_config.display(), e),
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("autoagent").join("autoagent.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => warn!("Failed to load config from {}: {}", user_config.display(), e),
                }
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Reasoning model settings
///
/// Opaque to the loop engine: the engine hands these to the reasoning-service
/// constructor unmodified and never inspects them. Validation belongs to the
/// service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// API key; takes precedence over the environment variable
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            temperature: 0.9,
            max_tokens: 500,
            timeout_ms: 120_000,
        }
    }
}

impl ModelSettings {
    /// Resolve the API key from settings or the named environment variable
    pub fn resolve_api_key(&self) -> Result<String, String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.api_key_env)
            .map_err(|_| format!("API key not found. Set the {} environment variable.", self.api_key_env))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: ModelSettings::default(),
            max_loops: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.max_loops, 5);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  model: gpt-4o\n  temperature: 0.2\nmax-loops: 10"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.max_loops, 10);
        // Unspecified fields keep their defaults
        assert_eq!(config.llm.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let path = PathBuf::from("/nonexistent/autoagent.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_resolve_api_key_prefers_inline_key() {
        let settings = ModelSettings {
            api_key: Some("sk-test".to_string()),
            api_key_env: "AUTOAGENT_TEST_KEY_UNSET".to_string(),
            ..ModelSettings::default()
        };
        assert_eq!(settings.resolve_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_resolve_api_key_missing_everywhere() {
        let settings = ModelSettings {
            api_key: None,
            api_key_env: "AUTOAGENT_TEST_KEY_UNSET".to_string(),
            ..ModelSettings::default()
        };
        let err = settings.resolve_api_key().unwrap_err();
        assert!(err.contains("AUTOAGENT_TEST_KEY_UNSET"));
    }
}
