use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{KoseiError, Result};
use crate::types::CorrectionSettings;

/// Top-level configuration for the Kosei application.
///
/// Loaded from `~/.kosei/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern. The `[correction]` section
/// doubles as the persisted user settings and is written back on exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KoseiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub correction: CorrectionSettings,
}

impl Default for KoseiConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            llm: LlmConfig::default(),
            reference: ReferenceConfig::default(),
            correction: CorrectionSettings::default(),
        }
    }
}

impl KoseiConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: KoseiConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KoseiError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Chat-completion backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent in the request body.
    pub model: String,
    /// Chat-completion endpoint URL.
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Value for the `HTTP-Referer` attribution header.
    pub referer: String,
    /// Value for the `X-Title` attribution header.
    pub title: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "openai/gpt-5".to_string(),
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            temperature: 0.5,
            timeout_secs: 30,
            referer: "https://github.com/kosei-app/kosei".to_string(),
            title: "kosei".to_string(),
        }
    }
}

/// Reference library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Folder scanned for `.txt` reference files.
    pub folder: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            folder: "reference".to_string(),
        }
    }
}
