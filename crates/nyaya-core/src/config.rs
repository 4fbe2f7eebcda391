use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{NyayaError, Result};

/// Top-level configuration for the Nyaya application.
///
/// Loaded from `~/.nyaya/config.toml` by default. Each section corresponds
/// to a subsystem or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NyayaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl NyayaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NyayaConfig = toml::from_str(&content)?;
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
            toml::to_string_pretty(self).map_err(|e| NyayaError::Config(e.to_string()))?;
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

/// Conversational session engine settings.
///
/// The timing constants are configuration, not per-call parameters the end
/// user controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Simulated "thinking time" before the response is generated, in
    /// milliseconds.
    pub thinking_delay_ms: u64,
    /// Time between reveal steps (one character each), in milliseconds.
    pub reveal_interval_ms: u64,
    /// Pause between appending an assistant turn and its first reveal
    /// step, in milliseconds.
    pub reveal_start_delay_ms: u64,
    /// Starter queries offered before the first submission.
    pub suggestions: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 1500,
            reveal_interval_ms: 10,
            reveal_start_delay_ms: 0,
            suggestions: default_suggestions(),
        }
    }
}

/// The fixed starter-query list shown on an empty session.
pub fn default_suggestions() -> Vec<String> {
    vec![
        "How to file a consumer complaint?".to_string(),
        "What are my rights as a tenant?".to_string(),
        "How to get a divorce in India?".to_string(),
        "Property dispute resolution options".to_string(),
    ]
}
