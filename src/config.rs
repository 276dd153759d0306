use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fatigue::ClassifierConfig;
use crate::heatmap::DEFAULT_PALETTE_SIZE;
use crate::logging::LogConfig;

/// Configuration format version
const CONFIG_VERSION: &str = "1.0";

/// Main application configuration
///
/// The engine section carries the policy constants (readiness transform,
/// under-trained ratio). They are configuration in the sense of being
/// tunable, but the defaults are the behavioral contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Classification and readiness policy
    pub engine: ClassifierConfig,

    /// Display settings
    pub display: DisplaySettings,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Display settings for the CLI renderings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Body-map palette size (one slot reserved as background)
    pub palette_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: CONFIG_VERSION.to_string(),
                created_at: now,
                updated_at: now,
            },
            engine: ClassifierConfig::default(),
            display: DisplaySettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file location under the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("could not determine config directory")?;
        Ok(base.join("liftrs").join("config.toml"))
    }

    /// Load configuration from a file, or defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        Self::load(path)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory {}", parent.display()))?;
        }
        let mut config = self.clone();
        config.metadata.updated_at = Utc::now();
        let contents = toml::to_string_pretty(&config).context("failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Flat key/value listing for `config --list`
    pub fn entries(&self) -> Vec<(String, String)> {
        vec![
            ("metadata.version".to_string(), self.metadata.version.clone()),
            (
                "engine.readiness.ceiling".to_string(),
                self.engine.readiness.ceiling.to_string(),
            ),
            (
                "engine.readiness.rested_score".to_string(),
                self.engine.readiness.rested_score.to_string(),
            ),
            (
                "engine.readiness.slope".to_string(),
                self.engine.readiness.slope.to_string(),
            ),
            (
                "engine.under_trained_ratio".to_string(),
                self.engine.under_trained_ratio.to_string(),
            ),
            (
                "display.palette_size".to_string(),
                self.display.palette_size.to_string(),
            ),
            (
                "logging.level".to_string(),
                format!("{:?}", self.logging.level).to_lowercase(),
            ),
        ]
    }

    /// Look up one flattened key
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}
