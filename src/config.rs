//! Application configuration.
//!
//! Settings are stored as TOML in the platform configuration directory and
//! fall back to defaults when no file exists. Only output preferences live
//! here; job content always comes from the job file itself.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Dialect used when none is given on the command line
    pub default_dialect: String,
    /// Write one program file per operation instead of a single program
    pub split_per_operation: bool,
    /// Append a tool-change block after each operation in split output
    pub tool_change_blocks: bool,
    /// Directory generated programs are written to; the job file's
    /// directory when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_dialect: "din".to_string(),
            split_per_operation: false,
            tool_change_blocks: false,
            output_dir: None,
        }
    }
}

/// Application configuration root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSettings,
}

impl Config {
    /// Platform path of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("millpost").join("config.toml"))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Load the platform configuration, falling back to defaults when no
    /// file exists yet.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable config: {e:#}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Validate configured values
    pub fn validate(&self) -> Result<()> {
        if !millpost_post::available().contains(&self.output.default_dialect.as_str()) {
            anyhow::bail!(
                "unknown default dialect '{}' (available: {})",
                self.output.default_dialect,
                millpost_post::available().join(", ")
            );
        }
        Ok(())
    }
}
