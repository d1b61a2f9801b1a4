// File: src/config.rs
// Purpose: Configuration parsing from waymark.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use waymark_router::RouterOptions;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub router: RouterOptions,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Shell metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document title of every page (default: "Waymark Demo")
    #[serde(default = "default_title")]
    pub title: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    /// Render the not-found page inside the root layout (default: false)
    #[serde(default)]
    pub fallback_in_root: bool,
}

// Default values
fn default_title() -> String {
    "Waymark Demo".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from a path the user named; the file must exist
    pub fn load_required(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        Self::load(path)
    }

    /// Load configuration from default path (./waymark.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("waymark.toml")
    }
}
