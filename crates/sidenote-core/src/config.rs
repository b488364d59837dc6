//! Configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    target::Target,
};

/// Main configuration structure for Sidenote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Rendering settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Keyword index settings.
    #[serde(default)]
    pub index: IndexConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default = "default_site_title")]
    pub title: String,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output target used when none is given on the command line.
    #[serde(default)]
    pub target: Target,

    /// Whether to apply smart quotes and dashes to prose.
    #[serde(default = "default_true")]
    pub smart_typography: bool,
}

/// Keyword index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Heading of the rendered index page.
    #[serde(default = "default_index_title")]
    pub title: String,
}

fn default_site_title() -> String {
    "Sidenote".to_string()
}

fn default_index_title() -> String {
    "Index".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            author: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            smart_typography: true,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title: default_index_title(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration layered with `SIDENOTE__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("SIDENOTE").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.index.title.trim().is_empty() {
            tracing::warn!("index.title is empty; the index page will have no heading");
        }

        Ok(())
    }
}
