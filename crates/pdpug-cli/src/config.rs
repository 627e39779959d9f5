// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! PDpug project configuration.
//!
//! Configuration is loaded from `pdpug.toml` at the project root. Every
//! section and key is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! name = "recetas"
//!
//! [render]
//! templates_dir = "views"
//! output_dir = "dist"
//! data = "data/site.json"
//! extension = "pdpug"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE: &str = "pdpug.toml";

/// Main configuration structure loaded from `pdpug.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Rendering and build settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// Project metadata configuration.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project name (default: "unnamed").
    #[serde(default = "default_name")]
    pub name: String,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Directory scanned by `build` (default: "views").
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    /// Directory `build` writes HTML into (default: "dist").
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// JSON file providing template data.
    #[serde(default)]
    pub data: Option<String>,
    /// Template file extension, without the dot (default: "pdpug").
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_templates_dir() -> String {
    "views".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_extension() -> String {
    "pdpug".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            data: None,
            extension: default_extension(),
        }
    }
}

impl Config {
    /// Loads configuration from `pdpug.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Loads configuration from `pdpug.toml` in `root`.
    pub fn load_from(root: &Path) -> anyhow::Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
        tracing::debug!("Loaded configuration for project '{}'", config.project.name);
        Ok(config)
    }

    /// Data file to use: the command-line flag wins over `render.data`.
    pub fn data_file(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.render.data.as_ref().map(PathBuf::from))
    }
}
