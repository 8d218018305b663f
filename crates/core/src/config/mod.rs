//! Generator configuration.
//!
//! A config file is optional; every field has a default matching the
//! built-in AArch64 toolchain and catalog. Files are YAML (`.yaml`/`.yml`)
//! or JSON (anything else), chosen by extension.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::layout::default_root_markers;
use crate::toolchain::ToolchainConfig;

/// Serializable configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sub-directories that identify the project root.
    pub root_markers: Vec<String>,
    pub toolchain: ToolchainConfig,
    /// Optional function catalog file; the built-in catalog is used otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Optional pattern table file; the built-in AArch64 table is used otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_markers: default_root_markers(),
            toolchain: ToolchainConfig::default(),
            catalog: None,
            patterns: None,
        }
    }
}

impl GeneratorConfig {
    /// Resolve relative `catalog`/`patterns` paths against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.catalog = self.catalog.map(|p| if p.is_absolute() { p } else { base.join(p) });
        self.patterns = self.patterns.map(|p| if p.is_absolute() { p } else { base.join(p) });
        self
    }
}

/// Load a config file; relative paths inside it are resolved against its directory.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config: GeneratorConfig = parse_by_extension(path, &body)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
}

/// Serialize `config` to `path` in the format implied by its extension.
pub fn write_config(path: &Path, config: &GeneratorConfig) -> Result<()> {
    let body = if is_yaml(path) {
        serde_yaml::to_string(config).context("Failed to serialize config to YAML")?
    } else {
        serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?
    };
    fs::write(path, body).with_context(|| format!("Failed to write config {}", path.display()))
}

/// Deserialize `body` as YAML or JSON depending on the extension of `path`.
pub fn parse_by_extension<T: DeserializeOwned>(
    path: &Path,
    body: &str,
) -> std::result::Result<T, String> {
    if is_yaml(path) {
        serde_yaml::from_str(body).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(body).map_err(|e| e.to_string())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"))
}
