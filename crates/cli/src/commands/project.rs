use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use instcount_core::config::{load_config, write_config, GeneratorConfig};
use instcount_core::layout::find_project_root;

use crate::canonicalize_or_current;

/// Load `path` if given, otherwise the default configuration.
pub fn load_generator_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Resolve the project root from `start` (or the current directory).
pub fn resolve_root(start: Option<&str>, config: &GeneratorConfig) -> Result<PathBuf> {
    let start = canonicalize_or_current(start.unwrap_or("."))?;
    find_project_root(&start, &config.root_markers)
        .with_context(|| format!("Failed to locate project root from {}", start.display()))
}

pub fn find_root_command(start: Option<&str>, config: Option<&Path>) -> Result<()> {
    let config = load_generator_config(config)?;
    let root = resolve_root(start, &config)?;
    println!("{}", root.display());
    Ok(())
}

/// Write the default configuration to `path` (YAML or JSON by extension).
pub fn init_config_command(path: &str, force: bool) -> Result<()> {
    let path = canonicalize_or_current(path)?;
    if path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
    }
    write_config(&path, &GeneratorConfig::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
