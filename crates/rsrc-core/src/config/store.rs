//! Config store for loading and saving rsrc.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{ResolverConfig, parser};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RSRC_CONFIG";

const CONFIG_FILE_NAME: &str = "rsrc.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Locate the config file: `$RSRC_CONFIG`, else `<config dir>/rsrc/rsrc.toml`.
    pub fn discover() -> anyhow::Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(Self::from_path(PathBuf::from(path)));
        }

        let global_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("rsrc");

        Ok(Self::in_dir(&global_dir))
    }

    /// Use an explicit config file.
    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Use `rsrc.toml` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::from_path(dir.join(CONFIG_FILE_NAME))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> anyhow::Result<ResolverConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                path = %self.config_path.display(),
                "config file not found, using defaults"
            );
            return Ok(ResolverConfig::default());
        }
        parser::parse_config(&self.config_path)
    }

    pub fn save(&self, config: &ResolverConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
