// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based engine configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Engine configuration: where templates live and where artifacts go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the base template catalog
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// Directory athlete artifacts are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("plans")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("athletes")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let config = Self {
            templates_dir: env::var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_templates_dir()),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level()),
        };
        info!(
            templates_dir = %config.templates_dir.display(),
            output_dir = %config.output_dir.display(),
            "loaded engine configuration from environment"
        );
        config
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check that the configured paths are usable before the pipeline runs
    pub fn validate(&self) -> Result<()> {
        if !self.templates_dir.is_dir() {
            anyhow::bail!(
                "templates directory {} does not exist",
                self.templates_dir.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from("plans"));
        assert_eq!(config.output_dir, PathBuf::from("athletes"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_toml_file_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "templates_dir = \"catalog\"\n").unwrap();
        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.templates_dir, PathBuf::from("catalog"));
        assert_eq!(config.output_dir, PathBuf::from("athletes"));
    }

    #[test]
    fn test_validate_requires_templates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            templates_dir: dir.path().join("missing"),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            templates_dir: dir.path().to_path_buf(),
            ..EngineConfig::default()
        };
        config.validate().unwrap();
    }
}
