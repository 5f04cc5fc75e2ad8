//! Configuration management for geomanifest
//!
//! Settings are resolved from built-in defaults, then an optional
//! `geomanifest.toml`, then command-line overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::DEFAULT_FALLBACK_GROUP;
use crate::scan::ManifestError;

/// Config file picked up from the working directory when present
pub const CONFIG_FILE: &str = "geomanifest.toml";

pub const DEFAULT_ROOT: &str = "Data";
pub const DEFAULT_OUTPUT: &str = "manifest.json";
pub const DEFAULT_EXTENSION: &str = ".geojson";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the layer files
    pub root: PathBuf,
    /// Where the manifest is written
    pub output: PathBuf,
    /// Tracked extension, always starting with `.`
    pub extension: String,
    /// Group for files without an underscore
    pub fallback_group: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extension: DEFAULT_EXTENSION.to_string(),
            fallback_group: DEFAULT_FALLBACK_GROUP.to_string(),
        }
    }
}

/// Partial settings, as read from a TOML file or the command line
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extension: Option<String>,
    pub fallback_group: Option<String>,
}

impl Config {
    /// Apply overrides on top of the current values
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(root) = overrides.root {
            self.root = root;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(extension) = overrides.extension {
            self.extension = extension;
        }
        if let Some(group) = overrides.fallback_group {
            self.fallback_group = group;
        }
        self
    }

    /// Normalize the extension and reject empty values
    pub fn validate(mut self) -> Result<Self, ManifestError> {
        let ext = self.extension.trim();
        if ext.is_empty() || ext == "." {
            return Err(ManifestError::InvalidConfig(
                "extension must not be empty".to_string(),
            ));
        }
        self.extension = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{}", ext)
        };

        if self.fallback_group.is_empty() {
            return Err(ManifestError::InvalidConfig(
                "fallback_group must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Read overrides from a TOML file
pub fn load_file(path: &Path) -> Result<ConfigOverrides> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the configuration for a run.
///
/// An explicit `config_path` must exist. Without one, `geomanifest.toml` in
/// the working directory is used if it is there.
pub fn resolve(config_path: Option<&Path>, cli: ConfigOverrides) -> Result<Config> {
    let file = match config_path {
        Some(path) => Some(load_file(path)?),
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.is_file() {
                Some(load_file(default_path)?)
            } else {
                None
            }
        }
    };

    let mut config = Config::default();
    if let Some(file) = file {
        debug!(?file, "Loaded config file");
        config = config.merge(file);
    }
    let config = config.merge(cli).validate()?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}
