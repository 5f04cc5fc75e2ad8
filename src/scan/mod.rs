//! Directory scanning for layer files
//!
//! Lists the direct children of the root directory and keeps the regular
//! files whose name ends with the tracked extension. Nothing is recursed
//! into and file contents are never opened.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::has_extension;

/// Errors raised by the manifest builder
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Folder '{}' not found. Create it and add your {} files.", .root.display(), .extension)]
    RootNotFound { root: PathBuf, extension: String },

    #[error("'{}' is not a directory", .root.display())]
    NotADirectory { root: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{} is out of date. Re-run geomanifest to regenerate it.", .output.display())]
    Stale { output: PathBuf },
}

/// Fail unless `root` exists and is a directory
pub fn ensure_root(root: &Path, extension: &str) -> Result<(), ManifestError> {
    if !root.exists() {
        return Err(ManifestError::RootNotFound {
            root: root.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    if !root.is_dir() {
        return Err(ManifestError::NotADirectory {
            root: root.to_path_buf(),
        });
    }
    Ok(())
}

/// List the names of all layer files directly under `root`.
///
/// The order of the returned names is whatever the filesystem yields.
pub fn list_entries(root: &Path, extension: &str) -> Result<Vec<String>> {
    ensure_root(root, extension)?;

    let mut entries = Vec::new();
    let dir = fs::read_dir(root)
        .with_context(|| format!("Failed to read directory {}", root.display()))?;

    for entry in dir {
        let entry = entry
            .with_context(|| format!("Failed to read entry in {}", root.display()))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };

        if !has_extension(&name, extension) {
            continue;
        }
        // is_file follows symlinks
        if !path.is_file() {
            debug!(name = %name, "Skipping non-file entry");
            continue;
        }

        debug!(name = %name, "Found layer");
        entries.push(name);
    }

    Ok(entries)
}
