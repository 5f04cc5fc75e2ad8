//! CLI commands for geomanifest

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{display_name, Manifest};
use crate::scan::{list_entries, ManifestError};

/// What to do with the built manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write the manifest file (default)
    #[default]
    Write,
    /// Compare against the existing manifest file without writing
    Check,
    /// Print the manifest to stdout without writing
    Stdout,
}

/// Scan the root directory and group its layers
pub fn build_manifest(config: &Config) -> Result<Manifest> {
    let entries = list_entries(&config.root, &config.extension)?;
    debug!(count = entries.len(), root = %config.root.display(), "Listed layers");
    Ok(Manifest::from_entries(entries, &config.fallback_group))
}

/// Exact bytes written to the manifest file
pub fn render(manifest: &Manifest) -> Result<String> {
    manifest.to_json().context("Failed to serialize manifest")
}

/// Build the manifest and overwrite the output file with it
pub fn generate(config: &Config) -> Result<Manifest> {
    let manifest = build_manifest(config)?;
    let json = render(&manifest)?;
    fs::write(&config.output, json)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    info!(
        output = %config.output.display(),
        layers = manifest.layer_count(),
        groups = manifest.group_count(),
        "Wrote manifest"
    );
    Ok(manifest)
}

/// Verify that the output file matches what `generate` would write
pub fn check(config: &Config) -> Result<Manifest> {
    let manifest = build_manifest(config)?;
    let expected = render(&manifest)?;

    let current = match fs::read_to_string(&config.output) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", config.output.display()))
        }
    };

    if current.as_deref() != Some(expected.as_str()) {
        return Err(ManifestError::Stale {
            output: config.output.clone(),
        }
        .into());
    }
    Ok(manifest)
}

/// Build the manifest and write it to `out` instead of the output file
pub fn print<W: Write>(config: &Config, out: &mut W) -> Result<Manifest> {
    let manifest = build_manifest(config)?;
    let json = render(&manifest)?;
    writeln!(out, "{}", json)?;
    Ok(manifest)
}

/// One-line report printed after a successful write
pub fn summary_line(output: &Path, manifest: &Manifest) -> String {
    format!(
        "✓ Wrote {} with {} layers in {} groups",
        output.display(),
        manifest.layer_count(),
        manifest.group_count()
    )
}

/// Groups and the display names of their layers
pub fn layer_listing(manifest: &Manifest, extension: &str) -> String {
    let mut out = String::new();
    for group in manifest.groups() {
        out.push_str(&format!("{} ({})\n", group.key, group.files.len()));
        for file in &group.files {
            out.push_str(&format!("  {:<30} {}\n", display_name(file, extension), file));
        }
    }
    out
}

/// Run the builder in the given mode, printing results to stdout
pub fn run(config: &Config, mode: Mode, list: bool) -> Result<()> {
    match mode {
        Mode::Write => {
            let manifest = generate(config)?;
            println!("{}", summary_line(&config.output, &manifest));
            if list {
                print!("{}", layer_listing(&manifest, &config.extension));
            }
        }
        Mode::Check => {
            let manifest = check(config)?;
            println!(
                "✓ {} is up to date ({} layers in {} groups)",
                config.output.display(),
                manifest.layer_count(),
                manifest.group_count()
            );
        }
        Mode::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            print(config, &mut handle)?;
        }
    }
    Ok(())
}
