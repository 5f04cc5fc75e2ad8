// Integration tests for the geomanifest binary
// Each test runs the built executable inside its own temp working directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in(dir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_geomanifest"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()?)
}

fn write_layers(dir: &Path, files: &[&str]) -> Result<()> {
    fs::create_dir_all(dir)?;
    for name in files {
        fs::write(dir.join(name), "{}")?;
    }
    Ok(())
}

#[test]
fn test_missing_data_folder_exits_nonzero() -> Result<()> {
    let temp = TempDir::new()?;

    let output = run_in(temp.path(), &[])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Folder 'Data' not found"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
    assert!(!temp.path().join("manifest.json").exists());

    Ok(())
}

#[test]
fn test_default_run_writes_manifest_and_one_line() -> Result<()> {
    let temp = TempDir::new()?;
    write_layers(
        &temp.path().join("Data"),
        &["Roads_main.geojson", "Roads_secondary.geojson", "Parks.geojson"],
    )?;

    let output = run_in(temp.path(), &[])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout, "✓ Wrote manifest.json with 3 layers in 2 groups\n");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("manifest.json"))?)?;
    assert_eq!(
        written,
        serde_json::json!({
            "Other": ["Parks.geojson"],
            "Roads": ["Roads_main.geojson", "Roads_secondary.geojson"]
        })
    );

    Ok(())
}

#[test]
fn test_config_file_in_working_dir_is_used() -> Result<()> {
    let temp = TempDir::new()?;
    write_layers(&temp.path().join("layers"), &["Health_Clinics.geojson"])?;
    fs::write(temp.path().join("geomanifest.toml"), "root = \"layers\"\n")?;

    let output = run_in(temp.path(), &[])?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "✓ Wrote manifest.json with 1 layers in 1 groups\n"
    );
    assert!(fs::read_to_string(temp.path().join("manifest.json"))?.contains("Health_Clinics.geojson"));

    Ok(())
}

#[test]
fn test_root_flag_overrides_config_file() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("geomanifest.toml"), "root = \"Nope\"\n")?;

    let output = run_in(temp.path(), &[])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Nope"));

    write_layers(&temp.path().join("Data"), &["Parks.geojson"])?;
    let output = run_in(temp.path(), &["--root", "Data"])?;
    assert!(output.status.success());

    Ok(())
}

#[test]
fn test_check_mode_exit_status() -> Result<()> {
    let temp = TempDir::new()?;
    write_layers(&temp.path().join("Data"), &["Roads_main.geojson"])?;

    assert!(!run_in(temp.path(), &["--check"])?.status.success());
    assert!(!temp.path().join("manifest.json").exists());

    assert!(run_in(temp.path(), &[])?.status.success());
    assert!(run_in(temp.path(), &["--check"])?.status.success());

    Ok(())
}

#[test]
fn test_stdout_mode_prints_manifest_only() -> Result<()> {
    let temp = TempDir::new()?;
    write_layers(&temp.path().join("Data"), &["Parks.geojson"])?;

    let output = run_in(temp.path(), &["--stdout"])?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "{\n  \"Other\": [\n    \"Parks.geojson\"\n  ]\n}\n"
    );
    assert!(!temp.path().join("manifest.json").exists());

    Ok(())
}

#[test]
fn test_conflicting_modes_rejected() -> Result<()> {
    let temp = TempDir::new()?;
    write_layers(&temp.path().join("Data"), &["Parks.geojson"])?;

    for args in [
        &["--check", "--stdout"][..],
        &["--list", "--check"][..],
        &["--list", "--stdout"][..],
    ] {
        let output = run_in(temp.path(), args)?;
        assert!(!output.status.success(), "args {:?} should be rejected", args);
    }
    assert!(!temp.path().join("manifest.json").exists());

    Ok(())
}
