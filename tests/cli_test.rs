//! End-to-end tests for the xcstrings-tool binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

/// The binary, run from an empty directory so no config file is picked up.
fn command(dir: &tempfile::TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("xcstrings-tool")?;
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    Ok(cmd)
}

#[test]
fn audit_prints_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("audit")
        .arg(fixture("simple.xcstrings"))
        .args(["--target", "es-MX", "--output-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary Statistics"))
        .stdout(predicate::str::contains("100.0%"));
    Ok(())
}

#[test]
fn audit_writes_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("audit")
        .arg(fixture("simple.xcstrings"))
        .args(["--format", "json", "--output-dir"])
        .arg(dir.path())
        .assert()
        .success();

    let json = std::fs::read_to_string(dir.path().join("localization_report.json"))?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["target_language"], "es-MX");
    assert_eq!(value["translated"], 2);
    Ok(())
}

#[test]
fn audit_writes_multiple_formats() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("reports");
    command(&dir)?
        .arg("audit")
        .arg(fixture("simple.xcstrings"))
        .args(["-f", "json", "-f", "csv", "-f", "markdown", "-o"])
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("localization_report.json").exists());
    assert!(out.join("localization_report.csv").exists());
    assert!(out.join("localization_report.md").exists());
    Ok(())
}

#[test]
fn audit_threshold_pass() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("audit")
        .arg(fixture("simple.xcstrings"))
        .args(["--threshold", "90"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("meets threshold"));
    Ok(())
}

#[test]
fn audit_threshold_fail() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("audit")
        .arg(fixture("missing_translations.xcstrings"))
        .args(["--threshold", "90"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("below threshold"));
    Ok(())
}

#[test]
fn audit_rejects_bad_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("audit")
        .arg(fixture("simple.xcstrings"))
        .args(["--format", "xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid format"));

    command(&dir)?
        .arg("audit")
        .arg(fixture("simple.xcstrings"))
        .args(["--threshold", "150"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid threshold"));

    command(&dir)?
        .arg("audit")
        .arg(fixture("invalid.xcstrings"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid catalog format"));
    Ok(())
}

#[test]
fn audit_uses_config_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("xcstrings-tool.yaml"),
        "target_language: de\nthreshold: 50\nformats: [markdown]\noutput_dir: out\n",
    )?;

    // 33.3% for "de" is below the configured 50%
    command(&dir)?
        .arg("audit")
        .arg(fixture("mixed_states.xcstrings"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("de"))
        .stdout(predicate::str::contains("below threshold"));
    assert!(dir.path().join("out").join("localization_report.md").exists());

    // Flags win over the config
    command(&dir)?
        .arg("audit")
        .arg(fixture("mixed_states.xcstrings"))
        .args(["--threshold", "30"])
        .assert()
        .code(0);
    Ok(())
}

#[test]
fn validate_valid_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("validate")
        .arg(fixture("simple.xcstrings"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("is valid"));
    Ok(())
}

#[test]
fn validate_invalid_catalog() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("validate")
        .arg(fixture("invalid.xcstrings"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is invalid"));
    Ok(())
}

#[test]
fn export_writes_csv() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output = dir.path().join("export.csv");
    command(&dir)?
        .arg("export")
        .arg(fixture("missing_translations.xcstrings"))
        .args(["--target", "es-MX", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let content = std::fs::read_to_string(&output)?;
    assert!(content.contains("settings,missing_translation"));
    assert!(content.contains("logout,missing_translation"));
    assert!(!content.contains("welcome"));
    Ok(())
}

#[test]
fn stats_lists_languages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("stats")
        .arg(fixture("mixed_states.xcstrings"))
        .assert()
        .success()
        .stdout(predicate::str::contains("String Catalog Statistics"))
        .stdout(predicate::str::contains("Source Language"))
        .stdout(predicate::str::contains("Total Strings"))
        .stdout(predicate::str::contains("es-MX"));
    Ok(())
}

#[test]
fn init_writes_config_once() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created xcstrings-tool.yaml"));
    assert!(dir.path().join("xcstrings-tool.yaml").exists());

    command(&dir)?
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
    Ok(())
}

#[test]
fn version_flag() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    command(&dir)?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
    Ok(())
}
