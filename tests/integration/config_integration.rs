//! Integration tests for the configuration file and its CLI overrides

use super::test_utils::{run_foldermap, stderr, stdout, write_tree};
use foldermap::config::{ConfigLoader, CONFIG_FILE_NAME};
use foldermap::metadata::Bump;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_file_sets_output_and_ignores() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["src/lib.rs", "target/debug/app"]);
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"
output = "FOLDERS.md"
bump = "minor"

[ignore]
segments = ["target"]
root_names = [".foldermap.toml"]
"#,
    )
    .unwrap();

    let output = run_foldermap(temp_dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0), "stderr={}", stderr(&output));
    assert!(stdout(&output).starts_with("Wrote folder map: FOLDERS.md\nmap_version=0.1.0\n"));

    let text = fs::read_to_string(temp_dir.path().join("FOLDERS.md")).unwrap();
    assert!(!text.contains("target/"));
    assert!(!text.contains(".foldermap.toml"));
    assert!(text.contains("└── src/\n    └── lib.rs\n"));
}

#[test]
fn test_cli_flags_override_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "output = \"FOLDERS.md\"\nbump = \"major\"\n",
    )
    .unwrap();

    let output = run_foldermap(temp_dir.path(), &["--output", "OTHER.md", "--bump", "patch"]);
    assert_eq!(output.status.code(), Some(0), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("map_version=0.0.1\n"));
    assert!(temp_dir.path().join("OTHER.md").is_file());
    assert!(!temp_dir.path().join("FOLDERS.md").exists());
}

#[test]
fn test_explicit_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let repo = temp_dir.path().join("repo");
    fs::create_dir(&repo).unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "output = \"custom/map.md\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    assert_eq!(config.output, PathBuf::from("custom/map.md"));
    assert_eq!(config.bump, Bump::Patch);

    let output = run_foldermap(&repo, &["--config", config_path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0), "stderr={}", stderr(&output));
    assert!(repo.join("custom/map.md").is_file());
}

#[test]
fn test_missing_explicit_config_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let output = run_foldermap(temp_dir.path(), &["--config", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!temp_dir.path().join("docs").exists());
}

#[test]
fn test_invalid_config_value_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "bump = \"huge\"\n").unwrap();

    let output = run_foldermap(temp_dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Configuration error"));
}
