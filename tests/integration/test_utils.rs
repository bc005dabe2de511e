//! Shared test utilities for integration tests
//!
//! Fixture trees and a runner for the `foldermap` binary with a clean
//! environment, so a developer's `FOLDERMAP__*` variables cannot leak in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// Create files and directories under `root`. Entries ending in `/` are
/// directories; everything else is an empty file with parents created.
pub fn write_tree(root: &Path, entries: &[&str]) {
    for entry in entries {
        if let Some(dir) = entry.strip_suffix('/') {
            fs::create_dir_all(root.join(dir)).unwrap();
        } else {
            let path = root.join(entry);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, "").unwrap();
        }
    }
}

/// Run the binary against `root` with extra arguments.
pub fn run_foldermap(root: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_foldermap");
    let mut command = Command::new(bin);
    for (key, _) in std::env::vars() {
        if key.starts_with("FOLDERMAP") {
            command.env_remove(key);
        }
    }
    command
        .arg("--repo-root")
        .arg(root)
        .args(args)
        .output()
        .unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
