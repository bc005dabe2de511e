//! Integration tests for tree building determinism on a real filesystem

use super::test_utils::write_tree;
use foldermap::ignore::{IgnoreRules, PathFilter};
use foldermap::tree::{TreeBuilder, WalkerConfig};
use std::fs;
use tempfile::TempDir;

fn build(root: &std::path::Path) -> Vec<String> {
    TreeBuilder::new(root.to_path_buf(), PathFilter::default())
        .build()
        .unwrap()
        .lines
}

/// Same filesystem, same listing
#[test]
fn test_same_filesystem_same_listing() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &["src/lib.rs", "src/tree/mod.rs", "Cargo.toml", "docs/"],
    );

    let first = build(temp_dir.path());
    let second = build(temp_dir.path());
    assert_eq!(first, second);
}

/// Directories first, then case-insensitive name, regardless of creation order
#[test]
fn test_sibling_ordering() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["b.txt", "A/", "a.txt", "B/"]);

    assert_eq!(
        build(temp_dir.path()),
        vec![".", "├── A/", "├── B/", "├── a.txt", "└── b.txt"]
    );
}

#[test]
fn test_nested_connectors() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["src/main.rs", "src/util/io.rs", "README.md"]);

    assert_eq!(
        build(temp_dir.path()),
        vec![
            ".",
            "├── src/",
            "│   ├── util/",
            "│   │   └── io.rs",
            "│   └── main.rs",
            "└── README.md",
        ]
    );
}

#[test]
fn test_builtin_ignores() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[
            ".git/HEAD",
            ".DS_Store",
            "node_modules/pkg/index.js",
            "app/__pycache__/mod.pyc",
            "app/.DS_Store",
            "app/main.py",
        ],
    );

    assert_eq!(
        build(temp_dir.path()),
        vec![".", "└── app/", "    ├── .DS_Store", "    └── main.py"]
    );
}

#[test]
fn test_custom_rules() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["target/debug/app", "src/lib.rs", "scratch"]);

    let rules = IgnoreRules::default()
        .with_segments(["target"])
        .with_root_names(["scratch"]);
    let listing = TreeBuilder::new(temp_dir.path().to_path_buf(), PathFilter::new(rules))
        .build()
        .unwrap();

    assert_eq!(listing.lines, vec![".", "└── src/", "    └── lib.rs"]);
    assert_eq!(listing.directory_count, 1);
    assert_eq!(listing.file_count, 1);
}

#[test]
fn test_file_addition_changes_listing() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["one.txt"]);
    let before = build(temp_dir.path());

    fs::write(temp_dir.path().join("two.txt"), "").unwrap();
    let after = build(temp_dir.path());

    assert_ne!(before, after);
    assert_eq!(after.last().map(String::as_str), Some("└── two.txt"));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_not_followed_by_default() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["real/inner.txt"]);
    std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
        .unwrap();

    assert_eq!(
        build(temp_dir.path()),
        vec![".", "├── link/", "└── real/", "    └── inner.txt"]
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_terminates_when_following() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["loop/file.txt"]);
    std::os::unix::fs::symlink(
        temp_dir.path().join("loop"),
        temp_dir.path().join("loop").join("again"),
    )
    .unwrap();

    let listing = TreeBuilder::new(temp_dir.path().to_path_buf(), PathFilter::default())
        .with_walker_config(WalkerConfig {
            follow_symlinks: true,
        })
        .build()
        .unwrap();

    assert_eq!(
        listing.lines,
        vec![".", "└── loop/", "    ├── again/", "    └── file.txt"]
    );
}
