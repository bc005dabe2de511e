//! Integration tests for generate/check round trips through the workspace service

use super::test_utils::write_tree;
use foldermap::drift::DriftReport;
use foldermap::ignore::IgnoreRules;
use foldermap::metadata::{Bump, MapVersion};
use foldermap::tree::WalkerConfig;
use foldermap::workspace::{GenerateRequest, MapWorkspace, WorkspaceOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn open(root: &Path) -> MapWorkspace {
    MapWorkspace::open(
        root,
        WorkspaceOptions {
            output: PathBuf::from("docs/repo_folder_map.md"),
            rules: IgnoreRules::default(),
            walker: WalkerConfig::default(),
        },
    )
    .unwrap()
}

fn generate(ws: &MapWorkspace, bump: Bump, summary: Option<&str>) {
    ws.generate(&GenerateRequest {
        bump,
        summary: summary.map(str::to_string),
    })
    .unwrap();
}

#[test]
fn test_missing_map_reports_missing() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["src/lib.rs"]);

    let outcome = open(temp_dir.path()).check(None).unwrap();
    assert_eq!(outcome.report, DriftReport::Missing);
    assert_eq!(outcome.output, "docs/repo_folder_map.md");
}

#[test]
fn test_generate_then_check_is_up_to_date() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["src/lib.rs", "Cargo.toml"]);
    let ws = open(temp_dir.path());

    generate(&ws, Bump::Patch, Some("Initial map"));
    assert!(ws.check(None).unwrap().report.is_up_to_date());
}

#[test]
fn test_added_file_reports_drift_with_plus_line() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["src/lib.rs"]);
    let ws = open(temp_dir.path());
    generate(&ws, Bump::Patch, None);

    fs::write(temp_dir.path().join("src/new.rs"), "").unwrap();

    let DriftReport::Differs { diff } = ws.check(None).unwrap().report else {
        panic!("expected drift after adding a file");
    };
    assert!(diff.contains("docs/repo_folder_map.md (current)"));
    assert!(diff.contains("docs/repo_folder_map.md (expected)"));
    assert!(diff.contains("+    └── new.rs\n"));
    assert!(diff.contains("-- files: 1\n"));
    assert!(diff.contains("+- files: 2\n"));
}

#[test]
fn test_empty_root_renders_marker_only() {
    let temp_dir = TempDir::new().unwrap();
    let ws = MapWorkspace::open(
        temp_dir.path(),
        WorkspaceOptions {
            output: PathBuf::from("MAP.md"),
            rules: IgnoreRules::default(),
            walker: WalkerConfig::default(),
        },
    )
    .unwrap();
    generate(&ws, Bump::Patch, None);

    let text = fs::read_to_string(temp_dir.path().join("MAP.md")).unwrap();
    assert!(text.contains("- directories: 0\n- files: 0\n"));
    assert!(text.ends_with("```text\n.\n```\n"));
}

#[test]
fn test_document_layout() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["b.txt", "A/", "a.txt", "B/"]);
    let ws = open(temp_dir.path());
    generate(&ws, Bump::Minor, Some("Layout"));

    let text = fs::read_to_string(ws.output_path()).unwrap();
    let expected = "\
# Repository Folder Map

Generated file. Do not edit manually.

## Metadata
- map_version: 0.1.0
- bump: minor
- summary: Layout
- directories: 3
- files: 2

## Tree
```text
.
├── A/
├── B/
├── docs/
├── a.txt
└── b.txt
```
";
    assert_eq!(text, expected);
}

#[test]
fn test_version_sequence_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let ws = open(temp_dir.path());

    let versions: Vec<MapVersion> = [Bump::Patch, Bump::Patch, Bump::Minor, Bump::None, Bump::Major]
        .into_iter()
        .map(|bump| {
            ws.generate(&GenerateRequest {
                bump,
                summary: None,
            })
            .unwrap()
            .metadata
            .version
        })
        .collect();

    assert_eq!(
        versions,
        vec![
            MapVersion::new(0, 0, 1),
            MapVersion::new(0, 0, 2),
            MapVersion::new(0, 1, 0),
            MapVersion::new(0, 1, 0),
            MapVersion::new(1, 0, 0),
        ]
    );
}

#[test]
fn test_hand_edited_map_is_drift() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &["src/lib.rs"]);
    let ws = open(temp_dir.path());
    generate(&ws, Bump::Patch, None);

    let path = ws.output_path().to_path_buf();
    let edited = fs::read_to_string(&path).unwrap().replace("lib.rs", "main.rs");
    fs::write(&path, edited).unwrap();

    let DriftReport::Differs { diff } = ws.check(None).unwrap().report else {
        panic!("expected drift after a manual edit");
    };
    assert!(diff.contains("-    └── main.rs\n"));
    assert!(diff.contains("+    └── lib.rs\n"));

    generate(&ws, Bump::None, None);
    assert!(ws.check(None).unwrap().report.is_up_to_date());
}
