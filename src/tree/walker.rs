//! Directory sources for traversing directory structures
//!
//! The tree builder never touches `std::fs` directly: it lists one directory
//! at a time through a [`DirectorySource`]. [`FsSource`] reads the real
//! filesystem; [`MemoryTree`] is an in-memory stand-in for tests.

use crate::error::TreeError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One filesystem node considered for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Final path segment
    pub name: String,
    /// Full path, below the walk root
    pub path: PathBuf,
    /// Resolved kind: symlinks report the kind of their target
    pub is_dir: bool,
    /// Whether the entry itself is a symbolic link
    pub is_symlink: bool,
}

/// Walk configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to descend into symlinked directories (default: false for determinism)
    pub follow_symlinks: bool,
}

/// Lists the immediate children of a directory.
pub trait DirectorySource {
    /// Children of `dir` in any order. Failures are fatal to the walk.
    fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, TreeError>;

    /// Resolve `path` to its canonical location, used to detect symlink cycles.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, TreeError>;
}

/// Real filesystem source backed by walkdir
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl DirectorySource for FsSource {
    fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, TreeError> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in walker {
            let entry = entry.map_err(|e| TreeError::Walk {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;

            let file_type = entry.file_type();
            let is_symlink = file_type.is_symlink();
            // A dangling or unreadable link has no resolvable kind; render it as a file.
            let is_dir = if is_symlink {
                fs::metadata(entry.path())
                    .map(|m| m.is_dir())
                    .unwrap_or(false)
            } else {
                file_type.is_dir()
            };

            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                is_dir,
                is_symlink,
            });
        }

        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, TreeError> {
        dunce::canonicalize(path).map_err(|e| TreeError::Walk {
            path: path.to_path_buf(),
            message: format!("Failed to resolve path: {}", e),
        })
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    path: PathBuf,
    is_dir: bool,
    link_target: Option<PathBuf>,
    unreadable: bool,
}

/// In-memory directory tree
///
/// Children come back in insertion order, so callers can verify that ordering
/// is imposed by the builder rather than inherited from the source.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    root: PathBuf,
    nodes: Vec<MemoryNode>,
}

impl MemoryTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            nodes: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a directory (and any missing parents) at a `/`-separated relative path.
    pub fn dir(mut self, rel: &str) -> Self {
        self.insert(rel, true, None);
        self
    }

    /// Add a file (and any missing parent directories).
    pub fn file(mut self, rel: &str) -> Self {
        self.insert(rel, false, None);
        self
    }

    /// Add a symlink to another directory of this tree, both root-relative.
    pub fn dir_link(mut self, rel: &str, target_rel: &str) -> Self {
        let target = self.resolve(target_rel);
        self.insert(rel, true, Some(target));
        self
    }

    /// Mark a directory so that listing it fails with permission denied.
    pub fn unreadable(mut self, rel: &str) -> Self {
        let path = self.resolve(rel);
        if let Some(node) = self.nodes.iter_mut().find(|n| n.path == path) {
            node.unreadable = true;
        }
        self
    }

    fn resolve(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn insert(&mut self, rel: &str, is_dir: bool, link_target: Option<PathBuf>) {
        let path = self.resolve(rel);
        if let Some(parent) = path.parent() {
            if parent.starts_with(&self.root) && parent != self.root {
                let parent = parent.to_path_buf();
                if !self.nodes.iter().any(|n| n.path == parent) {
                    let parent_rel = parent
                        .strip_prefix(&self.root)
                        .map(|p| p.to_string_lossy().replace('\\', "/"))
                        .unwrap_or_default();
                    self.insert(&parent_rel, true, None);
                }
            }
        }
        if !self.nodes.iter().any(|n| n.path == path) {
            self.nodes.push(MemoryNode {
                path,
                is_dir,
                link_target,
                unreadable: false,
            });
        }
    }

    fn target_of(&self, dir: &Path) -> PathBuf {
        self.nodes
            .iter()
            .find(|n| n.path == dir)
            .and_then(|n| n.link_target.clone())
            .unwrap_or_else(|| dir.to_path_buf())
    }
}

impl DirectorySource for MemoryTree {
    fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, TreeError> {
        if self.nodes.iter().any(|n| n.path == dir && n.unreadable) {
            return Err(TreeError::Walk {
                path: dir.to_path_buf(),
                message: io::Error::from(io::ErrorKind::PermissionDenied).to_string(),
            });
        }

        let listed = self.canonicalize(dir)?;
        let entries = self
            .nodes
            .iter()
            .filter(|n| n.path.parent() == Some(listed.as_path()))
            .map(|n| {
                let name = n
                    .path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Entry {
                    path: dir.join(&name),
                    name,
                    is_dir: n.is_dir,
                    is_symlink: n.link_target.is_some(),
                }
            })
            .collect();
        Ok(entries)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, TreeError> {
        // Resolve link segments from the root down.
        let rel = path.strip_prefix(&self.root).map_err(|_| {
            TreeError::InvalidPath(format!("{} is outside the tree", path.display()))
        })?;
        let mut resolved = self.root.clone();
        for component in rel.components() {
            resolved = self.target_of(&resolved.join(component));
        }
        Ok(resolved)
    }
}
