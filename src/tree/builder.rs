//! Tree builder for rendering the folder map tree block

use crate::error::TreeError;
use crate::ignore::PathFilter;
use crate::tree::path;
use crate::tree::walker::{DirectorySource, Entry, FsSource, WalkerConfig};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace, warn};

/// First line of every tree block
pub const ROOT_MARKER: &str = ".";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

/// Rendered tree block plus derived counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeListing {
    /// Tree lines, starting with the root marker
    pub lines: Vec<String>,
    pub directory_count: usize,
    pub file_count: usize,
}

impl TreeListing {
    /// Derive counts from rendered lines; the root marker is not counted.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut directory_count = 0;
        let mut file_count = 0;
        for line in lines.iter().skip(1) {
            if line.ends_with('/') {
                directory_count += 1;
            } else {
                file_count += 1;
            }
        }
        Self {
            lines,
            directory_count,
            file_count,
        }
    }

    /// Listing of a root with nothing left after filtering.
    pub fn empty() -> Self {
        Self::from_lines(vec![ROOT_MARKER.to_string()])
    }

    /// Number of rendered entries, root marker excluded.
    pub fn entry_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

/// Sibling order: directories first, then case-insensitive name, then exact name.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Tree builder walking a directory source depth-first, pre-order
pub struct TreeBuilder<S: DirectorySource = FsSource> {
    root: PathBuf,
    filter: PathFilter,
    source: S,
    config: WalkerConfig,
}

impl TreeBuilder<FsSource> {
    /// Create a builder over the real filesystem. `root` must be an existing directory.
    pub fn new(root: PathBuf, filter: PathFilter) -> Self {
        Self::with_source(root, filter, FsSource)
    }
}

impl<S: DirectorySource> TreeBuilder<S> {
    pub fn with_source(root: PathBuf, filter: PathFilter, source: S) -> Self {
        Self {
            root,
            filter,
            source,
            config: WalkerConfig::default(),
        }
    }

    /// Set walker config (symlink policy).
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the tree block for the configured root
    ///
    /// Read failures anywhere below the root abort the build; nothing is
    /// skipped silently.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<TreeListing, TreeError> {
        let start = Instant::now();
        debug!("Starting tree build");

        let mut lines = vec![ROOT_MARKER.to_string()];
        let mut ancestors = if self.config.follow_symlinks {
            Some(vec![self.source.canonicalize(&self.root)?])
        } else {
            None
        };

        if let Err(e) = self.walk(&self.root, "", &mut ancestors, &mut lines) {
            error!("Tree walk failed: {}", e);
            return Err(e);
        }

        let listing = TreeListing::from_lines(lines);
        info!(
            directories = listing.directory_count,
            files = listing.file_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Tree build completed"
        );
        Ok(listing)
    }

    fn walk(
        &self,
        dir: &Path,
        prefix: &str,
        ancestors: &mut Option<Vec<PathBuf>>,
        lines: &mut Vec<String>,
    ) -> Result<(), TreeError> {
        let entries = self.children(dir)?;
        let last_index = entries.len().saturating_sub(1);

        for (idx, entry) in entries.iter().enumerate() {
            let is_last = idx == last_index;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            let suffix = if entry.is_dir { "/" } else { "" };
            lines.push(format!("{}{}{}{}", prefix, connector, entry.name, suffix));

            if !entry.is_dir {
                continue;
            }

            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { CONTINUATION });
            if entry.is_symlink && ancestors.is_none() {
                debug!(path = %entry.path.display(), "Not following symlinked directory");
                continue;
            }

            if let Some(stack) = ancestors.as_mut() {
                let canonical = self.source.canonicalize(&entry.path)?;
                if stack.contains(&canonical) {
                    warn!(
                        path = %entry.path.display(),
                        target = %canonical.display(),
                        "Symlink cycle detected; not descending"
                    );
                    continue;
                }
                stack.push(canonical);
                let result = self.walk(&entry.path, &child_prefix, ancestors, lines);
                if let Some(stack) = ancestors.as_mut() {
                    stack.pop();
                }
                result?;
            } else {
                self.walk(&entry.path, &child_prefix, ancestors, lines)?;
            }
        }

        Ok(())
    }

    /// Filtered, sorted children of one directory.
    fn children(&self, dir: &Path) -> Result<Vec<Entry>, TreeError> {
        let mut kept = Vec::new();
        for entry in self.source.read_dir(dir)? {
            let rel = path::relative_slash_path(&self.root, &entry.path)?;
            if self.filter.is_excluded(&rel) {
                trace!(path = %rel, "Excluded from map");
                continue;
            }
            kept.push(entry);
        }
        kept.sort_by(compare_entries);
        Ok(kept)
    }
}
