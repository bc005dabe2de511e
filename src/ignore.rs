//! Ignore rules for the folder map walk.
//!
//! Rules are an explicit table rather than literals inside the walker, so the
//! filter can be exercised without touching a filesystem. Three rules apply to
//! every root-relative path (always `/`-separated):
//!
//! - the whole path equals one of the root names (`.git`, `.DS_Store`)
//! - any path segment equals one of the blocked segment names
//!   (tooling caches, virtualenvs, dependency folders)
//! - the path equals the output document itself, so a map never lists itself

use std::collections::BTreeSet;

/// Built-in names excluded when they are the entire relative path.
pub const BUILTIN_ROOT_NAMES: &[&str] = &[".git", ".DS_Store"];

/// Built-in names excluded wherever they appear as a full path segment.
pub const BUILTIN_SEGMENTS: &[&str] = &[
    ".git",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".venv",
    "node_modules",
];

/// Table of ignore rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    root_names: BTreeSet<String>,
    segments: BTreeSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            root_names: BUILTIN_ROOT_NAMES.iter().map(|s| (*s).to_string()).collect(),
            segments: BUILTIN_SEGMENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl IgnoreRules {
    /// Rules with no entries at all.
    pub fn empty() -> Self {
        Self {
            root_names: BTreeSet::new(),
            segments: BTreeSet::new(),
        }
    }

    /// Add names matched against the entire relative path.
    pub fn with_root_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add names matched against every path segment.
    pub fn with_segments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments.extend(names.into_iter().map(Into::into));
        self
    }

    /// True when the path matches a root name or contains a blocked segment.
    pub fn matches(&self, rel_path: &str) -> bool {
        if self.root_names.contains(rel_path) {
            return true;
        }
        rel_path
            .split('/')
            .any(|segment| self.segments.contains(segment))
    }
}

/// Exclusion predicate applied to every entry before it joins the walk result.
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: IgnoreRules,
    output_rel: Option<String>,
}

impl PathFilter {
    pub fn new(rules: IgnoreRules) -> Self {
        Self {
            rules,
            output_rel: None,
        }
    }

    /// Exclude the generated document, given as a normalized root-relative path.
    pub fn with_output(mut self, output_rel: impl Into<String>) -> Self {
        self.output_rel = Some(output_rel.into());
        self
    }

    /// Whether the root-relative path must be left out of the map.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        if self.output_rel.as_deref() == Some(rel_path) {
            return true;
        }
        self.rules.matches(rel_path)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(IgnoreRules::default())
    }
}
