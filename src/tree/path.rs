//! Path canonicalization and normalization utilities

use crate::error::TreeError;
use std::path::{Component, Path, PathBuf};

/// Canonicalize the walk root (resolves symlinks, `..`, `.`)
///
/// Uses dunce so Windows paths stay free of the `\\?\` verbatim prefix.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, TreeError> {
    dunce::canonicalize(path).map_err(|e| {
        TreeError::InvalidPath(format!("Failed to canonicalize {}: {}", path.display(), e))
    })
}

/// Render a path below `root` as a `/`-separated relative string.
///
/// This is the only form the ignore rules ever see, independent of the
/// platform separator.
pub fn relative_slash_path(root: &Path, path: &Path) -> Result<String, TreeError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        TreeError::InvalidPath(format!(
            "{} is not below {}",
            path.display(),
            root.display()
        ))
    })?;
    Ok(join_normal_components(rel))
}

/// Lexically normalize a user-supplied output path to root-relative form.
///
/// Absolute paths below `root` are made relative; `.` segments vanish and
/// `..` pops the previous segment. Paths escaping the root keep their leading
/// `..` segments and therefore never match a walked entry. Returns `None` for
/// an absolute path outside `root`.
pub fn normalize_output_path(root: &Path, output: &Path) -> Option<String> {
    let rel = if output.is_absolute() {
        output.strip_prefix(root).ok()?
    } else {
        output
    };

    let mut segments: Vec<String> = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                if matches!(segments.last(), Some(last) if last != "..") {
                    segments.pop();
                } else {
                    segments.push("..".to_string());
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    Some(segments.join("/"))
}

fn join_normal_components(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
