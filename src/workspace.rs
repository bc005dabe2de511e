//! Workspace service: the single I/O boundary around the pure pipeline.
//!
//! Reads the prior document, walks the tree, renders, and either writes the
//! new document atomically (generate) or compares it with the prior one
//! (check). Validation of the repository root and output path happens in
//! [`MapWorkspace::open`], before anything is read or written.

use crate::drift::{check_drift, DriftReport};
use crate::error::MapError;
use crate::ignore::{IgnoreRules, PathFilter};
use crate::metadata::{Bump, MapMetadata};
use crate::render::render_document;
use crate::tree::path::{canonicalize_root, normalize_output_path};
use crate::tree::{TreeBuilder, TreeListing, WalkerConfig};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// Options for opening a workspace
#[derive(Debug, Clone)]
pub struct WorkspaceOptions {
    /// Output document, relative to the root (absolute paths are accepted)
    pub output: PathBuf,
    pub rules: IgnoreRules,
    pub walker: WalkerConfig,
}

/// Generate-mode request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub bump: Bump,
    pub summary: Option<String>,
}

/// Result of a generate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// Output path as shown to the user
    pub output: String,
    pub metadata: MapMetadata,
    pub directory_count: usize,
    pub file_count: usize,
    /// Whether the written text differs from the prior document
    pub changed: bool,
}

/// Result of a check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Output path as shown to the user
    pub output: String,
    pub report: DriftReport,
}

/// Validated repository root plus output location
#[derive(Debug, Clone)]
pub struct MapWorkspace {
    root: PathBuf,
    output_rel: Option<String>,
    output_path: PathBuf,
    display_name: String,
    rules: IgnoreRules,
    walker: WalkerConfig,
}

impl MapWorkspace {
    /// Validate the root and output path.
    ///
    /// Fails with [`MapError::Configuration`] when the root is not an existing
    /// directory or when the output path names an existing directory.
    #[instrument(skip_all, fields(root = %repo_root.display()))]
    pub fn open(repo_root: &Path, options: WorkspaceOptions) -> Result<Self, MapError> {
        if !repo_root.is_dir() {
            return Err(MapError::Configuration(format!(
                "Repository root does not exist: {}",
                repo_root.display()
            )));
        }
        let root =
            canonicalize_root(repo_root).map_err(|e| MapError::Configuration(e.to_string()))?;

        let output_rel = normalize_output_path(&root, &options.output);
        let output_path = match &output_rel {
            Some(rel) => root.join(rel),
            None => options.output.clone(),
        };
        if output_path.is_dir() {
            return Err(MapError::Configuration(format!(
                "Output path is a directory: {}",
                output_path.display()
            )));
        }

        let display_name = output_rel
            .clone()
            .unwrap_or_else(|| options.output.display().to_string());
        debug!(output = %display_name, path = %output_path.display(), "Workspace opened");

        Ok(Self {
            root,
            output_rel,
            output_path,
            display_name,
            rules: options.rules,
            walker: options.walker,
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Output path as shown to the user
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Text of the prior document, if one exists. Invalid UTF-8 is replaced
    /// rather than rejected; metadata parsing falls back to defaults anyway.
    /// Line endings are normalized to `\n`, so a map checked out with CRLF
    /// endings compares equal to a fresh render.
    pub fn read_prior(&self) -> Result<Option<String>, MapError> {
        if !self.output_path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&self.output_path).map_err(|e| {
            MapError::io(
                format!("Failed to read {}", self.output_path.display()),
                e,
            )
        })?;
        Ok(Some(normalize_newlines(&String::from_utf8_lossy(&bytes))))
    }

    /// Walk the root with the output document excluded.
    pub fn build_listing(&self) -> Result<TreeListing, MapError> {
        let mut filter = PathFilter::new(self.rules.clone());
        if let Some(rel) = &self.output_rel {
            filter = filter.with_output(rel.clone());
        }
        let listing = TreeBuilder::new(self.root.clone(), filter)
            .with_walker_config(self.walker.clone())
            .build()?;
        Ok(listing)
    }

    /// Render the full document for the given metadata.
    pub fn render(&self, metadata: &MapMetadata) -> Result<(String, TreeListing), MapError> {
        let listing = self.build_listing()?;
        Ok((render_document(&listing, metadata), listing))
    }

    /// Regenerate the document and replace it atomically.
    #[instrument(skip(self), fields(output = %self.display_name))]
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, MapError> {
        // The parent must exist before the walk so that a first run and the
        // checks after it see the same tree.
        self.ensure_parent()?;

        let prior = self.read_prior()?;
        let metadata =
            MapMetadata::load(prior.as_deref())?.next(request.bump, request.summary.as_deref())?;
        let (document, listing) = self.render(&metadata)?;
        let changed = prior.as_deref() != Some(document.as_str());

        self.write_atomic(&document)?;
        info!(
            version = %metadata.version,
            bump = %metadata.bump,
            directories = listing.directory_count,
            files = listing.file_count,
            changed,
            "Folder map written"
        );

        Ok(GenerateOutcome {
            output: self.display_name.clone(),
            metadata,
            directory_count: listing.directory_count,
            file_count: listing.file_count,
            changed,
        })
    }

    /// Compare the prior document with a fresh render. Never writes and never
    /// advances the version.
    #[instrument(skip(self), fields(output = %self.display_name))]
    pub fn check(&self, summary: Option<&str>) -> Result<CheckOutcome, MapError> {
        let Some(prior) = self.read_prior()? else {
            info!("No prior folder map");
            return Ok(CheckOutcome {
                output: self.display_name.clone(),
                report: DriftReport::Missing,
            });
        };

        let metadata = MapMetadata::parse(&prior)?.for_check(summary);
        let (expected, _) = self.render(&metadata)?;
        let report = check_drift(Some(&prior), &expected, &self.display_name);
        info!(up_to_date = report.is_up_to_date(), "Drift check completed");

        Ok(CheckOutcome {
            output: self.display_name.clone(),
            report,
        })
    }

    fn ensure_parent(&self) -> Result<(), MapError> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    MapError::io(format!("Failed to create {}", parent.display()), e)
                })?;
            }
        }
        Ok(())
    }

    /// Write through a temporary file in the destination directory, then
    /// rename over the target.
    fn write_atomic(&self, document: &str) -> Result<(), MapError> {
        let parent = match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let context = || format!("Failed to write {}", self.output_path.display());

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| MapError::io(context(), e))?;
        tmp.write_all(document.as_bytes())
            .map_err(|e| MapError::io(context(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| MapError::io(context(), e))?;

        let permissions = match fs::metadata(&self.output_path) {
            Ok(existing) => Some(existing.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(permissions) = permissions {
            fs::set_permissions(tmp.path(), permissions).map_err(|e| MapError::io(context(), e))?;
        }

        tmp.persist(&self.output_path)
            .map_err(|e| MapError::io(context(), e.error))?;
        Ok(())
    }
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

// Temp files are created owner-only; a new document gets regular file permissions.
#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
