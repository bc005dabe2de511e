//! Folder map document rendering.
//!
//! Output depends only on the tree listing and the metadata passed in, so two
//! renders of the same inputs are byte-identical. Drift checking relies on it.

use crate::metadata::MapMetadata;
use crate::tree::TreeListing;

pub const TITLE: &str = "# Repository Folder Map";
pub const NOTICE: &str = "Generated file. Do not edit manually.";

/// Compose the full document text.
pub fn render_document(listing: &TreeListing, metadata: &MapMetadata) -> String {
    let mut out: Vec<String> = vec![
        TITLE.to_string(),
        String::new(),
        NOTICE.to_string(),
        String::new(),
        "## Metadata".to_string(),
        format!("- map_version: {}", metadata.version),
        format!("- bump: {}", metadata.bump),
        format!("- summary: {}", metadata.summary),
        format!("- directories: {}", listing.directory_count),
        format!("- files: {}", listing.file_count),
        String::new(),
        "## Tree".to_string(),
        "```text".to_string(),
    ];
    out.extend(listing.lines.iter().cloned());
    out.push("```".to_string());
    out.push(String::new());
    out.join("\n")
}
