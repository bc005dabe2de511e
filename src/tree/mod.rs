//! Directory tree rendering
//!
//! Walks the repository root through a [`walker::DirectorySource`] and renders
//! the box-drawing tree block embedded in every folder map.

pub mod builder;
pub mod path;
pub mod walker;

pub use builder::{compare_entries, TreeBuilder, TreeListing, ROOT_MARKER};
pub use walker::{DirectorySource, Entry, FsSource, MemoryTree, WalkerConfig};
