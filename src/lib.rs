//! Foldermap: Deterministic Repository Folder Maps
//!
//! Renders a versioned, byte-deterministic snapshot of a directory tree and
//! checks a committed snapshot for drift against the current tree.

pub mod cli;
pub mod config;
pub mod drift;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod metadata;
pub mod render;
pub mod tree;
pub mod workspace;
