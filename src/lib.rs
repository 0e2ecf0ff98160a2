//! A minimal content-addressed version-control core
//!
//! Objects (blobs, trees, commits) are stored under the SHA-256 digest of
//! their bytes, and mutable references map names to them. Every operation
//! runs against an explicit [`areas::repository::Repository`] root.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
