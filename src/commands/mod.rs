//! Command implementations
//!
//! Commands are `impl Repository` blocks, organized into two categories:
//!
//! - `plumbing`: Low-level operations on objects and references (hash-object, cat-file, write-tree, read-tree)
//! - `porcelain`: User-facing version control workflows (init, commit, log, checkout, branch, tag, diff)
//!
//! Plumbing commands provide building blocks, while porcelain commands compose
//! them into higher-level operations.

pub mod plumbing;
pub mod porcelain;
