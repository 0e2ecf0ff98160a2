//! Core repository components
//!
//! This module contains the stateful building blocks of a repository:
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `refs`: Reference management (branches, HEAD, tags)
//! - `repository`: Context value owning the other areas for one root
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
