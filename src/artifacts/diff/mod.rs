//! Tree comparison
//!
//! Works on flat path→blob mappings produced by reading a tree. It reports
//! which paths changed between snapshots; rendering file content differences
//! is left to the caller.

pub mod tree_diff;
