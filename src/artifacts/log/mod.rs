//! Commit history traversal
//!
//! - `rev_list`: breadth-first walk over parent links from a set of
//!   starting commits, visiting each commit once
pub mod rev_list;
