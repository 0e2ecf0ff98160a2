//! Checkout of a tree into the working directory
//!
//! Checkout is a full replace: tracked content is cleared and every path of
//! the target tree is written back. The storage directory is never touched.

pub mod migration;
