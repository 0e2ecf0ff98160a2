//! Data structures and algorithms
//!
//! - `branch`: Reference names and revision parsing
//! - `checkout`: Full-replace materialization of a tree
//! - `diff`: Tree comparison
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and their codecs

pub mod branch;
pub mod checkout;
pub mod diff;
pub mod log;
pub mod objects;
