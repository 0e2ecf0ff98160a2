//! Plumbing commands
//!
//! Low-level operations over objects and references. They return values and
//! never print; presentation belongs to the caller.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob's object ID and optionally store it
//! - `cat-file`: Read an object's payload
//! - `write-tree`: Snapshot the working directory as tree objects
//! - `read-tree`: Decode a tree into a flat path mapping, or materialize it
//! - `rev-parse`: Resolve a name to an object ID
//! - `show-ref`: Enumerate references

pub mod cat_file;
pub mod hash_object;
pub mod read_tree;
pub mod rev_parse;
pub mod show_ref;
pub mod write_tree;
