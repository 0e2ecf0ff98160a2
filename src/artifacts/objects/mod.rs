//! Object types and codecs
//!
//! Every piece of content is stored as an immutable object identified by a
//! SHA-256 digest. There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (sorted `<type> <oid> <name>` records)
//! - **Commit**: Snapshot record (tree, optional parent, message)
//!
//! All objects are framed on disk as `<type>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-256 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;
