//! Error taxonomy of the storage core
//!
//! Every public operation of the object store, reference store, tree codec
//! and commit graph reports failures through [`SitError`]. The CLI wraps these
//! with `anyhow` context for presentation.

use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SitError {
    /// No object is stored under the given OID.
    #[error("object {oid} not found")]
    ObjectNotFound { oid: String },

    /// The stored type tag disagrees with the caller's expectation.
    #[error("object {oid} is a {actual}, expected {expected}")]
    TypeMismatch {
        oid: String,
        expected: ObjectType,
        actual: ObjectType,
    },

    /// The stored bytes lack the `type NUL payload` framing.
    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: String, reason: String },

    #[error("malformed tree {oid}: {reason}")]
    MalformedTree { oid: String, reason: String },

    #[error("malformed commit {oid}: {reason}")]
    MalformedCommit { oid: String, reason: String },

    /// Tree entry names must be single path components.
    #[error("invalid path component {name:?} in tree {oid}")]
    InvalidPathComponent { oid: String, name: String },

    /// A reference is never written without a target.
    #[error("refusing to write empty value to ref {name}")]
    EmptyValue { name: String },

    /// Symbolic resolution did not terminate within the hop budget.
    #[error("broken reference chain at {name} after {hops} hops")]
    BrokenReferenceChain { name: String, hops: usize },

    #[error("unknown name {name}")]
    UnknownName { name: String },

    #[error("invalid object id {id:?}")]
    InvalidObjectId { id: String },

    #[error("invalid ref name {name:?}")]
    InvalidRefName { name: String },

    /// Branches and tags are created once and never silently moved.
    #[error("a reference named {name} already exists")]
    RefExists { name: String },

    #[error("not a sit repository: {path}")]
    NotInitialized { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = SitError> = std::result::Result<T, E>;
