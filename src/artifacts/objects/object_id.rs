//! Object identifier (SHA-256 digest)
//!
//! Object IDs are 64-character lowercase hexadecimal strings. They uniquely
//! identify every object in the store (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects are stored flat, in `.sit/objects/<oid>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::SitError;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Object identifier (SHA-256 hex digest)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase digits are normalized to lowercase.
    pub fn try_parse(id: String) -> crate::errors::Result<Self> {
        if !Self::is_valid(&id) {
            return Err(SitError::InvalidObjectId { id });
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Whether `id` has the shape of a full object ID
    pub fn is_valid(id: &str) -> bool {
        id.len() == OBJECT_ID_LENGTH && id.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Digest of the given bytes
    pub fn hash(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        Self(format!("{digest:x}"))
    }

    /// Location of the object relative to the objects directory
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
