//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), keyed by name.
//!
//! ## Format
//!
//! On disk: `tree\0<entries>`
//! Each entry: `<type> <oid> <name>\n`
//!
//! Entries are always emitted sorted by name, so two directories with the same
//! content hash identically whatever order the filesystem listed them in.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, SitError};
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;

/// A tree decoded into relative `/`-joined paths of its blobs
pub type FlatTree = BTreeMap<String, ObjectId>;

/// A single child of a tree: its type and object ID
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub object_type: ObjectType,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.object_type == ObjectType::Tree
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Add a child record, rejecting names that are not a single path component
    pub fn add_entry(&mut self, name: String, entry: TreeEntry) -> Result<()> {
        if !Self::is_valid_name(&name) {
            return Err(SitError::InvalidPathComponent {
                oid: String::new(),
                name,
            });
        }
        if entry.object_type == ObjectType::Commit {
            return Err(SitError::MalformedTree {
                oid: String::new(),
                reason: format!("entry {name} cannot reference a commit"),
            });
        }

        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A name is valid if it is one non-special path component that fits on a line
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\n', '\0'])
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        let content = self
            .entries
            .iter()
            .map(|(name, entry)| format!("{} {} {}\n", entry.object_type, entry.oid, name))
            .collect::<String>();

        Bytes::from(content)
    }
}

impl Unpackable for Tree {
    fn deserialize(oid: &ObjectId, payload: Bytes) -> Result<Self> {
        let malformed = |reason: String| SitError::MalformedTree {
            oid: oid.to_string(),
            reason,
        };

        let content = std::str::from_utf8(&payload)
            .map_err(|e| malformed(format!("payload is not valid UTF-8: {e}")))?;

        let mut tree = Tree::default();
        // entries end in a bare `\n`, a `\r` before it belongs to the name
        for line in content.split_terminator('\n') {
            let mut parts = line.splitn(3, ' ');
            let (Some(object_type), Some(entry_oid), Some(name)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(malformed(format!("incomplete entry {line:?}")));
            };

            let object_type = match object_type {
                "blob" => ObjectType::Blob,
                "tree" => ObjectType::Tree,
                other => return Err(malformed(format!("unknown entry type {other:?}"))),
            };
            let entry_oid = ObjectId::try_parse(entry_oid.to_string())
                .map_err(|_| malformed(format!("invalid object id in entry {line:?}")))?;

            if !Self::is_valid_name(name) {
                return Err(SitError::InvalidPathComponent {
                    oid: oid.to_string(),
                    name: name.to_string(),
                });
            }
            if tree.entries.contains_key(name) {
                return Err(malformed(format!("duplicate entry {name:?}")));
            }

            tree.entries
                .insert(name.to_string(), TreeEntry::new(object_type, entry_oid));
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
