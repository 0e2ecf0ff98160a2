//! Commit object
//!
//! Commits represent snapshots of the working tree at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - At most one parent commit ID (history is linear)
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit\0
//! tree <tree-oid>
//! parent <parent-oid>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, SitError};
use bytes::Bytes;
use derive_new::new;

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit ID (None for the root commit)
    parent: Option<ObjectId>,
    message: String,
}

impl Commit {
    /// Get the first non-blank line of the commit message, trimmed
    pub fn short_message(&self) -> String {
        self.message
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
            .to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        let mut content = lines.join("\n");
        content.push('\n');

        Bytes::from(content)
    }
}

impl Unpackable for Commit {
    fn deserialize(oid: &ObjectId, payload: Bytes) -> Result<Self> {
        let malformed = |reason: String| SitError::MalformedCommit {
            oid: oid.to_string(),
            reason,
        };

        let content = std::str::from_utf8(&payload)
            .map_err(|e| malformed(format!("payload is not valid UTF-8: {e}")))?;

        // header ends at the first blank line, the message is kept verbatim
        // apart from the newline the encoder appends
        let (header, body) = content.split_once("\n\n").unwrap_or((content, ""));
        let message = body.strip_suffix('\n').unwrap_or(body);

        let mut tree_oid = None;
        let mut parent = None;

        for line in header.split_terminator('\n') {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| malformed(format!("invalid header line {line:?}")))?;
            let value = ObjectId::try_parse(value.to_string())
                .map_err(|_| malformed(format!("invalid object id in {key} field")))?;

            match key {
                "tree" if tree_oid.is_none() => tree_oid = Some(value),
                "parent" if parent.is_none() => parent = Some(value),
                "tree" | "parent" => return Err(malformed(format!("repeated {key} field"))),
                _ => return Err(malformed(format!("unknown field {key:?}"))),
            }
        }

        let tree_oid = tree_oid.ok_or_else(|| malformed("missing tree field".to_string()))?;
        let message = message.to_string();

        Ok(Commit::new(tree_oid, parent, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
