use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;

/// Serialization of an object into its payload (without type framing)
pub trait Packable {
    fn serialize(&self) -> Bytes;
}

/// Parsing of an object payload read back from the database
pub trait Unpackable {
    fn deserialize(oid: &ObjectId, payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// The payload prefixed with its type tag, exactly as stored on disk
    fn frame(&self) -> Bytes {
        frame(self.object_type(), &self.serialize())
    }

    fn object_id(&self) -> ObjectId {
        ObjectId::hash(&self.frame())
    }
}

/// Build the `<type>\0<payload>` framing
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let mut framed = Vec::with_capacity(object_type.as_str().len() + 1 + payload.len());
    framed.extend_from_slice(object_type.as_str().as_bytes());
    framed.push(0);
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn payload(&self) -> Bytes {
        match self {
            ObjectBox::Blob(blob) => blob.serialize(),
            ObjectBox::Tree(tree) => tree.serialize(),
            ObjectBox::Commit(commit) => commit.serialize(),
        }
    }
}
