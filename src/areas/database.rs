//! Object database
//!
//! Content-addressed persistence of typed payloads. Every object lives in a
//! single file `objects/<oid>` holding `<type>\0<payload>`; the OID is the
//! SHA-256 digest of those exact bytes, so an object file can never change
//! once written.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Result, SitError};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store `payload` as an object of the given type and return its OID
    ///
    /// Storing identical content twice yields the same OID and leaves the
    /// existing object file untouched.
    pub fn put(&self, payload: &[u8], object_type: ObjectType) -> Result<ObjectId> {
        let framed = frame(object_type, payload);
        let oid = ObjectId::hash(&framed);

        self.write_framed(&oid, &framed)?;
        Ok(oid)
    }

    /// Store a typed object and return its OID
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let framed = object.frame();
        let oid = ObjectId::hash(&framed);

        self.write_framed(&oid, &framed)?;
        Ok(oid)
    }

    /// Read the payload stored under `oid`
    ///
    /// Fails with `TypeMismatch` when `expected_type` is given and differs
    /// from the stored type tag.
    pub fn get(&self, oid: &ObjectId, expected_type: Option<ObjectType>) -> Result<Bytes> {
        let (object_type, payload) = self.read_framed(oid)?;

        match expected_type {
            Some(expected) if expected != object_type => Err(SitError::TypeMismatch {
                oid: oid.to_string(),
                expected,
                actual: object_type,
            }),
            _ => Ok(payload),
        }
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.to_path()).is_file()
    }

    pub fn object_type(&self, oid: &ObjectId) -> Result<ObjectType> {
        let (object_type, _) = self.read_framed(oid)?;
        Ok(object_type)
    }

    pub fn parse_object(&self, oid: &ObjectId) -> Result<ObjectBox> {
        let (object_type, payload) = self.read_framed(oid)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(oid, payload)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(oid, payload)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                oid, payload,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, oid: &ObjectId) -> Result<Blob> {
        Blob::deserialize(oid, self.get(oid, Some(ObjectType::Blob))?)
    }

    pub fn parse_object_as_tree(&self, oid: &ObjectId) -> Result<Tree> {
        Tree::deserialize(oid, self.get(oid, Some(ObjectType::Tree))?)
    }

    pub fn parse_object_as_commit(&self, oid: &ObjectId) -> Result<Commit> {
        Commit::deserialize(oid, self.get(oid, Some(ObjectType::Commit))?)
    }

    fn read_framed(&self, oid: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(oid.to_path());
        trace!(oid = %oid, "reading object");

        let content = match std::fs::read(&object_path) {
            Ok(content) => Bytes::from(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SitError::ObjectNotFound {
                    oid: oid.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let malformed = |reason: &str| SitError::MalformedObject {
            oid: oid.to_string(),
            reason: reason.to_string(),
        };

        let separator = content
            .iter()
            .position(|byte| *byte == 0)
            .ok_or_else(|| malformed("missing type separator"))?;
        let type_tag = std::str::from_utf8(&content[..separator])
            .map_err(|_| malformed("type tag is not valid UTF-8"))?;
        let object_type = ObjectType::try_from(type_tag)
            .map_err(|_| malformed(&format!("unknown object type {type_tag:?}")))?;

        Ok((object_type, content.slice(separator + 1..)))
    }

    fn write_framed(&self, oid: &ObjectId, framed: &[u8]) -> Result<()> {
        let object_path = self.path.join(oid.to_path());

        // objects are immutable, an existing file already holds these bytes
        if object_path.exists() {
            trace!(oid = %oid, "object already stored");
            return Ok(());
        }

        std::fs::create_dir_all(&self.path)?;
        self.write_object(object_path, framed)?;
        debug!(oid = %oid, size = framed.len(), "stored object");

        Ok(())
    }

    fn write_object(&self, object_path: PathBuf, content: &[u8]) -> Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        if let Err(e) = Self::write_then_rename(&temp_object_path, &object_path, content) {
            if let Err(cleanup) = std::fs::remove_file(&temp_object_path) {
                trace!(path = %temp_object_path.display(), %cleanup, "temp object not removed");
            }
            return Err(e.into());
        }

        Ok(())
    }

    fn write_then_rename(temp_path: &Path, object_path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;
        file.write_all(content)?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(temp_path, object_path)
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
