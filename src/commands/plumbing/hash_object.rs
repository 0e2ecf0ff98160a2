use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::path::Path;

impl Repository {
    /// Hash a file as a blob, storing it only when `write` is set
    ///
    /// Relative paths are taken from the repository root.
    pub fn hash_object(&self, object_path: &Path, write: bool) -> Result<ObjectId> {
        let object = Blob::new(self.workspace().read_file(object_path)?);

        if write {
            self.database().store(&object)
        } else {
            Ok(object.object_id())
        }
    }
}
