use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Load and parse the object stored under `oid`, whatever its type
    pub fn cat_file(&self, oid: &ObjectId) -> Result<ObjectBox> {
        self.database().parse_object(oid)
    }
}
