use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Resolve a user-supplied name to an object ID
    ///
    /// See [`Revision`] for the accepted forms and the lookup order.
    pub fn resolve_name(&self, name: &str) -> Result<ObjectId> {
        Revision::try_parse(name)?.resolve(self)
    }
}
