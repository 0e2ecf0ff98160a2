use crate::areas::repository::Repository;
use crate::artifacts::branch::TAGS_PREFIX;
use crate::artifacts::branch::branch_name::{SymRefName, TagName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::info;

impl Repository {
    /// Create a tag at `start` (HEAD when absent) and return the tagged object
    pub fn tag(&self, tag_name: &str, start: Option<&str>) -> Result<ObjectId> {
        let tag_name = TagName::try_parse(tag_name.to_string())?;
        self.ensure_ref_absent(&SymRefName::tag(&tag_name))?;

        let oid = self.resolve_start_point(start)?;
        self.refs().create_tag(&tag_name, &oid)?;
        info!(tag = %tag_name, %oid, "created tag");

        Ok(oid)
    }

    /// Short names of all tags
    pub fn tags(&self) -> Result<Vec<String>> {
        Ok(self
            .refs()
            .list_refs(TAGS_PREFIX, false)?
            .into_iter()
            .map(|(name, _)| name.short_name().to_string())
            .collect())
    }
}
