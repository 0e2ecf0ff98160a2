use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::info;

impl Repository {
    /// Snapshot the working directory and advance the current branch to it
    ///
    /// HEAD is updated through its symbolic link, so on a branch the branch
    /// moves and HEAD stays attached. Objects written before a failure stay
    /// stored while HEAD is left unchanged.
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        let tree_oid = self.write_tree()?;
        let parent = self.refs().read_head()?;

        let commit = Commit::new(tree_oid, parent, message.to_string());
        let commit_oid = self.database().store(&commit)?;
        self.refs().update_head(&commit_oid)?;

        info!(
            oid = %commit_oid,
            root = commit.parent().is_none(),
            message = %commit.short_message(),
            "created commit"
        );

        Ok(commit_oid)
    }

    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit> {
        self.database().parse_object_as_commit(oid)
    }
}
