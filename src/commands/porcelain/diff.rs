use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff::{ChangeSet, changed_paths};
use crate::artifacts::objects::tree::FlatTree;
use crate::errors::Result;

impl Repository {
    /// Paths whose content differs between the commits `from` and `to` name
    pub fn diff(&self, from: &str, to: &str) -> Result<ChangeSet> {
        let from_tree = self.commit_tree(from)?;
        let to_tree = self.commit_tree(to)?;

        Ok(changed_paths(&from_tree, &to_tree))
    }

    fn commit_tree(&self, name: &str) -> Result<FlatTree> {
        let oid = self.resolve_name(name)?;
        let commit = self.get_commit(&oid)?;

        self.read_tree(commit.tree_oid())
    }
}
