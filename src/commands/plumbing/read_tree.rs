use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use crate::errors::Result;

impl Repository {
    /// Decode a tree into a flat mapping from `/`-joined path to blob OID
    pub fn read_tree(&self, oid: &ObjectId) -> Result<FlatTree> {
        let mut flat_tree = FlatTree::new();
        self.collect_tree(oid, "", &mut flat_tree)?;

        Ok(flat_tree)
    }

    /// Replace the tracked working-directory content with the tree at `oid`
    pub fn checkout_tree(&self, oid: &ObjectId) -> Result<()> {
        let target = self.read_tree(oid)?;
        Migration::new(self, target).apply_changes()
    }

    fn collect_tree(&self, oid: &ObjectId, prefix: &str, flat_tree: &mut FlatTree) -> Result<()> {
        let tree = self.database().parse_object_as_tree(oid)?;

        for (name, entry) in tree.into_entries() {
            let path = format!("{prefix}{name}");
            if entry.is_tree() {
                self.collect_tree(&entry.oid, &format!("{path}/"), flat_tree)?;
            } else {
                flat_tree.insert(path, entry.oid);
            }
        }

        Ok(())
    }
}
