use crate::areas::repository::Repository;
use crate::areas::workspace::EntryKind;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::Result;
use std::path::Path;
use tracing::{debug, warn};

impl Repository {
    /// Store the working directory as a tree of blobs and return the root tree OID
    ///
    /// Symbolic links are never followed, and the storage directory is skipped.
    /// Names that cannot be encoded as a tree entry are skipped with a warning.
    pub fn write_tree(&self) -> Result<ObjectId> {
        self.write_tree_at(Path::new(""))
    }

    fn write_tree_at(&self, dir_path: &Path) -> Result<ObjectId> {
        let mut tree = Tree::default();

        for (name, kind) in self.workspace().list_dir(dir_path)? {
            let path = dir_path.join(&name);
            if !Tree::is_valid_name(&name) {
                warn!(path = %path.display(), "skipping file name that cannot be stored in a tree");
                continue;
            }

            let entry = match kind {
                EntryKind::File => {
                    let blob = Blob::new(self.workspace().read_file(&path)?);
                    TreeEntry::new(ObjectType::Blob, self.database().store(&blob)?)
                }
                EntryKind::Directory => TreeEntry::new(ObjectType::Tree, self.write_tree_at(&path)?),
            };

            tree.add_entry(name, entry)?;
        }

        let oid = self.database().store(&tree)?;
        debug!(path = %dir_path.display(), %oid, "stored tree");

        Ok(oid)
    }
}
