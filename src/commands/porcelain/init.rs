use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::errors::Result;
use std::fs;
use tracing::info;

pub const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Create the storage layout and point HEAD at the unborn default branch
    ///
    /// Running it again keeps existing objects and references, HEAD included.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.database().objects_path())?;
        fs::create_dir_all(self.refs().heads_path())?;
        fs::create_dir_all(self.refs().tags_path())?;

        if self.refs().read_ref(&SymRefName::head(), false)?.is_set() {
            info!(path = %self.path().display(), "reinitialized existing repository");
            return Ok(());
        }

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_head(RefValue::symbolic(&SymRefName::branch(&default_branch)))?;
        info!(path = %self.path().display(), "initialized empty repository");

        Ok(())
    }

    /// Whether the storage directory has been created
    pub fn is_initialized(&self) -> bool {
        self.storage_path().is_dir()
    }
}
