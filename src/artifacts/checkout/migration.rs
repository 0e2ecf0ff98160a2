//! Full-replace checkout of a tree into the working directory
//!
//! Every blob of the target tree is loaded before anything on disk changes,
//! so a missing or mistyped object aborts the checkout with the working
//! directory untouched. Only then is tracked content cleared and each path
//! written out.

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use crate::errors::Result;
use bytes::Bytes;
use std::path::PathBuf;
use tracing::{debug, info};

/// Checkout migration planner and executor
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Flat mapping of the tree being checked out
    target: FlatTree,
    /// Files to write, with their content
    writes: Vec<(PathBuf, Bytes)>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, target: FlatTree) -> Self {
        Self {
            repository,
            target,
            writes: Vec::new(),
        }
    }

    pub fn apply_changes(&mut self) -> Result<()> {
        self.plan_changes()?;
        self.update_workspace()?;

        Ok(())
    }

    fn plan_changes(&mut self) -> Result<()> {
        self.writes = self
            .target
            .iter()
            .map(|(path, oid)| Ok((PathBuf::from(path), self.load_blob_data(oid)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(())
    }

    fn update_workspace(&self) -> Result<()> {
        let workspace = self.repository.workspace();
        workspace.clear()?;

        for (path, content) in &self.writes {
            debug!(path = %path.display(), bytes = content.len(), "writing file");
            workspace.write_file(path, content)?;
        }
        info!(files = self.writes.len(), "materialized tree");

        Ok(())
    }

    fn load_blob_data(&self, oid: &ObjectId) -> Result<Bytes> {
        Ok(self
            .repository
            .database()
            .parse_object_as_blob(oid)?
            .into_content())
    }
}
