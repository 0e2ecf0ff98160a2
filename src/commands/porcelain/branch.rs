use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, SitError};
use tracing::info;

/// A branch as shown by a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub oid: Option<ObjectId>,
    /// HEAD is attached to this branch
    pub is_current: bool,
}

impl Repository {
    /// Create a branch at `start` (HEAD when absent) and return its commit
    pub fn branch(&self, branch_name: &str, start: Option<&str>) -> Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let sym_ref_name = SymRefName::branch(&branch_name);
        self.ensure_ref_absent(&sym_ref_name)?;

        let oid = self.resolve_start_point(start)?;
        self.refs().create_branch(&branch_name, &oid)?;
        info!(branch = %branch_name, %oid, "created branch");

        Ok(oid)
    }

    pub fn branches(&self) -> Result<Vec<BranchInfo>> {
        let current_ref = self.refs().current_ref()?;

        self.refs()
            .list_branches()?
            .into_iter()
            .map(|sym_ref_name| {
                let oid = self.refs().read_ref(&sym_ref_name, true)?.oid()?;
                Ok(BranchInfo {
                    name: sym_ref_name.short_name().to_string(),
                    oid,
                    is_current: sym_ref_name == current_ref,
                })
            })
            .collect()
    }

    /// Delete a branch, returning the commit it pointed at
    pub fn delete_branch(&self, branch_name: &str) -> Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let oid = self
            .refs()
            .delete_branch(&branch_name)?
            .ok_or_else(|| SitError::UnknownName {
                name: branch_name.to_string(),
            })?;
        info!(branch = %branch_name, %oid, "deleted branch");

        Ok(oid)
    }

    pub(crate) fn resolve_start_point(&self, start: Option<&str>) -> Result<ObjectId> {
        let oid = match start {
            Some(start) => self.resolve_name(start)?,
            None => self.refs().read_head()?.ok_or_else(|| SitError::UnknownName {
                name: SymRefName::head().to_string(),
            })?,
        };

        if !self.database().exists(&oid) {
            return Err(SitError::ObjectNotFound {
                oid: oid.to_string(),
            });
        }

        Ok(oid)
    }

    pub(crate) fn ensure_ref_absent(&self, sym_ref_name: &SymRefName) -> Result<()> {
        if self.refs().read_ref(sym_ref_name, false)?.is_set() {
            return Err(SitError::RefExists {
                name: sym_ref_name.to_string(),
            });
        }

        Ok(())
    }
}
