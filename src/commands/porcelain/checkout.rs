use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, SitError};
use tracing::{info, warn};

/// Where HEAD ended up after a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Commit now materialized in the working directory
    pub oid: ObjectId,
    /// Reference HEAD pointed through before the checkout
    pub previous_ref: SymRefName,
    /// Branch HEAD is attached to, `None` when detached
    pub branch: Option<BranchName>,
}

impl CheckoutOutcome {
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }
}

impl Repository {
    /// Materialize the commit `name` resolves to and move HEAD onto it
    ///
    /// A branch name attaches HEAD to that branch; anything else detaches it
    /// at the resolved commit. HEAD itself is rewritten, never the ref it
    /// pointed through, so checkout also repairs a HEAD whose chain is broken.
    pub fn checkout(&self, name: &str) -> Result<CheckoutOutcome> {
        let previous_ref = match self.refs().current_ref() {
            Ok(previous_ref) => previous_ref,
            Err(SitError::BrokenReferenceChain { name: reference, hops }) => {
                warn!(%reference, hops, "HEAD does not resolve, rewriting it");
                SymRefName::head()
            }
            Err(e) => return Err(e),
        };

        let oid = self.resolve_name(name)?;
        let commit = self.get_commit(&oid)?;
        self.checkout_tree(commit.tree_oid())?;

        let branch = if self.refs().is_branch(name)? {
            let branch_name = BranchName::try_parse(name.to_string())?;
            self.refs()
                .set_head(RefValue::symbolic(&SymRefName::branch(&branch_name)))?;
            Some(branch_name)
        } else {
            self.refs().set_head(RefValue::direct(&oid))?;
            None
        };

        info!(revision = name, %oid, detached = branch.is_none(), "checked out");

        Ok(CheckoutOutcome {
            oid,
            previous_ref,
            branch,
        })
    }
}
