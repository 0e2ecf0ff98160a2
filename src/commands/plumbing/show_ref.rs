use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::errors::Result;

impl Repository {
    /// HEAD and every reference whose full name starts with `prefix`
    ///
    /// The prefix is compared as a plain string, so `refs/heads/fea` also
    /// matches `refs/heads/feature`.
    pub fn show_ref(&self, prefix: &str, dereference: bool) -> Result<Vec<(SymRefName, RefValue)>> {
        self.refs().list_refs(prefix, dereference)
    }
}
