use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Commits reachable from `starting_oids`, breadth-first and each once
    pub fn iterate_history(&self, starting_oids: impl IntoIterator<Item = ObjectId>) -> RevList<'_> {
        RevList::new(self.database(), starting_oids)
    }

    /// History from `name` (HEAD when absent), paired with the parsed commits
    ///
    /// An unborn HEAD yields an empty history rather than an error.
    pub fn log(
        &self,
        name: Option<&str>,
    ) -> Result<impl Iterator<Item = Result<(ObjectId, Commit)>> + '_> {
        let start = match name {
            Some(name) => Some(self.resolve_name(name)?),
            None => self.refs().read_head()?,
        };

        Ok(self.iterate_history(start).with_commits())
    }
}
