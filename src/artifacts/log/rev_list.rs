use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::{HashSet, VecDeque};

/// Lazy walk over the commits reachable from a set of starting points
///
/// Commits are produced breadth-first in queue insertion order and each one
/// at most once, even when reachable from several starts. A commit that
/// cannot be read ends the walk with its error.
pub struct RevList<'r> {
    database: &'r Database,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
    failed: bool,
}

impl<'r> RevList<'r> {
    pub fn new(database: &'r Database, starting_oids: impl IntoIterator<Item = ObjectId>) -> Self {
        RevList {
            database,
            queue: starting_oids.into_iter().collect(),
            visited: HashSet::new(),
            failed: false,
        }
    }

    /// Pair every OID with its parsed commit
    pub fn with_commits(mut self) -> impl Iterator<Item = Result<(ObjectId, Commit)>> + 'r {
        std::iter::from_fn(move || self.next_commit())
    }

    fn next_commit(&mut self) -> Option<Result<(ObjectId, Commit)>> {
        if self.failed {
            return None;
        }

        while let Some(oid) = self.queue.pop_front() {
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            return match self.database.parse_object_as_commit(&oid) {
                Ok(commit) => {
                    if let Some(parent) = commit.parent() {
                        self.queue.push_back(parent.clone());
                    }
                    Some(Ok((oid, commit)))
                }
                Err(e) => {
                    self.failed = true;
                    Some(Err(e))
                }
            };
        }

        None
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_commit().map(|entry| entry.map(|(oid, _)| oid))
    }
}
