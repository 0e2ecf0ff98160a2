use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChangeType {
    Added(ObjectId),
    Deleted(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl TreeChangeType {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(TreeChangeType::Added(new.clone())),
            (Some(old), None) => Some(TreeChangeType::Deleted(old.clone())),
            (Some(old), Some(new)) if old != new => Some(TreeChangeType::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None, // No change or both are None
        }
    }

    pub fn old_oid(&self) -> Option<&ObjectId> {
        match self {
            TreeChangeType::Deleted(oid) => Some(oid),
            TreeChangeType::Modified { old, .. } => Some(old),
            TreeChangeType::Added(_) => None,
        }
    }

    pub fn new_oid(&self) -> Option<&ObjectId> {
        match self {
            TreeChangeType::Added(oid) => Some(oid),
            TreeChangeType::Modified { new, .. } => Some(new),
            TreeChangeType::Deleted(_) => None,
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            TreeChangeType::Added(_) => 'A',
            TreeChangeType::Deleted(_) => 'D',
            TreeChangeType::Modified { .. } => 'M',
        }
    }
}

pub type ChangeSet = BTreeMap<String, TreeChangeType>;

/// Line up several flat trees path by path
///
/// Every path present in at least one tree maps to one slot per input tree,
/// holding that tree's OID for the path or `None` when it lacks it.
pub fn compare_trees<'t>(trees: &[&'t FlatTree]) -> BTreeMap<&'t str, Vec<Option<&'t ObjectId>>> {
    let mut compared: BTreeMap<&str, Vec<Option<&ObjectId>>> = BTreeMap::new();

    for (index, tree) in trees.iter().enumerate() {
        for (path, oid) in tree.iter() {
            compared.entry(path.as_str()).or_insert_with(|| vec![None; trees.len()])[index] =
                Some(oid);
        }
    }

    compared
}

/// Paths whose blob differs between two flat trees
pub fn changed_paths(from: &FlatTree, to: &FlatTree) -> ChangeSet {
    compare_trees(&[from, to])
        .into_iter()
        .filter_map(|(path, oids)| {
            TreeChangeType::from_entries(oids[0], oids[1]).map(|change| (path.to_string(), change))
        })
        .collect()
}
