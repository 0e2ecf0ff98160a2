use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::branch::{
    ANCESTOR_REGEX, HEADS_PREFIX, PARENT_REGEX, REF_ALIASES, TAGS_PREFIX,
};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, SitError};
use std::sync::LazyLock;
use tracing::trace;

static PARENT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(PARENT_REGEX).expect("parent regex is valid"));
static ANCESTOR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(ANCESTOR_REGEX).expect("ancestor regex is valid"));

/// Represents a revision specification that can be used to identify commits.
///
/// Supports multiple formats:
/// - Ref names: `main`, `tags/v1`, `refs/heads/main`, `HEAD`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full OIDs: 64-character hexadecimal strings (tried after refs)
/// - Parent notation: `<revision>^` (e.g., `main^`, `HEAD^`)
/// - Ancestor notation: `<revision>~<n>` (e.g., `main~3`, `HEAD~5`)
///
/// # Resolution order
///
/// A bare name is tried against `<name>`, `refs/<name>`, `refs/tags/<name>`
/// and `refs/heads/<name>` in that order; the first reference holding a value
/// wins, so a tag shadows a branch of the same name. Only when no reference
/// matches is a full-length hex string taken as an object ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A reference name or object ID
    Ref(String),
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn try_parse(revision: &str) -> Result<Revision> {
        if let Some(caps) = PARENT.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ANCESTOR.captures(revision) {
            let generations = caps[2].parse().map_err(|_| SitError::UnknownName {
                name: revision.to_string(),
            })?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            BranchName::try_parse(resolved_name.to_string()).map_err(|_| {
                SitError::UnknownName {
                    name: revision.to_string(),
                }
            })?;

            Ok(Revision::Ref(resolved_name.to_string()))
        }
    }

    pub fn resolve(&self, repository: &Repository) -> Result<ObjectId> {
        match self {
            Revision::Ref(name) => Self::resolve_ref(name, repository),
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                self.resolve_commit_parent(&oid, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = self.resolve_commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    /// Reference paths tried for a bare name, in precedence order
    pub fn candidates(name: &str) -> [String; 4] {
        [
            name.to_string(),
            format!("refs/{name}"),
            format!("{TAGS_PREFIX}{name}"),
            format!("{HEADS_PREFIX}{name}"),
        ]
    }

    fn resolve_ref(name: &str, repository: &Repository) -> Result<ObjectId> {
        for candidate in Self::candidates(name) {
            let value = repository
                .refs()
                .read_ref(&SymRefName::new(candidate.clone()), true)?;

            if let Some(oid) = value.oid()? {
                trace!(revision = name, candidate = %candidate, oid = %oid, "resolved name through ref");
                return Ok(oid);
            }
        }

        if ObjectId::is_valid(name) {
            return ObjectId::try_parse(name.to_string());
        }

        Err(SitError::UnknownName {
            name: name.to_string(),
        })
    }

    fn resolve_commit_parent(&self, oid: &ObjectId, repository: &Repository) -> Result<ObjectId> {
        repository
            .database()
            .parse_object_as_commit(oid)?
            .parent()
            .cloned()
            .ok_or_else(|| SitError::UnknownName {
                name: self.to_string(),
            })
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
