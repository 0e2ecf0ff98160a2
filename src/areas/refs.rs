//! References (branches, HEAD, tags)
//!
//! References are human-readable names pointing into the object space.
//! A reference value can be:
//! - Direct: holding an object ID
//! - Symbolic: naming another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Reference Types
//!
//! - HEAD: Special reference denoting the current position in history
//! - Branches: refs/heads/* pointing to branch tip commits
//! - Tags: refs/tags/* pointing to tagged commits
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 64-character object ID (direct reference)
//! - `ref: <path>` for symbolic references
//!
//! A missing or empty file is the "unset" state, not an error.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName, TagName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, SitError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref:\s*(.+)$";

static SYMREF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(SYMREF_REGEX).expect("symref regex is valid"));

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Upper bound on symbolic hops before a chain is considered broken
pub const MAX_SYMREF_DEPTH: usize = 32;

/// Value of a reference, as written or as resolved
///
/// `value` is `None` for an unset reference. For a symbolic value it holds
/// the target reference name, otherwise the object ID text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefValue {
    pub symbolic: bool,
    pub value: Option<String>,
}

impl RefValue {
    pub fn direct(oid: &ObjectId) -> Self {
        RefValue {
            symbolic: false,
            value: Some(oid.to_string()),
        }
    }

    pub fn symbolic(target: &SymRefName) -> Self {
        RefValue {
            symbolic: true,
            value: Some(target.to_string()),
        }
    }

    pub fn unset() -> Self {
        RefValue {
            symbolic: false,
            value: None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.as_deref().is_some_and(|value| !value.is_empty())
    }

    /// The object ID held by a direct value, `None` when unset or symbolic
    pub fn oid(&self) -> Result<Option<ObjectId>> {
        match (&self.value, self.symbolic) {
            (Some(value), false) => Ok(Some(ObjectId::try_parse(value.clone())?)),
            _ => Ok(None),
        }
    }

    fn read(path: &Path) -> Result<RefValue> {
        if !path.is_file() {
            return Ok(RefValue::unset());
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(RefValue::unset());
        }

        match SYMREF.captures(content) {
            Some(symref_match) => Ok(RefValue {
                symbolic: true,
                value: Some(symref_match[1].trim().to_string()),
            }),
            None => Ok(RefValue {
                symbolic: false,
                value: Some(content.to_string()),
            }),
        }
    }

    fn to_file_content(&self, value: &str) -> String {
        if self.symbolic {
            format!("ref: {value}")
        } else {
            value.to_string()
        }
    }
}

/// References manager
///
/// Handles reading and writing references below the storage root.
#[derive(Debug)]
pub struct Refs {
    /// Path to the storage directory (typically `.sit`)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    /// Write `value` to the reference `name`
    ///
    /// With `dereference`, the symbolic chain starting at `name` is followed
    /// and the terminal reference is written instead.
    pub fn update_ref(&self, name: &SymRefName, value: RefValue, dereference: bool) -> Result<()> {
        let Some(target) = value.value.as_deref().filter(|target| !target.is_empty()) else {
            return Err(SitError::EmptyValue {
                name: name.to_string(),
            });
        };

        let name = if dereference {
            self.resolve_chain(name, true)?.0
        } else {
            name.clone()
        };

        let path = self.ref_path(&name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, value.to_file_content(target))?;
        debug!(reference = %name, value = target, symbolic = value.symbolic, "updated ref");

        Ok(())
    }

    /// Read the reference `name`, following symbolic links when `dereference`
    pub fn read_ref(&self, name: &SymRefName, dereference: bool) -> Result<RefValue> {
        Ok(self.resolve_chain(name, dereference)?.1)
    }

    /// Enumerate HEAD and every reference under `refs/` whose full name
    /// starts with `prefix` (plain string prefix)
    pub fn list_refs(
        &self,
        prefix: &str,
        dereference: bool,
    ) -> Result<Vec<(SymRefName, RefValue)>> {
        self.list_all_refs()?
            .into_iter()
            .filter(|name| name.as_ref_path().starts_with(prefix))
            .map(|name| {
                let value = self.read_ref(&name, dereference)?;
                Ok((name, value))
            })
            .collect()
    }

    /// Follow the chain starting at `name`, returning the terminal reference
    /// and its value
    ///
    /// Without `dereference` the chain stops at `name` itself.
    fn resolve_chain(&self, name: &SymRefName, dereference: bool) -> Result<(SymRefName, RefValue)> {
        let mut current = name.clone();
        let mut visited = HashSet::new();

        loop {
            if !visited.insert(current.clone()) || visited.len() > MAX_SYMREF_DEPTH {
                return Err(SitError::BrokenReferenceChain {
                    name: name.to_string(),
                    hops: visited.len(),
                });
            }

            let value = RefValue::read(&self.ref_path(&current))?;
            trace!(reference = %current, ?value, "read ref");

            match (&value.value, value.symbolic && dereference) {
                (Some(target), true) => current = SymRefName::new(target.clone()),
                _ => return Ok((current, value)),
            }
        }
    }

    /// The reference HEAD ultimately points through (HEAD itself when detached)
    pub fn current_ref(&self) -> Result<SymRefName> {
        Ok(self.resolve_chain(&SymRefName::head(), true)?.0)
    }

    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_ref(&SymRefName::head(), true)?.oid()
    }

    /// Move whatever HEAD points through to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        self.update_ref(&SymRefName::head(), RefValue::direct(oid), true)
    }

    /// Rewire HEAD itself
    pub fn set_head(&self, value: RefValue) -> Result<()> {
        self.update_ref(&SymRefName::head(), value, false)
    }

    /// A name is a branch iff `refs/heads/<name>` resolves to a value
    pub fn is_branch(&self, name: &str) -> Result<bool> {
        let Ok(branch_name) = BranchName::try_parse(name.to_string()) else {
            return Ok(false);
        };

        Ok(self
            .read_ref(&SymRefName::branch(&branch_name), true)?
            .is_set())
    }

    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> Result<()> {
        self.update_ref(&SymRefName::branch(name), RefValue::direct(oid), true)
    }

    pub fn create_tag(&self, name: &TagName, oid: &ObjectId) -> Result<()> {
        self.update_ref(&SymRefName::tag(name), RefValue::direct(oid), true)
    }

    /// Remove a branch file, returning the OID it pointed at
    pub fn delete_branch(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        let sym_ref_name = SymRefName::branch(name);
        let branch_path = self.ref_path(&sym_ref_name);
        let oid = self.read_ref(&sym_ref_name, false)?.oid()?;

        if branch_path.is_file() {
            std::fs::remove_file(&branch_path)?;
            self.prune_empty_parent_dirs(&branch_path)?;
            debug!(reference = %sym_ref_name, "deleted branch");
        }

        Ok(oid)
    }

    pub fn list_branches(&self) -> Result<Vec<SymRefName>> {
        self.list_refs_under(&self.heads_path())
    }

    /// Map from object ID to every reference that resolves to it
    pub fn reverse_refs(&self) -> Result<HashMap<ObjectId, Vec<SymRefName>>> {
        let mut reverse = HashMap::new();
        for (name, value) in self.list_refs("", true)? {
            if let Ok(Some(oid)) = value.oid() {
                reverse.entry(oid).or_insert_with(Vec::new).push(name);
            }
        }

        Ok(reverse)
    }

    fn list_all_refs(&self) -> Result<Vec<SymRefName>> {
        Ok(std::iter::once(SymRefName::head())
            .chain(self.list_refs_under(&self.refs_path())?)
            .collect())
    }

    fn list_refs_under(&self, path: &Path) -> Result<Vec<SymRefName>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(relative_path) = entry.path().strip_prefix(&self.path) {
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                names.push(SymRefName::new(name));
            }
        }

        Ok(names)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn ref_path(&self, name: &SymRefName) -> PathBuf {
        self.path.join(name.as_ref_path())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn refs(dir: &TempDir) -> Refs {
        Refs::new(dir.path().to_path_buf().into_boxed_path())
    }

    fn main_ref() -> SymRefName {
        SymRefName::new("refs/heads/main".to_string())
    }

    #[test]
    fn absent_ref_is_unset() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);

        assert_eq!(refs.read_ref(&SymRefName::head(), true)?, RefValue::unset());
        assert_eq!(refs.read_head()?, None);

        Ok(())
    }

    #[test]
    fn symbolic_head_resolves_through_branch() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"commit");

        refs.update_ref(&SymRefName::head(), RefValue::symbolic(&main_ref()), false)?;
        refs.update_ref(&main_ref(), RefValue::direct(&oid), true)?;

        assert_eq!(
            refs.read_ref(&SymRefName::head(), true)?,
            RefValue {
                symbolic: false,
                value: Some(oid.to_string())
            }
        );
        assert_eq!(
            refs.read_ref(&SymRefName::head(), false)?,
            RefValue {
                symbolic: true,
                value: Some("refs/heads/main".to_string())
            }
        );
        assert_eq!(std::fs::read_to_string(refs.head_path())?, "ref: refs/heads/main");

        Ok(())
    }

    #[test]
    fn dereferenced_update_moves_the_branch() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"tip");

        refs.set_head(RefValue::symbolic(&main_ref()))?;
        refs.update_head(&oid)?;

        assert_eq!(refs.read_ref(&main_ref(), false)?.oid()?, Some(oid.clone()));
        assert!(refs.read_ref(&SymRefName::head(), false)?.symbolic);
        assert_eq!(refs.current_ref()?, main_ref());

        Ok(())
    }

    #[test]
    fn non_dereferenced_update_rewires_head() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let branch_tip = ObjectId::hash(b"branch tip");
        let detached = ObjectId::hash(b"detached");

        refs.set_head(RefValue::symbolic(&main_ref()))?;
        refs.update_head(&branch_tip)?;
        refs.set_head(RefValue::direct(&detached))?;

        assert_eq!(refs.read_head()?, Some(detached));
        assert_eq!(refs.read_ref(&main_ref(), true)?.oid()?, Some(branch_tip));
        assert_eq!(refs.current_ref()?, SymRefName::head());

        Ok(())
    }

    #[test]
    fn empty_value_is_rejected_before_writing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);

        let result = refs.update_ref(&main_ref(), RefValue::unset(), true);
        assert!(matches!(result, Err(SitError::EmptyValue { .. })));

        let empty = RefValue {
            symbolic: false,
            value: Some(String::new()),
        };
        assert!(matches!(
            refs.update_ref(&main_ref(), empty, false),
            Err(SitError::EmptyValue { .. })
        ));
        assert!(!refs.heads_path().join("main").exists());

        Ok(())
    }

    #[test]
    fn cyclic_chain_is_broken() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let a = SymRefName::new("refs/heads/a".to_string());
        let b = SymRefName::new("refs/heads/b".to_string());

        refs.update_ref(&a, RefValue::symbolic(&b), false)?;
        refs.update_ref(&b, RefValue::symbolic(&a), false)?;

        assert!(matches!(
            refs.read_ref(&a, true),
            Err(SitError::BrokenReferenceChain { .. })
        ));
        assert!(refs.read_ref(&a, false)?.symbolic);

        Ok(())
    }

    /// Write `refs/heads/r0 -> r1 -> ... -> r<length-1> -> oid` and return `r0`
    fn write_chain(refs: &Refs, length: usize, oid: &ObjectId) -> Result<SymRefName> {
        let link = |index: usize| SymRefName::new(format!("refs/heads/r{index}"));

        for index in 0..length - 1 {
            refs.update_ref(&link(index), RefValue::symbolic(&link(index + 1)), false)?;
        }
        refs.update_ref(&link(length - 1), RefValue::direct(oid), false)?;

        Ok(link(0))
    }

    #[test]
    fn long_acyclic_chain_resolves_up_to_the_hop_cap() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"end of chain");

        let start = write_chain(&refs, MAX_SYMREF_DEPTH, &oid)?;

        assert_eq!(refs.read_ref(&start, true)?, RefValue::direct(&oid));

        Ok(())
    }

    #[test]
    fn acyclic_chain_past_the_hop_cap_is_broken() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"end of chain");

        let start = write_chain(&refs, MAX_SYMREF_DEPTH + 1, &oid)?;

        assert!(matches!(
            refs.read_ref(&start, true),
            Err(SitError::BrokenReferenceChain { hops, .. }) if hops == MAX_SYMREF_DEPTH + 1
        ));
        assert!(refs.read_ref(&start, false)?.symbolic);

        Ok(())
    }

    #[test]
    fn self_reference_is_broken() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);

        refs.set_head(RefValue::symbolic(&SymRefName::head()))?;

        assert!(matches!(
            refs.read_head(),
            Err(SitError::BrokenReferenceChain { .. })
        ));
        assert!(matches!(
            refs.update_head(&ObjectId::hash(b"x")),
            Err(SitError::BrokenReferenceChain { .. })
        ));

        Ok(())
    }

    #[test]
    fn list_uses_plain_string_prefix() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"x");

        for name in ["feature", "fix", "master"] {
            refs.create_branch(&BranchName::try_parse(name.to_string())?, &oid)?;
        }
        refs.create_tag(&BranchName::try_parse("v1".to_string())?, &oid)?;
        refs.set_head(RefValue::symbolic(&SymRefName::new(
            "refs/heads/master".to_string(),
        )))?;

        let all = refs
            .list_refs("", true)?
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            all,
            vec![
                "HEAD",
                "refs/heads/feature",
                "refs/heads/fix",
                "refs/heads/master",
                "refs/tags/v1"
            ]
        );

        let matching = refs
            .list_refs("refs/heads/f", false)?
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect::<Vec<_>>();
        assert_eq!(
            matching,
            vec![
                ("refs/heads/feature".to_string(), RefValue::direct(&oid)),
                ("refs/heads/fix".to_string(), RefValue::direct(&oid)),
            ]
        );

        let head = refs.list_refs("HEAD", false)?;
        assert_eq!(head.len(), 1);
        assert!(head[0].1.symbolic);

        Ok(())
    }

    #[test]
    fn delete_branch_prunes_empty_directories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"x");
        let name = BranchName::try_parse("feature/nested".to_string())?;

        refs.create_branch(&name, &oid)?;
        assert!(refs.is_branch("feature/nested")?);

        assert_eq!(refs.delete_branch(&name)?, Some(oid));
        assert!(!refs.is_branch("feature/nested")?);
        assert!(!refs.heads_path().join("feature").exists());

        Ok(())
    }

    #[test]
    fn reverse_refs_groups_names_by_oid() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let refs = refs(&dir);
        let oid = ObjectId::hash(b"x");

        refs.set_head(RefValue::symbolic(&main_ref()))?;
        refs.update_head(&oid)?;

        let reverse = refs.reverse_refs()?;
        assert_eq!(
            reverse.get(&oid).cloned().unwrap_or_default(),
            vec![SymRefName::head(), main_ref()]
        );

        Ok(())
    }
}
