use crate::artifacts::branch::{HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX, TAGS_PREFIX};
use crate::errors::{Result, SitError};
use derive_new::new;
use std::sync::LazyLock;

static INVALID_BRANCH_NAME: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(INVALID_BRANCH_NAME_REGEX).expect("branch name regex is valid")
});

/// Full path of a reference below the storage root, e.g. `HEAD` or `refs/heads/master`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn head() -> Self {
        Self(crate::areas::refs::HEAD_REF_NAME.to_string())
    }

    pub fn branch(name: &BranchName) -> Self {
        Self(format!("{HEADS_PREFIX}{name}"))
    }

    pub fn tag(name: &TagName) -> Self {
        Self(format!("{TAGS_PREFIX}{name}"))
    }

    pub fn is_head(&self) -> bool {
        self.0 == crate::areas::refs::HEAD_REF_NAME
    }

    /// The short branch name if this ref lives under `refs/heads/`
    pub fn branch_name(&self) -> Option<&str> {
        self.0.strip_prefix(HEADS_PREFIX)
    }

    /// Short name for display: branch and tag prefixes stripped
    pub fn short_name(&self) -> &str {
        self.0
            .strip_prefix(HEADS_PREFIX)
            .or_else(|| self.0.strip_prefix(TAGS_PREFIX))
            .unwrap_or(&self.0)
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short, validated name of a branch (also used for tags)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

pub type TagName = BranchName;

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() || INVALID_BRANCH_NAME.is_match(&name) {
            return Err(SitError::InvalidRefName { name });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
