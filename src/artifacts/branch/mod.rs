//! Reference names and name resolution
//!
//! - `branch_name`: validated branch/tag names and full reference paths
//! - `revision`: resolution of user-supplied names (`@`, refs, OIDs,
//!   `name^`, `name~n`) to commit OIDs

pub mod branch_name;
pub mod revision;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

/// Namespace holding branch references
pub const HEADS_PREFIX: &str = "refs/heads/";
/// Namespace holding tag references
pub const TAGS_PREFIX: &str = "refs/tags/";
