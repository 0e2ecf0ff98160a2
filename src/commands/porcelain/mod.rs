//! Porcelain commands
//!
//! User-facing workflows composed from the plumbing operations and the
//! storage areas. Like plumbing, they return values and leave all output to
//! the caller.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `commit`: Snapshot the working directory as a new commit
//! - `log`: Walk commit history
//! - `checkout`: Switch to a branch or detach at a commit
//! - `branch`: Create, list, or delete branches
//! - `tag`: Create tags
//! - `diff`: List paths changed between two commits

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod tag;
