use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::{STORAGE_DIR, Workspace};
use crate::errors::{Result, SitError};
use std::path::Path;

/// A repository rooted at an explicit working directory
///
/// Every operation goes through the areas owned here, so several
/// repositories can be used side by side in one process.
#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let storage_path = path.join(STORAGE_DIR);
        let database = Database::new(storage_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(storage_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            database,
            workspace,
            refs,
        })
    }

    /// Open an existing repository, failing if it was never initialized
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(SitError::NotInitialized {
                path: path.display().to_string(),
            });
        }

        let repository = Self::new(path)?;
        if !repository.storage_path().is_dir() {
            return Err(SitError::NotInitialized {
                path: repository.path.display().to_string(),
            });
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn storage_path(&self) -> std::path::PathBuf {
        self.path.join(STORAGE_DIR)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
