use crate::errors::Result;
use bytes::Bytes;
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Name of the storage directory inside the working tree
pub const STORAGE_DIR: &str = ".sit";

/// Kind of a directory entry as seen without following symbolic links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `path` belongs to storage bookkeeping rather than tracked content
    pub fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => name == STORAGE_DIR,
            _ => false,
        })
    }

    /// List the immediate children of a directory relative to the workspace root
    ///
    /// Symbolic links and other special files are skipped, never followed.
    pub fn list_dir(&self, dir_path: &Path) -> Result<Vec<(String, EntryKind)>> {
        let mut entries = Vec::new();

        for entry in std::fs::read_dir(self.path.join(dir_path))? {
            let entry = entry?;
            let relative_path = dir_path.join(entry.file_name());
            if Self::is_ignored(&relative_path) {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = %relative_path.display(), "skipping non UTF-8 file name");
                continue;
            };

            // DirEntry::file_type does not traverse symlinks
            let file_type = entry.file_type()?;
            if file_type.is_file() {
                entries.push((name, EntryKind::File));
            } else if file_type.is_dir() {
                entries.push((name, EntryKind::Directory));
            } else {
                debug!(path = %relative_path.display(), "skipping special file");
            }
        }

        Ok(entries)
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        Ok(Bytes::from(std::fs::read(self.path.join(file_path))?))
    }

    /// Write a file, creating its parent directories
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> Result<()> {
        let path = self.path.join(file_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // replace whatever occupies the path, including a stale symlink
        if path.symlink_metadata().is_ok_and(|metadata| !metadata.is_file()) {
            Self::remove_any(&path)?;
        }
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Remove all tracked content from the working directory
    ///
    /// Ignored entries are left alone, and so are directories that still hold
    /// them after their other children are removed.
    pub fn clear(&self) -> Result<()> {
        let entries = WalkDir::new(&self.path)
            .min_depth(1)
            .contents_first(true)
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .is_ok_and(|relative| !Self::is_ignored(relative))
            });

        for entry in entries {
            let entry = entry.map_err(std::io::Error::from)?;

            if entry.file_type().is_dir() {
                // a directory still holding ignored content stays
                if std::fs::remove_dir(entry.path()).is_err() {
                    debug!(path = %entry.path().display(), "keeping non-empty directory");
                }
            } else {
                std::fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }

    fn remove_any(path: &Path) -> Result<()> {
        if path.symlink_metadata()?.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }

        Ok(())
    }
}
