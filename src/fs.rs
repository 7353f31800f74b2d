//! File-system collaborator.
//!
//! The scanners only need directory listings, existence checks and text
//! reads. Abstracting them keeps the layout logic testable without a disk.

use crate::error::MetadataError;
use std::path::Path;
use walkdir::WalkDir;

/// Read-only file-system access used by the directory scanner.
pub trait FileSystem {
    /// Names of the immediate entries of `path`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a readable directory.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, MetadataError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, MetadataError>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, MetadataError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                MetadataError::io(path, source)
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, MetadataError> {
        std::fs::read_to_string(path).map_err(|e| MetadataError::io(path, e))
    }
}

/// List `path` when it is a directory; a missing folder is an empty listing.
pub fn list_if_dir(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>, MetadataError> {
    if fs.is_dir(path) {
        fs.list_dir(path)
    } else {
        Ok(Vec::new())
    }
}
