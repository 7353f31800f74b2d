//! Project descriptor collaborator (`sfdx-project.json`).

use crate::catalog::names::DEFAULT_PACKAGE_SUBPATH;
use crate::error::MetadataError;
use crate::fs::FileSystem;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_FILE: &str = "sfdx-project.json";

/// One package directory of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDescriptor {
    #[serde(default)]
    package_directories: Vec<PackageDirectory>,
}

#[derive(Debug, Deserialize)]
struct PackageDirectory {
    path: String,
    #[serde(default)]
    default: bool,
}

/// Resolve `root` to an absolute, existing directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, MetadataError> {
    if !root.exists() {
        return Err(MetadataError::unresolved(root, "path does not exist"));
    }
    if !root.is_dir() {
        return Err(MetadataError::unresolved(root, "path is not a directory"));
    }
    dunce::canonicalize(root).map_err(|e| MetadataError::unresolved(root, e.to_string()))
}

/// Package directories declared by the project at `root`.
///
/// Falls back to a single default root equal to `root` itself when the
/// descriptor is absent or declares no directories.
pub fn source_roots(fs: &dyn FileSystem, root: &Path) -> Result<Vec<SourceRoot>, MetadataError> {
    let descriptor_path = root.join(PROJECT_FILE);
    if !fs.is_file(&descriptor_path) {
        debug!(root = %root.display(), "No project descriptor, using root as source");
        return Ok(vec![SourceRoot {
            path: PathBuf::new(),
            is_default: true,
        }]);
    }
    let content = fs.read_to_string(&descriptor_path)?;
    let descriptor: ProjectDescriptor = serde_json::from_str(&content).map_err(|e| {
        MetadataError::InputShape(format!("{}: {}", descriptor_path.display(), e))
    })?;
    if descriptor.package_directories.is_empty() {
        return Ok(vec![SourceRoot {
            path: PathBuf::new(),
            is_default: true,
        }]);
    }
    Ok(descriptor
        .package_directories
        .into_iter()
        .map(|dir| SourceRoot {
            path: PathBuf::from(dir.path.trim_end_matches('/')),
            is_default: dir.default,
        })
        .collect())
}

/// Folder holding the category folders of a source root.
///
/// Prefers `<root>/<package>/main/default` and falls back to the package
/// directory itself.
pub fn metadata_folder(fs: &dyn FileSystem, root: &Path, source: &SourceRoot) -> PathBuf {
    let package = root.join(&source.path);
    let conventional = package.join(DEFAULT_PACKAGE_SUBPATH);
    if fs.is_dir(&conventional) {
        conventional
    } else {
        package
    }
}
