//! Error types for catalog construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the catalog builders, importers and bridges.
///
/// Missing optional folders, unmatched namespaces and unrecognized diff
/// files are not errors; they are skipped and logged at debug level.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Supplied response, manifest or tree is not parseable or lacks required fields.
    #[error("Invalid input: {0}")]
    InputShape(String),

    /// A required root, folder or file cannot be resolved.
    #[error("Cannot resolve path {path:?}: {reason}")]
    PathResolution { path: PathBuf, reason: String },

    /// A manifest-like input lacks its `Package` container.
    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    /// Input is neither markup, a pre-parsed structure nor a readable file.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// A serialized tree node is missing or mistypes a required field.
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MetadataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetadataError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unresolved(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        MetadataError::PathResolution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for MetadataError {
    fn from(err: config::ConfigError) -> Self {
        MetadataError::Config(err.to_string())
    }
}

impl From<quick_xml::Error> for MetadataError {
    fn from(err: quick_xml::Error) -> Self {
        MetadataError::InputShape(format!("markup: {}", err))
    }
}
