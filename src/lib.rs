//! Metatree: Hierarchical Metadata Catalogs
//!
//! Builds a three-level catalog (category Type → Object → Item) of a
//! Salesforce-style project from its source folders, from a package manifest,
//! or from a diff between two revisions, and moves catalogs to and from JSON.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod describe;
pub mod diff;
pub mod error;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod markup;
pub mod project;
pub mod records;
pub mod scan;
pub mod serialize;
pub mod tooling;
pub mod tree;
pub mod types;

pub use describe::{create_metadata_details, FolderMetadataMap, MetadataDetail};
pub use diff::{ChangeMode, DiffClassifier, DiffRecord, DiffResult};
pub use error::MetadataError;
pub use manifest::{create_metadata_types_from_manifest, ManifestInput};
pub use scan::DirectoryTreeBuilder;
pub use tree::{MetadataItem, MetadataObject, MetadataType};
pub use types::MetadataTree;
