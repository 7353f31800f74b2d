//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::MetatreeConfig;
use crate::error::MetadataError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project, with an optional explicit file on top.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<MetatreeConfig, MetadataError> {
        Ok(MergeService::load(project_root, explicit)?)
    }
}
