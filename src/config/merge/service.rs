//! MergeService: orchestrates sources, applies merge policy, deserializes to MetatreeConfig.

use crate::config::sources::{environment, explicit_file, project_file};
use crate::config::MetatreeConfig;
use config::ConfigError;
use std::path::Path;
use tracing::debug;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a project.
    /// Precedence: defaults (lowest) -> project file -> explicit file -> environment (highest).
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<MetatreeConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = project_file::add_to_builder(builder, project_root)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        debug!(root = %project_root.display(), explicit = ?explicit, "Merged configuration");
        config.try_deserialize()
    }
}
