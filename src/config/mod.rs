//! Configuration
//!
//! Layered settings for logging, directory scans and diff classification.
//! Sources are merged lowest to highest: built-in defaults, the project's
//! `.metatree.toml`, an explicit `--config` file, then `METATREE__*`
//! environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::diff::DEFAULT_IGNORED_FILES;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File name of the per-project configuration.
pub const PROJECT_CONFIG_FILE: &str = ".metatree.toml";

/// Prefix of environment overrides (`METATREE__SCAN__REMOVE_EMPTY=false`).
pub const ENV_PREFIX: &str = "METATREE";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetatreeConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub diff: DiffConfig,
}

/// Directory and manifest builder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Group global quick actions under one `GlobalActions` Object.
    #[serde(default)]
    pub group_global_actions: bool,

    /// Drop Types without Objects from deserialized catalogs.
    #[serde(default = "default_true")]
    pub remove_empty: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            group_global_actions: false,
            remove_empty: default_true(),
        }
    }
}

/// Diff classifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// File names never classified.
    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            ignored_files: default_ignored_files(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ignored_files() -> Vec<String> {
    DEFAULT_IGNORED_FILES.iter().map(|f| f.to_string()).collect()
}
