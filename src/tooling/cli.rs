//! CLI Tooling
//!
//! Command-line interface over the catalog builders. Every command reads its
//! inputs from files, builds a fresh catalog and renders it as JSON or as a
//! text summary.

use crate::config::{ConfigLoader, MetatreeConfig};
use crate::describe::{self, FolderMetadataMap, MetadataDetail};
use crate::diff::{self, DiffClassifier};
use crate::error::MetadataError;
use crate::fs::LocalFileSystem;
use crate::logging::LoggingConfig;
use crate::manifest::{self, ManifestInput};
use crate::project;
use crate::scan::DirectoryTreeBuilder;
use crate::serialize;
use crate::tooling::format::{
    format_catalog_text, format_details_text, format_diff_text,
};
use crate::tree;
use crate::types::MetadataTree;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Metatree CLI - hierarchical metadata catalogs
#[derive(Parser)]
#[command(name = "metatree")]
#[command(about = "Build metadata catalogs from project folders, manifests and diffs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file path (layered over the project's .metatree.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging settings from the loaded configuration with CLI flags applied.
    pub fn logging_config(&self, config: &MetatreeConfig) -> LoggingConfig {
        let mut logging = config.logging.clone();
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a describe-metadata response into category details
    Details {
        /// Describe-metadata JSON file
        #[arg(long)]
        describe: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Scan the project folders into a catalog
    Scan {
        /// Describe-metadata JSON file
        #[arg(long)]
        describe: PathBuf,
        /// Group global quick actions under GlobalActions
        #[arg(long)]
        group_global_actions: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Import a package manifest into a catalog
    Manifest {
        /// Manifest file (package.xml or its JSON form)
        file: PathBuf,
        /// Group global quick actions under GlobalActions
        #[arg(long)]
        group_global_actions: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Classify changed files into to-deploy and to-delete catalogs
    Diff {
        /// Describe-metadata JSON file
        #[arg(long)]
        describe: PathBuf,
        /// JSON array of change records, or unified diff text
        #[arg(long)]
        diffs: PathBuf,
        /// Group global quick actions under GlobalActions
        #[arg(long)]
        group_global_actions: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Merge serialized catalogs into one
    Combine {
        /// Catalog JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "json")]
        format: String,
    },
}

/// CLI context for executing commands against one project.
pub struct CliContext {
    project_root: PathBuf,
    config: MetatreeConfig,
}

impl CliContext {
    /// Resolve the project root and load its configuration.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, MetadataError> {
        let project_root = project::resolve_root(&project_root)?;
        let config = ConfigLoader::load(&project_root, config_path.as_deref())?;
        Ok(Self {
            project_root,
            config,
        })
    }

    pub fn config(&self) -> &MetatreeConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Execute a CLI command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, MetadataError> {
        match command {
            Commands::Details { describe, format } => {
                let details =
                    describe::details_from_path(&LocalFileSystem, &self.resolve_input(describe))?;
                info!(categories = details.len(), "Flattened describe response");
                match format.as_str() {
                    "json" => to_json(&details),
                    _ => Ok(format_details_text(&details)),
                }
            }
            Commands::Scan {
                describe,
                group_global_actions,
                format,
            } => {
                let folder_map = self.folder_map(describe)?;
                let catalog = DirectoryTreeBuilder::new(&LocalFileSystem)
                    .with_group_global_actions(self.group_global_actions(*group_global_actions))
                    .build(&self.project_root, &folder_map)?;
                render_catalog("Project catalog", &catalog, format)
            }
            Commands::Manifest {
                file,
                group_global_actions,
                format,
            } => {
                let input = ManifestInput::Path(self.resolve_input(file));
                let catalog = manifest::create_metadata_types_from_manifest(
                    input,
                    self.group_global_actions(*group_global_actions),
                )?;
                render_catalog("Manifest catalog", &catalog, format)
            }
            Commands::Diff {
                describe,
                diffs,
                group_global_actions,
                format,
            } => {
                let folder_map = self.folder_map(describe)?;
                let path = self.resolve_input(diffs);
                let text =
                    std::fs::read_to_string(&path).map_err(|e| MetadataError::io(&path, e))?;
                let records = diff::records_from_str(&text)?;
                let roots: Vec<String> = project::source_roots(&LocalFileSystem, &self.project_root)?
                    .into_iter()
                    .map(|root| root.path.to_string_lossy().into_owned())
                    .collect();
                let result = DiffClassifier::new(&folder_map)
                    .with_source_roots(roots)
                    .with_ignored_files(self.config.diff.ignored_files.iter().cloned())
                    .with_group_global_actions(self.group_global_actions(*group_global_actions))
                    .classify(&records);
                match format.as_str() {
                    "json" => to_json(&result),
                    _ => Ok(format_diff_text(&result)),
                }
            }
            Commands::Combine { files, format } => {
                let mut combined = MetadataTree::new();
                for file in files {
                    let path = self.resolve_input(file);
                    let text =
                        std::fs::read_to_string(&path).map_err(|e| MetadataError::io(&path, e))?;
                    let catalog = serialize::deserialize_str(&text, self.config.scan.remove_empty)?;
                    tree::combine(&mut combined, catalog);
                }
                render_catalog("Combined catalog", &combined, format)
            }
        }
    }

    fn group_global_actions(&self, flag: bool) -> bool {
        flag || self.config.scan.group_global_actions
    }

    /// Relative input paths are taken from the project root.
    fn resolve_input(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.exists() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    fn folder_map(&self, describe: &Path) -> Result<FolderMetadataMap, MetadataError> {
        let details: Vec<MetadataDetail> =
            describe::details_from_path(&LocalFileSystem, &self.resolve_input(describe))?;
        Ok(FolderMetadataMap::from_details(&details))
    }
}

fn render_catalog(title: &str, catalog: &MetadataTree, format: &str) -> Result<String, MetadataError> {
    match format {
        "json" => serialize::to_json_string(catalog),
        _ => Ok(format_catalog_text(title, catalog)),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, MetadataError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MetadataError::InputShape(format!("JSON output: {}", e)))
}
