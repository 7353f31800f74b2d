//! Diff Classifier
//!
//! Routes every changed file of a diff into a to-deploy or a to-delete
//! catalog. Each file is resolved to its category folder and layout family;
//! composite files are split into the elements their changed lines touch.
//! Conflicts between the two catalogs are settled by the category priority
//! lists once every file has been routed.

pub mod classify;
pub mod collection_scan;
pub mod record;
pub mod unified;

pub use record::{records_from_str, ChangeMode, DiffRecord};
pub use unified::parse_unified_diff;

use crate::catalog::names::{DELETE_PRIORITY, DEPLOY_PRIORITY};
use crate::classifier::MemberName;
use crate::describe::FolderMetadataMap;
use crate::tree::{self, MetadataType};
use crate::types::MetadataTree;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Lint and editor configuration files that live inside bundle folders.
pub const DEFAULT_IGNORED_FILES: [&str; 2] = [".eslintrc.json", "jsconfig.json"];

/// Outcome of classifying a diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub to_deploy: MetadataTree,
    pub to_delete: MetadataTree,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.to_deploy.is_empty() && self.to_delete.is_empty()
    }
}

/// Classifies change records against a folder map.
pub struct DiffClassifier<'a> {
    folder_map: &'a FolderMetadataMap,
    source_roots: Vec<String>,
    ignored_files: Vec<String>,
    group_global_actions: bool,
}

impl<'a> DiffClassifier<'a> {
    pub fn new(folder_map: &'a FolderMetadataMap) -> Self {
        Self {
            folder_map,
            source_roots: Vec::new(),
            ignored_files: DEFAULT_IGNORED_FILES.iter().map(|f| f.to_string()).collect(),
            group_global_actions: false,
        }
    }

    /// Package directories to strip from diff paths (e.g. `force-app`).
    pub fn with_source_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.source_roots = roots
            .into_iter()
            .map(|root| root.as_ref().replace('\\', "/").trim_matches('/').to_string())
            .filter(|root| !root.is_empty())
            .collect();
        // Longest first so nested package directories win.
        self.source_roots.sort_by(|a, b| b.len().cmp(&a.len()));
        self
    }

    /// File names skipped wherever they appear.
    pub fn with_ignored_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group_global_actions(mut self, group: bool) -> Self {
        self.group_global_actions = group;
        self
    }

    /// Route every record, then resolve conflicts between the two catalogs.
    ///
    /// Delete-priority categories keep their to-delete flags and lose the
    /// matching to-deploy flags; deploy-priority categories the reverse.
    pub fn classify(&self, diffs: &[DiffRecord]) -> DiffResult {
        let mut result = DiffResult::default();
        for record in diffs {
            let change = self.classify_record(record);
            debug!(
                path = %record.path,
                mode = ?record.mode,
                deploy = change.deploy.len(),
                delete = change.delete.len(),
                "Classified changed file"
            );
            for (category, member) in &change.deploy {
                self.insert(&mut result.to_deploy, category, member, &record.path);
            }
            for (category, member) in &change.delete {
                self.insert(&mut result.to_delete, category, member, &record.path);
            }
        }

        let deploy_cleared =
            tree::clear_checked(&result.to_delete, &mut result.to_deploy, &DELETE_PRIORITY);
        let delete_cleared =
            tree::clear_checked(&result.to_deploy, &mut result.to_delete, &DEPLOY_PRIORITY);
        info!(
            files = diffs.len(),
            deploy_types = result.to_deploy.len(),
            delete_types = result.to_delete.len(),
            deploy_cleared,
            delete_cleared,
            "Classified diff"
        );
        result
    }

    fn insert(&self, catalog: &mut MetadataTree, category: &str, member: &MemberName, path: &str) {
        let metadata_type = catalog.entry(category.to_string()).or_insert_with(|| {
            MetadataType::new(category, false)
                .with_suffix(self.folder_map.suffix_of(category).map(str::to_string))
        });
        let object = metadata_type.touch_object(&member.object, true);
        match &member.item {
            Some(item) => {
                object
                    .touch_item(item, true)
                    .path
                    .get_or_insert_with(|| path.to_string());
            }
            None => {
                object.path.get_or_insert_with(|| path.to_string());
            }
        }
    }
}

/// Positions produced by one changed file.
#[derive(Debug, Default)]
pub(crate) struct FileChange {
    pub deploy: Vec<(String, MemberName)>,
    pub delete: Vec<(String, MemberName)>,
}
