//! Directory-Tree Builder
//!
//! Walks each source root of a project and turns every known category folder
//! into a populated Type. The folder layout is resolved once per folder into
//! a [`LayoutFamily`] and dispatched from there; missing folders are skipped
//! and Types without Objects are dropped.

mod collections;
mod objects;

use crate::catalog::names::*;
use crate::catalog::LayoutFamily;
use crate::classifier::{self, Separator};
use crate::describe::{FolderMetadataMap, MetadataDetail};
use crate::error::MetadataError;
use crate::fs::{list_if_dir, FileSystem};
use crate::project;
use crate::tree::{self, MetadataType};
use crate::types::MetadataTree;
use std::path::Path;
use tracing::{debug, info};

/// Builds a [`MetadataTree`] from a project folder.
pub struct DirectoryTreeBuilder<'a> {
    fs: &'a dyn FileSystem,
    group_global_actions: bool,
}

impl<'a> DirectoryTreeBuilder<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            group_global_actions: false,
        }
    }

    /// Group global quick actions under a single `GlobalActions` Object.
    pub fn with_group_global_actions(mut self, group: bool) -> Self {
        self.group_global_actions = group;
        self
    }

    /// Scan every source root of the project at `project_root`.
    ///
    /// # Errors
    ///
    /// Fails with `PathResolution` when the root is not a directory, or when
    /// a category file cannot be read or parsed.
    pub fn build(
        &self,
        project_root: &Path,
        folder_map: &FolderMetadataMap,
    ) -> Result<MetadataTree, MetadataError> {
        if !self.fs.is_dir(project_root) {
            return Err(MetadataError::unresolved(
                project_root,
                "project root is not a directory",
            ));
        }
        let mut catalog = MetadataTree::new();
        for source in project::source_roots(self.fs, project_root)? {
            let folder = project::metadata_folder(self.fs, project_root, &source);
            let scanned = self.scan_metadata_folder(&folder, folder_map)?;
            tree::combine(&mut catalog, scanned);
        }
        tree::remove_empty(&mut catalog);
        info!(
            root = %project_root.display(),
            categories = catalog.len(),
            "Scanned project folders"
        );
        Ok(catalog)
    }

    /// Scan one metadata folder (the parent of `classes/`, `objects/`, ...).
    pub fn scan_metadata_folder(
        &self,
        folder: &Path,
        folder_map: &FolderMetadataMap,
    ) -> Result<MetadataTree, MetadataError> {
        let mut catalog = MetadataTree::new();
        for name in list_if_dir(self.fs, folder)? {
            let Some(detail) = folder_map.get(&name) else {
                debug!(folder = %name, "Skipping unknown folder");
                continue;
            };
            let family = LayoutFamily::for_folder(&name, &detail.xml_name);
            let category_path = folder.join(&name);
            debug!(folder = %name, category = %detail.xml_name, ?family, "Scanning category folder");
            self.scan_category(&category_path, detail, family, folder_map, &mut catalog)?;
        }
        tree::remove_empty(&mut catalog);
        Ok(catalog)
    }

    fn scan_category(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        family: LayoutFamily,
        folder_map: &FolderMetadataMap,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        match family {
            LayoutFamily::Flat => self.scan_flat(path, detail, catalog),
            LayoutFamily::FolderPerObject { skip_sidecars } => {
                self.scan_folders(path, detail, skip_sidecars, catalog)
            }
            LayoutFamily::InlineSeparator { quick_actions } => {
                self.scan_separated(path, detail, Separator::Dot, quick_actions, catalog)
            }
            LayoutFamily::VersionSuffixed | LayoutFamily::Layouts => {
                self.scan_separated(path, detail, Separator::Dash, false, catalog)
            }
            LayoutFamily::Translations => self.scan_translations(path, detail, catalog),
            LayoutFamily::CompositeObject => {
                objects::scan_objects(self.fs, path, folder_map, catalog)
            }
            LayoutFamily::Bundle => self.scan_bundles(path, detail, catalog),
            LayoutFamily::StaticResources => self.scan_static_resources(path, detail, catalog),
            LayoutFamily::Bots => self.scan_bots(path, detail, folder_map, catalog),
            LayoutFamily::CompositeCollection => {
                collections::scan_collection_files(self.fs, path, detail, folder_map, catalog)
            }
        }
    }

    fn scan_flat(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let metadata_type = type_entry(catalog, detail, path);
        for file in self.fs.list_dir(path)? {
            let file_path = path.join(&file);
            if !self.fs.is_file(&file_path) {
                continue;
            }
            let name = classifier::base_name(&file, detail.suffix.as_deref());
            metadata_type
                .touch_object(&name, false)
                .path
                .get_or_insert_with(|| display(&file_path));
        }
        Ok(())
    }

    fn scan_folders(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        skip_sidecars: bool,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let metadata_type = type_entry(catalog, detail, path);
        for folder in self.fs.list_dir(path)? {
            // `Folder.reportFolder-meta.xml` and other strays at the top level.
            if folder.contains('.') {
                continue;
            }
            let folder_path = path.join(&folder);
            if self.fs.is_dir(&folder_path) {
                self.scan_folder(&folder_path, &folder, detail, skip_sidecars, metadata_type)?;
            }
        }
        Ok(())
    }

    /// One folder of a folder-per-object category. Nested folders become
    /// their own Object keyed by the full folder path (`Sales/Q1`).
    fn scan_folder(
        &self,
        folder_path: &Path,
        object_name: &str,
        detail: &MetadataDetail,
        skip_sidecars: bool,
        metadata_type: &mut MetadataType,
    ) -> Result<(), MetadataError> {
        metadata_type
            .touch_object(object_name, false)
            .path
            .get_or_insert_with(|| display(folder_path));
        for entry in self.fs.list_dir(folder_path)? {
            let entry_path = folder_path.join(&entry);
            if self.fs.is_dir(&entry_path) {
                let nested = format!("{}/{}", object_name, entry);
                self.scan_folder(&entry_path, &nested, detail, skip_sidecars, metadata_type)?;
                continue;
            }
            if !self.fs.is_file(&entry_path) || entry.ends_with(FOLDER_DESCRIPTOR_SUFFIX) {
                continue;
            }
            if skip_sidecars && entry.ends_with(META_SUFFIX) {
                continue;
            }
            let item = classifier::base_name(&entry, detail.suffix.as_deref());
            metadata_type
                .touch_object(object_name, false)
                .touch_item(&item, false)
                .path
                .get_or_insert_with(|| display(&entry_path));
        }
        Ok(())
    }

    fn scan_separated(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        separator: Separator,
        quick_actions: bool,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let metadata_type = type_entry(catalog, detail, path);
        for file in self.fs.list_dir(path)? {
            let file_path = path.join(&file);
            if !self.fs.is_file(&file_path) {
                continue;
            }
            let name = classifier::base_name(&file, detail.suffix.as_deref());
            let mut member = classifier::split_on(&name, separator);
            if quick_actions && member.item.is_none() {
                member = classifier::global_action(&member.object, self.group_global_actions);
            }
            let object = metadata_type.touch_object(&member.object, false);
            match member.item {
                Some(item) => {
                    object
                        .touch_item(&item, false)
                        .path
                        .get_or_insert_with(|| display(&file_path));
                }
                None => {
                    object.path.get_or_insert_with(|| display(&file_path));
                }
            }
        }
        Ok(())
    }

    fn scan_translations(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let metadata_type = type_entry(catalog, detail, path);
        for entry in self.fs.list_dir(path)? {
            let entry_path = path.join(&entry);
            let name = if self.fs.is_dir(&entry_path) {
                entry.clone()
            } else {
                classifier::base_name(&entry, detail.suffix.as_deref())
            };
            let member = classifier::split_on(&name, Separator::Dash);
            let object = metadata_type.touch_object(&member.object, false);
            if let Some(locale) = member.item {
                object
                    .touch_item(&locale, false)
                    .path
                    .get_or_insert_with(|| display(&entry_path));
            }
        }
        Ok(())
    }

    fn scan_bundles(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let metadata_type = type_entry(catalog, detail, path);
        for bundle in self.fs.list_dir(path)? {
            let bundle_path = path.join(&bundle);
            if !self.fs.is_dir(&bundle_path) || bundle.starts_with('.') {
                continue;
            }
            if self.fs.list_dir(&bundle_path)?.is_empty() {
                continue;
            }
            metadata_type
                .touch_object(&bundle, false)
                .path
                .get_or_insert_with(|| display(&bundle_path));
        }
        Ok(())
    }

    fn scan_static_resources(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let metadata_type = type_entry(catalog, detail, path);
        for entry in self.fs.list_dir(path)? {
            let entry_path = path.join(&entry);
            let name = if self.fs.is_dir(&entry_path) {
                entry.clone()
            } else {
                classifier::base_name(&entry, detail.suffix.as_deref())
            };
            metadata_type
                .touch_object(&name, false)
                .path
                .get_or_insert_with(|| display(&entry_path));
        }
        Ok(())
    }

    fn scan_bots(
        &self,
        path: &Path,
        detail: &MetadataDetail,
        folder_map: &FolderMetadataMap,
        catalog: &mut MetadataTree,
    ) -> Result<(), MetadataError> {
        let version_suffix = folder_map
            .suffix_of(BOT_VERSION)
            .unwrap_or("botVersion")
            .to_string();
        let version_marker = format!(".{}{}", version_suffix, META_SUFFIX);
        for bot in self.fs.list_dir(path)? {
            let bot_path = path.join(&bot);
            if !self.fs.is_dir(&bot_path) {
                continue;
            }
            type_entry(catalog, detail, path)
                .touch_object(&bot, false)
                .path
                .get_or_insert_with(|| display(&bot_path));
            for file in self.fs.list_dir(&bot_path)? {
                if !file.ends_with(&version_marker) {
                    continue;
                }
                let version = classifier::base_name(&file, Some(&version_suffix));
                let versions = catalog
                    .entry(BOT_VERSION.to_string())
                    .or_insert_with(|| {
                        MetadataType::new(BOT_VERSION, false)
                            .with_suffix(Some(version_suffix.clone()))
                            .with_path(display(path))
                    });
                versions
                    .touch_object(&bot, false)
                    .touch_item(&version, false)
                    .path
                    .get_or_insert_with(|| display(&bot_path.join(&file)));
            }
        }
        Ok(())
    }
}

/// Type for `detail` in `catalog`, created on first use.
pub(crate) fn type_entry<'t>(
    catalog: &'t mut MetadataTree,
    detail: &MetadataDetail,
    path: &Path,
) -> &'t mut MetadataType {
    catalog
        .entry(detail.xml_name.clone())
        .or_insert_with(|| {
            MetadataType::new(&detail.xml_name, false)
                .with_suffix(detail.suffix.clone())
                .with_path(display(path))
        })
}

/// Type named `category` (not necessarily the folder's own), created on first use.
pub(crate) fn category_entry<'t>(
    catalog: &'t mut MetadataTree,
    category: &str,
    folder_map: &FolderMetadataMap,
    path: &Path,
) -> &'t mut MetadataType {
    catalog.entry(category.to_string()).or_insert_with(|| {
        MetadataType::new(category, false)
            .with_suffix(folder_map.suffix_of(category).map(str::to_string))
            .with_path(display(path))
    })
}

pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
