//! `objects/` expansion: one folder per table-like entity, ten child folders.

use super::{category_entry, display};
use crate::catalog::names::*;
use crate::classifier;
use crate::describe::FolderMetadataMap;
use crate::error::MetadataError;
use crate::fs::{list_if_dir, FileSystem};
use crate::types::MetadataTree;
use std::path::Path;
use tracing::debug;

/// Expand every `objects/<Object>/` folder into the CustomObject Type and
/// the Types fed by its child folders (fields, record types, ...).
pub(super) fn scan_objects(
    fs: &dyn FileSystem,
    path: &Path,
    folder_map: &FolderMetadataMap,
    catalog: &mut MetadataTree,
) -> Result<(), MetadataError> {
    let object_suffix = folder_map.suffix_of(CUSTOM_OBJECT).unwrap_or("object");
    for object_name in fs.list_dir(path)? {
        let object_path = path.join(&object_name);
        if !fs.is_dir(&object_path) {
            continue;
        }

        let descriptor = object_path.join(format!(
            "{}.{}{}",
            object_name, object_suffix, META_SUFFIX
        ));
        if fs.exists(&descriptor) {
            category_entry(catalog, CUSTOM_OBJECT, folder_map, path)
                .touch_object(&object_name, false)
                .path
                .get_or_insert_with(|| display(&descriptor));
        }

        for (child_folder, category) in OBJECT_CHILD_FOLDERS {
            let child_path = object_path.join(child_folder);
            let files = list_if_dir(fs, &child_path)?;
            if files.is_empty() {
                continue;
            }
            let suffix = folder_map
                .suffix_of(category)
                .map(str::to_string)
                .or_else(|| default_child_suffix(child_folder));
            let object = category_entry(catalog, category, folder_map, path)
                .touch_object(&object_name, false);
            object.path.get_or_insert_with(|| display(&object_path));
            for file in files {
                let file_path = child_path.join(&file);
                if !fs.is_file(&file_path) {
                    continue;
                }
                let item = classifier::base_name(&file, suffix.as_deref());
                object
                    .touch_item(&item, false)
                    .path
                    .get_or_insert_with(|| display(&file_path));
            }
            debug!(object = %object_name, category, "Expanded object child folder");
        }
    }
    Ok(())
}

/// Child suffixes follow the singular of their folder (`fields` → `field`).
fn default_child_suffix(folder: &str) -> Option<String> {
    match folder {
        "indexes" => Some("index".to_string()),
        other => other.strip_suffix('s').map(str::to_string),
    }
}
