//! Composite-collection files: one file, entries in several Types.

use super::{category_entry, display, type_entry};
use crate::catalog::relation;
use crate::classifier;
use crate::describe::{FolderMetadataMap, MetadataDetail};
use crate::error::MetadataError;
use crate::fs::FileSystem;
use crate::markup;
use crate::types::MetadataTree;
use std::path::Path;
use tracing::{debug, warn};

/// Split each composite file of the folder into its embedded elements.
///
/// The file registers an Object under its own category; every element of a
/// related collection becomes an Item (or, for flat composites, an Object)
/// under the relation's target category.
pub(super) fn scan_collection_files(
    fs: &dyn FileSystem,
    path: &Path,
    detail: &MetadataDetail,
    folder_map: &FolderMetadataMap,
    catalog: &mut MetadataTree,
) -> Result<(), MetadataError> {
    let Some(composite) = relation::composite(&detail.xml_name) else {
        warn!(category = %detail.xml_name, "Category has no collection relation");
        return Ok(());
    };
    for file in fs.list_dir(path)? {
        let file_path = path.join(&file);
        if !fs.is_file(&file_path) {
            continue;
        }
        let file_name = classifier::base_name(&file, detail.suffix.as_deref());
        let root = markup::parse_markup(&fs.read_to_string(&file_path)?)?;

        type_entry(catalog, detail, path)
            .touch_object(&file_name, false)
            .path
            .get_or_insert_with(|| display(&file_path));

        for relation in composite.collections {
            for element in root.children_named(relation.collection) {
                let Some(value) = element.child_text(relation.field_key) else {
                    continue;
                };
                let target = category_entry(catalog, relation.target, folder_map, path);
                if composite.flat {
                    target
                        .touch_object(value, false)
                        .path
                        .get_or_insert_with(|| display(&file_path));
                } else {
                    target
                        .touch_object(&file_name, false)
                        .touch_item(value, false)
                        .path
                        .get_or_insert_with(|| display(&file_path));
                }
            }
        }
        debug!(file = %file, category = %detail.xml_name, "Split composite file");
    }
    Ok(())
}
