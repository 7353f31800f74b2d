//! Tree combination and priority resolution
//!
//! Merging is a non-destructive union: missing keys are added, `checked`
//! flags are promoted, nothing is ever removed or demoted. Priority
//! resolution only clears flags, so the structure of both trees survives
//! for inspection.

use crate::tree::node::{MetadataItem, MetadataObject, MetadataType};
use crate::types::MetadataTree;

/// Merge `source` into `target`.
pub fn combine(target: &mut MetadataTree, source: MetadataTree) {
    for (name, metadata_type) in source {
        match target.get_mut(&name) {
            Some(existing) => combine_type(existing, metadata_type),
            None => {
                target.insert(name, metadata_type);
            }
        }
    }
}

fn combine_type(target: &mut MetadataType, source: MetadataType) {
    target.checked |= source.checked;
    if target.path.is_none() {
        target.path = source.path;
    }
    if target.suffix.is_none() {
        target.suffix = source.suffix;
    }
    for (name, object) in source.childs {
        match target.childs.get_mut(&name) {
            Some(existing) => combine_object(existing, object),
            None => {
                target.childs.insert(name, object);
            }
        }
    }
}

fn combine_object(target: &mut MetadataObject, source: MetadataObject) {
    target.checked |= source.checked;
    if target.path.is_none() {
        target.path = source.path;
    }
    for (name, item) in source.childs {
        match target.childs.get_mut(&name) {
            Some(existing) => combine_item(existing, item),
            None => {
                target.childs.insert(name, item);
            }
        }
    }
}

fn combine_item(target: &mut MetadataItem, source: MetadataItem) {
    target.checked |= source.checked;
    if target.path.is_none() {
        target.path = source.path;
    }
}

/// Drop every Type without Objects.
pub fn remove_empty(tree: &mut MetadataTree) {
    tree.retain(|_, metadata_type| !metadata_type.childs.is_empty());
}

/// For each listed category, clear in `target` every flag that is set in `prior`.
///
/// Only Objects and Items present in both trees are touched. Returns the
/// number of flags cleared.
pub fn clear_checked(prior: &MetadataTree, target: &mut MetadataTree, categories: &[&str]) -> usize {
    let mut cleared = 0;
    for category in categories {
        let (Some(prior_type), Some(target_type)) = (prior.get(*category), target.get_mut(*category))
        else {
            continue;
        };
        for (object_name, prior_object) in &prior_type.childs {
            let Some(target_object) = target_type.childs.get_mut(object_name) else {
                continue;
            };
            if prior_object.checked && target_object.checked {
                target_object.checked = false;
                cleared += 1;
            }
            for (item_name, prior_item) in &prior_object.childs {
                if !prior_item.checked {
                    continue;
                }
                if let Some(target_item) = target_object.childs.get_mut(item_name) {
                    if target_item.checked {
                        target_item.checked = false;
                        cleared += 1;
                    }
                }
            }
        }
    }
    cleared
}

/// Object and Item totals for a Type.
pub fn count_nodes(metadata_type: &MetadataType) -> (usize, usize) {
    let objects = metadata_type.childs.len();
    let items = metadata_type
        .childs
        .values()
        .map(|object| object.childs.len())
        .sum();
    (objects, items)
}
