//! Core types shared across the catalog builders.

use crate::tree::MetadataType;
use std::collections::BTreeMap;

/// Category name, e.g. `CustomField`.
pub type CategoryName = String;

/// Catalog root: category name → Type. Ordered, so iteration is canonical.
pub type MetadataTree = BTreeMap<CategoryName, MetadataType>;
