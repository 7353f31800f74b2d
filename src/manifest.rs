//! Declarative-Manifest Importer
//!
//! Turns a `package.xml` style member list (category → member names) into a
//! catalog. Manifest presence is a request for inclusion, so every node is
//! checked; the `*` wildcard only checks its Type.

use crate::catalog::names::WILDCARD;
use crate::classifier;
use crate::error::MetadataError;
use crate::fs::{FileSystem, LocalFileSystem};
use crate::markup::{self, MarkupElement};
use crate::tree::MetadataType;
use crate::types::MetadataTree;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Container marker of a manifest.
pub const PACKAGE_MARKER: &str = "Package";

/// Accepted manifest shapes.
#[derive(Debug, Clone)]
pub enum ManifestInput {
    /// Path to a manifest file.
    Path(PathBuf),
    /// Raw manifest markup.
    Markup(String),
    /// Markup already converted to JSON: `{"Package": {"types": [...]}}`.
    Parsed(Value),
    /// Pre-reduced member lists.
    Members(BTreeMap<String, Vec<String>>),
}

impl ManifestInput {
    /// Guess the shape of a textual input: markup, JSON, or a file path.
    pub fn detect(input: &str) -> Self {
        let trimmed = input.trim_start();
        if trimmed.starts_with('<') {
            return ManifestInput::Markup(input.to_string());
        }
        if trimmed.starts_with('{') {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return ManifestInput::Parsed(value);
            }
        }
        ManifestInput::Path(PathBuf::from(input.trim()))
    }
}

/// Build a catalog from a manifest.
///
/// # Errors
///
/// `MalformedManifest` when the `Package` container is missing,
/// `UnsupportedInput` when the input is not markup, a parsed structure or a
/// readable file.
pub fn create_metadata_types_from_manifest(
    input: ManifestInput,
    group_global_actions: bool,
) -> Result<MetadataTree, MetadataError> {
    import_manifest(&LocalFileSystem, input, group_global_actions)
}

/// [`create_metadata_types_from_manifest`] reading `Path` inputs through `fs`.
pub fn import_manifest(
    fs: &dyn FileSystem,
    input: ManifestInput,
    group_global_actions: bool,
) -> Result<MetadataTree, MetadataError> {
    let members = reduce(fs, input)?;
    Ok(from_members(&members, group_global_actions))
}

/// Build a catalog from pre-reduced member lists.
pub fn from_members(
    members: &BTreeMap<String, Vec<String>>,
    group_global_actions: bool,
) -> MetadataTree {
    let mut catalog = MetadataTree::new();
    for (category, names) in members {
        let metadata_type = catalog
            .entry(category.clone())
            .or_insert_with(|| MetadataType::new(category, false));
        for name in names {
            if name == WILDCARD {
                metadata_type.checked = true;
                continue;
            }
            let Some(member) = classifier::split_member(category, name, group_global_actions)
            else {
                continue;
            };
            let object = metadata_type.touch_object(&member.object, true);
            if let Some(item) = member.item {
                object.touch_item(&item, true);
            }
        }
        debug!(category = %category, members = names.len(), "Imported manifest type");
    }
    catalog
}

fn reduce(
    fs: &dyn FileSystem,
    input: ManifestInput,
) -> Result<BTreeMap<String, Vec<String>>, MetadataError> {
    match input {
        ManifestInput::Members(members) => Ok(members),
        ManifestInput::Path(path) => reduce_markup(&read_manifest(fs, &path)?),
        ManifestInput::Markup(text) => reduce_markup(&text),
        ManifestInput::Parsed(value) => reduce_parsed(&value),
    }
}

fn read_manifest(fs: &dyn FileSystem, path: &Path) -> Result<String, MetadataError> {
    if !fs.is_file(path) {
        return Err(MetadataError::UnsupportedInput(format!(
            "{} is not markup, a parsed manifest or a readable file",
            path.display()
        )));
    }
    fs.read_to_string(path)
}

fn reduce_markup(text: &str) -> Result<BTreeMap<String, Vec<String>>, MetadataError> {
    let root = markup::parse_markup(text)
        .map_err(|e| MetadataError::UnsupportedInput(e.to_string()))?;
    if root.name != PACKAGE_MARKER {
        return Err(MetadataError::MalformedManifest(format!(
            "expected <{}> root, found <{}>",
            PACKAGE_MARKER, root.name
        )));
    }
    let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for types in root.children_named("types") {
        let Some(name) = types.child_text("name") else {
            continue;
        };
        let entry = members.entry(name.to_string()).or_default();
        entry.extend(
            types
                .children_named("members")
                .map(|member: &MarkupElement| member.text.clone())
                .filter(|member| !member.is_empty()),
        );
    }
    Ok(members)
}

fn reduce_parsed(value: &Value) -> Result<BTreeMap<String, Vec<String>>, MetadataError> {
    let Value::Object(map) = value else {
        return Err(MetadataError::UnsupportedInput(
            "parsed manifest must be an object".to_string(),
        ));
    };
    let package = map.get(PACKAGE_MARKER).ok_or_else(|| {
        MetadataError::MalformedManifest(format!("missing {} container", PACKAGE_MARKER))
    })?;
    let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for types in one_or_many(package.get("types")) {
        let Some(name) = one_or_many(types.get("name"))
            .into_iter()
            .find_map(Value::as_str)
        else {
            continue;
        };
        let entry = members.entry(name.to_string()).or_default();
        entry.extend(
            one_or_many(types.get("members"))
                .into_iter()
                .filter_map(Value::as_str)
                .map(str::to_string),
        );
    }
    Ok(members)
}

/// xml-to-JSON converters emit single children as scalars and repeated ones as arrays.
fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(values)) => values.iter().collect(),
        Some(value) => vec![value],
        None => Vec::new(),
    }
}
