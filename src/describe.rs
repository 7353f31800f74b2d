//! Category descriptors (describe-metadata output)
//!
//! Flattens a describe response into one [`MetadataDetail`] per category and
//! child category, and indexes them by the folder they live in.

use crate::catalog::names::*;
use crate::error::MetadataError;
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable descriptor of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDetail {
    pub xml_name: String,
    pub directory_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default)]
    pub in_folder: bool,
    #[serde(default)]
    pub meta_file: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_xml_names: Vec<String>,
}

impl MetadataDetail {
    pub fn new(xml_name: &str, directory_name: &str, suffix: Option<&str>) -> Self {
        Self {
            xml_name: xml_name.to_string(),
            directory_name: directory_name.to_string(),
            suffix: suffix.map(str::to_string),
            in_folder: false,
            meta_file: false,
            child_xml_names: Vec::new(),
        }
    }
}

/// Source-format suffixes of child categories that differ from their parent's.
const CHILD_SUFFIXES: [(&str, &str); 11] = [
    (CUSTOM_FIELD, "field"),
    (INDEX, "index"),
    (RECORD_TYPE, "recordType"),
    (LIST_VIEW, "listView"),
    (BUSINESS_PROCESS, "businessProcess"),
    (COMPACT_LAYOUT, "compactLayout"),
    (VALIDATION_RULE, "validationRule"),
    (SHARING_REASON, "sharingReason"),
    (FIELD_SET, "fieldSet"),
    (WEB_LINK, "webLink"),
    (BOT_VERSION, "botVersion"),
];

fn child_suffix(xml_name: &str) -> Option<String> {
    CHILD_SUFFIXES
        .iter()
        .find(|(name, _)| *name == xml_name)
        .map(|(_, suffix)| suffix.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeEntry {
    xml_name: String,
    #[serde(default)]
    directory_name: String,
    #[serde(default)]
    suffix: Option<String>,
    #[serde(default)]
    in_folder: bool,
    #[serde(default)]
    meta_file: bool,
    #[serde(default)]
    child_xml_names: Vec<Value>,
}

/// Locate the `metadataObjects` array in the accepted response shapes:
/// a bare array, `{metadataObjects}`, or a CLI envelope `{result: {metadataObjects}}`.
fn metadata_objects(response: &Value) -> Option<&Vec<Value>> {
    match response {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => map
            .get("metadataObjects")
            .and_then(Value::as_array)
            .or_else(|| map.get("result").and_then(metadata_objects)),
        _ => None,
    }
}

/// Flatten a describe response into details.
///
/// Produces one entry per category plus one per child category. Children
/// inherit the parent's folder, `inFolder` and `metaFile`; their suffix comes
/// from the known child-suffix table.
pub fn create_metadata_details(response: &Value) -> Result<Vec<MetadataDetail>, MetadataError> {
    let entries = metadata_objects(response).ok_or_else(|| {
        MetadataError::InputShape("describe response has no metadataObjects".to_string())
    })?;
    let mut details = Vec::new();
    for entry in entries {
        let entry: DescribeEntry = serde_json::from_value(entry.clone())
            .map_err(|e| MetadataError::InputShape(format!("describe entry: {}", e)))?;
        let children: Vec<String> = entry
            .child_xml_names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        details.push(MetadataDetail {
            xml_name: entry.xml_name,
            directory_name: entry.directory_name.clone(),
            suffix: entry.suffix,
            in_folder: entry.in_folder,
            meta_file: entry.meta_file,
            child_xml_names: children.clone(),
        });
        for child in children {
            details.push(MetadataDetail {
                suffix: child_suffix(&child),
                xml_name: child,
                directory_name: entry.directory_name.clone(),
                in_folder: entry.in_folder,
                meta_file: entry.meta_file,
                child_xml_names: Vec::new(),
            });
        }
    }
    Ok(details)
}

/// Parse describe JSON text.
pub fn details_from_str(text: &str) -> Result<Vec<MetadataDetail>, MetadataError> {
    let response: Value = serde_json::from_str(text)
        .map_err(|e| MetadataError::InputShape(format!("describe response: {}", e)))?;
    create_metadata_details(&response)
}

/// Read and parse a describe JSON file.
pub fn details_from_path(
    fs: &dyn FileSystem,
    path: &Path,
) -> Result<Vec<MetadataDetail>, MetadataError> {
    if !fs.is_file(path) {
        return Err(MetadataError::unresolved(path, "describe file not found"));
    }
    details_from_str(&fs.read_to_string(path)?)
}

/// Details keyed by folder path fragment.
///
/// Top-level categories are keyed by their folder name (first detail wins);
/// the children of `objects/<Object>/` are keyed `objects/<child folder>`.
#[derive(Debug, Clone, Default)]
pub struct FolderMetadataMap {
    by_folder: BTreeMap<String, MetadataDetail>,
    by_name: BTreeMap<String, MetadataDetail>,
}

impl FolderMetadataMap {
    pub fn from_details(details: &[MetadataDetail]) -> Self {
        let mut map = FolderMetadataMap::default();
        for detail in details {
            map.by_name
                .entry(detail.xml_name.clone())
                .or_insert_with(|| detail.clone());
            let key = match object_child_folder(&detail.xml_name) {
                Some(folder) => format!("{}/{}", detail.directory_name, folder),
                None => detail.directory_name.clone(),
            };
            if key.is_empty() {
                continue;
            }
            map.by_folder.entry(key).or_insert_with(|| detail.clone());
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&MetadataDetail> {
        self.by_folder.get(key)
    }

    pub fn by_name(&self, xml_name: &str) -> Option<&MetadataDetail> {
        self.by_name.get(xml_name)
    }

    /// Suffix of a category, when known.
    pub fn suffix_of(&self, xml_name: &str) -> Option<&str> {
        self.by_name(xml_name).and_then(|detail| detail.suffix.as_deref())
    }

    /// Resolve the detail for a folder path (segments below the metadata root).
    ///
    /// Longest key wins: the full path, then `first/last`, then the first segment.
    pub fn resolve(&self, folders: &[&str]) -> Option<&MetadataDetail> {
        let first = folders.first()?;
        let full = folders.join("/");
        if let Some(detail) = self.get(&full) {
            return Some(detail);
        }
        if folders.len() > 2 {
            let composite = format!("{}/{}", first, folders[folders.len() - 1]);
            if let Some(detail) = self.get(&composite) {
                return Some(detail);
            }
        }
        self.get(first)
    }

    pub fn contains_folder(&self, folder: &str) -> bool {
        self.by_folder.contains_key(folder)
    }

    pub fn folders(&self) -> impl Iterator<Item = (&String, &MetadataDetail)> {
        self.by_folder.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.by_folder.is_empty()
    }
}
