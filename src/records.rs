//! Query-Result Adapter
//!
//! Builds a single Type from flat, database-style records: folder-scoped
//! categories queried by folder (reports, dashboards, documents, email
//! templates), and list-metadata responses keyed by member full name.

use crate::classifier;
use crate::describe::MetadataDetail;
use crate::error::MetadataError;
use crate::tree::MetadataType;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Folder that holds records without an accessible named folder.
pub const UNFILED_PUBLIC: &str = "unfiled$public";

/// Per-user folder; its records are never packaged.
pub const PRIVATE_REPORTS: &str = "Private Reports";

/// One queried record of a folder-scoped category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub namespace_prefix: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub folder_name: Option<String>,
}

impl QueryRecord {
    fn member_name(&self) -> Option<&str> {
        self.developer_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// One queried folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
}

impl FolderRecord {
    fn matches(&self, record: &QueryRecord) -> bool {
        let by_id = matches!((&self.id, &record.folder_id), (Some(a), Some(b)) if a == b);
        let by_name = match &record.folder_name {
            Some(folder) => {
                self.name.as_ref() == Some(folder) || self.developer_name.as_ref() == Some(folder)
            }
            None => false,
        };
        by_id || by_name
    }

    fn is_private(&self) -> bool {
        self.name.as_deref() == Some(PRIVATE_REPORTS)
            || self.developer_name.as_deref() == Some(PRIVATE_REPORTS)
    }
}

/// An empty namespace prefix means no namespace.
fn normalize_namespace(namespace: Option<&str>) -> Option<&str> {
    namespace.filter(|ns| !ns.is_empty())
}

/// Whether a record's namespace is the one requested.
fn namespace_matches(record: Option<&str>, namespace: Option<&str>) -> bool {
    normalize_namespace(record) == normalize_namespace(namespace)
}

/// Build a Type from folder-scoped records.
///
/// Each record becomes an Item under the developer name of its folder. Records
/// in `Private Reports` are dropped; records whose folder is not found fall
/// back to [`UNFILED_PUBLIC`]. Unless `include_all` is set, records outside
/// `namespace` are skipped.
pub fn from_records(
    category: &str,
    records: &[QueryRecord],
    folders_by_type: &BTreeMap<String, Vec<FolderRecord>>,
    namespace: Option<&str>,
    include_all: bool,
) -> MetadataType {
    let folders = folders_by_type
        .get(category)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut metadata_type = MetadataType::new(category, false);
    let mut skipped = 0usize;

    for record in records {
        if !include_all && !namespace_matches(record.namespace_prefix.as_deref(), namespace) {
            skipped += 1;
            continue;
        }
        let Some(member) = record.member_name() else {
            skipped += 1;
            continue;
        };
        let folder_name = match folders.iter().find(|folder| folder.matches(record)) {
            Some(folder) if folder.is_private() => {
                skipped += 1;
                continue;
            }
            Some(folder) => folder
                .developer_name
                .as_deref()
                .or(folder.name.as_deref())
                .unwrap_or(UNFILED_PUBLIC),
            None => UNFILED_PUBLIC,
        };
        metadata_type
            .touch_object(folder_name, false)
            .touch_item(member, false);
    }
    debug!(
        category,
        objects = metadata_type.childs.len(),
        skipped,
        "Built type from query records"
    );
    metadata_type
}

/// Entry of a list-metadata response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedMember {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    namespace_prefix: Option<String>,
}

/// Build a Type from a list-metadata response.
///
/// Accepts an array of members, a single member object, or a CLI envelope
/// `{result: ...}`. Each `fullName` is split with the category's naming
/// convention.
pub fn from_list_response(
    detail: &MetadataDetail,
    response: &Value,
    namespace: Option<&str>,
    include_all: bool,
) -> Result<MetadataType, MetadataError> {
    let entries = listed_entries(response)?;
    let mut metadata_type =
        MetadataType::new(&detail.xml_name, false).with_suffix(detail.suffix.clone());
    for entry in entries {
        let listed: ListedMember = serde_json::from_value(entry.clone())
            .map_err(|e| MetadataError::InputShape(format!("list entry: {}", e)))?;
        if !include_all && !namespace_matches(listed.namespace_prefix.as_deref(), namespace) {
            continue;
        }
        let Some(full_name) = listed.full_name.filter(|name| !name.is_empty()) else {
            continue;
        };
        let Some(member) = classifier::split_member(&detail.xml_name, &full_name, false) else {
            continue;
        };
        let object = metadata_type.touch_object(&member.object, false);
        if let Some(item) = member.item {
            object.touch_item(&item, false);
        }
    }
    Ok(metadata_type)
}

fn listed_entries(response: &Value) -> Result<Vec<&Value>, MetadataError> {
    match response {
        Value::Array(entries) => Ok(entries.iter().collect()),
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => match map.get("result") {
            Some(result) => listed_entries(result),
            None => Ok(vec![response]),
        },
        _ => Err(MetadataError::InputShape(
            "list response must be an array or an object".to_string(),
        )),
    }
}
