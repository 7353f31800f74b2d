//! Serialization Bridge
//!
//! Converts a catalog to and from its JSON interchange shape:
//!
//! ```text
//! { "<Category>": { "name", "checked", "path"?, "suffix"?,
//!     "childs": { "<Object>": { "name", "checked", "path"?,
//!         "childs": { "<Item>": { "name", "checked", "path"? } } } } } }
//! ```
//!
//! Deserialization validates every node and reports the first offending
//! node by its position in the tree.

use crate::error::MetadataError;
use crate::tree::{self, MetadataItem, MetadataObject, MetadataType};
use crate::types::MetadataTree;
use serde_json::{Map, Value};

/// Canonical JSON value of a catalog (keys sorted at every level).
pub fn serialize(catalog: &MetadataTree) -> Result<Value, MetadataError> {
    serde_json::to_value(catalog)
        .map_err(|e| MetadataError::MalformedTree(format!("serialization failed: {}", e)))
}

/// Pretty-printed JSON text of a catalog.
pub fn to_json_string(catalog: &MetadataTree) -> Result<String, MetadataError> {
    serde_json::to_string_pretty(catalog)
        .map_err(|e| MetadataError::MalformedTree(format!("serialization failed: {}", e)))
}

/// Rebuild a catalog from its JSON value.
///
/// With `remove_empty`, Types left without Objects are dropped.
///
/// # Errors
///
/// `MalformedTree` when a node lacks `name` or `checked`, when `childs` is
/// not an object, or when a key disagrees with its node's name.
pub fn deserialize(value: &Value, remove_empty: bool) -> Result<MetadataTree, MetadataError> {
    let root = as_object(value, "catalog")?;
    let mut catalog = MetadataTree::new();
    for (key, node) in root {
        let metadata_type = read_type(key, node)?;
        catalog.insert(key.clone(), metadata_type);
    }
    if remove_empty {
        tree::remove_empty(&mut catalog);
    }
    Ok(catalog)
}

/// Parse JSON text and rebuild the catalog.
pub fn deserialize_str(text: &str, remove_empty: bool) -> Result<MetadataTree, MetadataError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| MetadataError::InputShape(format!("catalog JSON: {}", e)))?;
    deserialize(&value, remove_empty)
}

fn read_type(key: &str, value: &Value) -> Result<MetadataType, MetadataError> {
    let node = Node::read(key, value, key)?;
    let mut metadata_type = MetadataType::new(node.name.clone(), node.checked);
    metadata_type.path = node.path.clone();
    metadata_type.suffix = optional_string(node.fields, "suffix", key)?;
    for (object_key, object_value) in node.childs(true)? {
        let position = format!("{}/{}", key, object_key);
        let object = read_object(object_key, object_value, &position)?;
        metadata_type.childs.insert(object_key.clone(), object);
    }
    Ok(metadata_type)
}

fn read_object(key: &str, value: &Value, position: &str) -> Result<MetadataObject, MetadataError> {
    let node = Node::read(key, value, position)?;
    let mut object = MetadataObject::new(node.name.clone(), node.checked);
    object.path = node.path.clone();
    for (item_key, item_value) in node.childs(false)? {
        let item_position = format!("{}/{}", position, item_key);
        let item = Node::read(item_key, item_value, &item_position)?;
        let mut metadata_item = MetadataItem::new(item.name, item.checked);
        metadata_item.path = item.path;
        object.childs.insert(item_key.clone(), metadata_item);
    }
    Ok(object)
}

/// Common fields of a node, validated.
struct Node<'v> {
    name: String,
    checked: bool,
    path: Option<String>,
    fields: &'v Map<String, Value>,
    position: String,
}

impl<'v> Node<'v> {
    fn read(key: &str, value: &'v Value, position: &str) -> Result<Self, MetadataError> {
        let fields = as_object(value, position)?;
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(position, "missing string `name`"))?;
        if name != key {
            return Err(malformed(
                position,
                &format!("key does not match name `{}`", name),
            ));
        }
        let checked = fields
            .get("checked")
            .and_then(Value::as_bool)
            .ok_or_else(|| malformed(position, "missing boolean `checked`"))?;
        Ok(Self {
            name: name.to_string(),
            checked,
            path: optional_string(fields, "path", position)?,
            fields,
            position: position.to_string(),
        })
    }

    /// `childs` entries. Types and Objects require the field; Items may omit it.
    fn childs(&self, required: bool) -> Result<Vec<(&'v String, &'v Value)>, MetadataError> {
        match self.fields.get("childs") {
            Some(value) => Ok(as_object(value, &self.position)?.iter().collect()),
            None if required => Err(malformed(&self.position, "missing `childs` object")),
            None => Ok(Vec::new()),
        }
    }
}

fn as_object<'v>(value: &'v Value, position: &str) -> Result<&'v Map<String, Value>, MetadataError> {
    value
        .as_object()
        .ok_or_else(|| malformed(position, "expected an object"))
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &str,
    position: &str,
) -> Result<Option<String>, MetadataError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(malformed(position, &format!("`{}` must be a string", field))),
    }
}

fn malformed(position: &str, reason: &str) -> MetadataError {
    MetadataError::MalformedTree(format!("{}: {}", position, reason))
}
