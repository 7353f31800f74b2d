//! Catalog node types: Type → Object → Item

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Behaviour shared by every catalog level.
pub trait Entity {
    fn is_checked(&self) -> bool;
}

/// A catalog level that owns a keyed map of children.
///
/// Keys are unique within the parent; the map is ordered, so iteration
/// always follows the canonical sort.
pub trait Container {
    type Child: Entity;

    fn childs(&self) -> &BTreeMap<String, Self::Child>;
    fn childs_mut(&mut self) -> &mut BTreeMap<String, Self::Child>;

    /// Insert or replace a child under `name`.
    fn add_child(&mut self, name: impl Into<String>, child: Self::Child) {
        self.childs_mut().insert(name.into(), child);
    }

    fn get_child(&self, name: &str) -> Option<&Self::Child> {
        self.childs().get(name)
    }

    /// Return the child under `name`, inserting `factory()` first if absent.
    fn upsert<F>(&mut self, name: &str, factory: F) -> &mut Self::Child
    where
        F: FnOnce() -> Self::Child,
    {
        self.childs_mut()
            .entry(name.to_string())
            .or_insert_with(factory)
    }
}

/// Category node (tree level 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataType {
    pub name: String,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub childs: BTreeMap<String, MetadataObject>,
}

/// Instance or named grouping within a category (tree level 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataObject {
    pub name: String,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub childs: BTreeMap<String, MetadataItem>,
}

/// Finest-grained addressable component (tree level 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl MetadataType {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
            path: None,
            suffix: None,
            childs: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix;
        self
    }

    /// Upsert an Object and return it, promoting its flag when `checked`.
    pub fn touch_object(&mut self, name: &str, checked: bool) -> &mut MetadataObject {
        let object = self.upsert(name, || MetadataObject::new(name, checked));
        object.checked |= checked;
        object
    }
}

impl MetadataObject {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
            path: None,
            childs: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Upsert an Item and return it, promoting its flag when `checked`.
    pub fn touch_item(&mut self, name: &str, checked: bool) -> &mut MetadataItem {
        let item = self.upsert(name, || MetadataItem::new(name, checked));
        item.checked |= checked;
        item
    }
}

impl MetadataItem {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

macro_rules! impl_entity {
    ($ty:ty) => {
        impl Entity for $ty {
            fn is_checked(&self) -> bool {
                self.checked
            }
        }
    };
}

impl_entity!(MetadataType);
impl_entity!(MetadataObject);
impl_entity!(MetadataItem);

impl Container for MetadataType {
    type Child = MetadataObject;

    fn childs(&self) -> &BTreeMap<String, MetadataObject> {
        &self.childs
    }

    fn childs_mut(&mut self) -> &mut BTreeMap<String, MetadataObject> {
        &mut self.childs
    }
}

impl Container for MetadataObject {
    type Child = MetadataItem;

    fn childs(&self) -> &BTreeMap<String, MetadataItem> {
        &self.childs
    }

    fn childs_mut(&mut self) -> &mut BTreeMap<String, MetadataItem> {
        &mut self.childs
    }
}
