//! Path/Name Classifier
//!
//! Maps raw member names and file names to an `(Object, Item?)` position
//! using each category's naming convention.

use crate::catalog::names::*;

/// Naming convention splitting a member into Object and Item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Folder-qualified: `Folder/Item.ext`.
    Slash,
    /// Versioned or localized: `Object-Item`.
    Dash,
    /// Nested: `Object.Item`.
    Dot,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Dash => '-',
            Separator::Dot => '.',
        }
    }
}

/// Position of a member inside its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberName {
    pub object: String,
    pub item: Option<String>,
}

impl MemberName {
    pub fn object(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            item: None,
        }
    }

    pub fn nested(object: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            item: Some(item.into()),
        }
    }
}

/// Separator used by a category's member names.
pub fn separator_for(category: &str) -> Separator {
    match category {
        EMAIL_TEMPLATE | DOCUMENT | REPORT | DASHBOARD => Separator::Slash,
        LAYOUT | CUSTOM_OBJECT_TRANSLATION | FLOW | STANDARD_VALUE_SET_TRANSLATION => {
            Separator::Dash
        }
        _ => Separator::Dot,
    }
}

/// Split `name` at the first `separator`, or at the last `/` for folder
/// paths. No separator means Object only.
pub fn split_on(name: &str, separator: Separator) -> MemberName {
    let split = match separator {
        // Nested folders stay with the Object: `Sales/Q1/Pipeline`.
        Separator::Slash => name.rsplit_once('/'),
        _ => name.split_once(separator.as_char()),
    };
    match split {
        Some((object, item)) if !item.is_empty() => {
            let item = match separator {
                Separator::Slash => strip_extension(item),
                _ => item,
            };
            MemberName::nested(object, item)
        }
        Some((object, _)) => MemberName::object(object),
        None => MemberName::object(name),
    }
}

/// Classify a member of `category`. Returns `None` for the wildcard.
///
/// Global quick actions (no `.`) get a self-named Item, or are grouped under
/// [`GLOBAL_ACTIONS`] when `group_global_actions` is set.
pub fn split_member(category: &str, name: &str, group_global_actions: bool) -> Option<MemberName> {
    if name == WILDCARD {
        return None;
    }
    let member = split_on(name, separator_for(category));
    if category == QUICK_ACTION && member.item.is_none() {
        return Some(global_action(&member.object, group_global_actions));
    }
    Some(member)
}

/// Position of a quick action whose Object and Item coincide.
pub fn global_action(name: &str, group_global_actions: bool) -> MemberName {
    if group_global_actions {
        MemberName::nested(GLOBAL_ACTIONS, name)
    } else {
        MemberName::nested(name, name)
    }
}

/// Remove the last `.ext` from a name, if any.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Canonical base name of a source file.
///
/// Strips the `-meta.xml` sidecar marker, then the category suffix. When the
/// suffix is unknown or absent from the name, the last extension is removed.
pub fn base_name(file_name: &str, suffix: Option<&str>) -> String {
    let name = file_name.strip_suffix(META_SUFFIX).unwrap_or(file_name);
    if let Some(suffix) = suffix {
        let dotted = format!(".{}", suffix);
        if let Some(stripped) = name.strip_suffix(&dotted) {
            return stripped.to_string();
        }
    }
    strip_extension(name).to_string()
}
