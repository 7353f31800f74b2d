//! Folder layout families.
//!
//! Every category folder follows one of a fixed set of layouts. The family
//! is resolved once from the folder name (and the collection relation) and
//! both the directory scanner and the diff classifier match on it.

use crate::catalog::names::OBJECTS_FOLDER;
use crate::catalog::relation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFamily {
    /// One file per Object, no Items.
    Flat,
    /// One sub-folder per Object, one file per Item.
    FolderPerObject { skip_sidecars: bool },
    /// `Object.Item.suffix` file names.
    InlineSeparator { quick_actions: bool },
    /// `Object-Version.suffix` file names; unversioned names have no Item.
    VersionSuffixed,
    /// `Object-Layout Name.layout-meta.xml`.
    Layouts,
    /// One `Object-locale` sub-folder per translation.
    Translations,
    /// `objects/<Object>/<child folder>/...`
    CompositeObject,
    /// One sub-folder per atomic bundle.
    Bundle,
    /// Single file or unpacked folder per resource.
    StaticResources,
    /// `bots/<Bot>/<Version>.botVersion-meta.xml`.
    Bots,
    /// Files embedding elements of other categories.
    CompositeCollection,
}

impl LayoutFamily {
    /// Resolve the family for a category folder under the metadata root.
    pub fn for_folder(folder: &str, category: &str) -> Self {
        if relation::composite(category).is_some() {
            return LayoutFamily::CompositeCollection;
        }
        match folder {
            OBJECTS_FOLDER => LayoutFamily::CompositeObject,
            "reports" | "dashboards" | "email" => {
                LayoutFamily::FolderPerObject { skip_sidecars: false }
            }
            "documents" => LayoutFamily::FolderPerObject { skip_sidecars: true },
            "approvalProcesses" | "customMetadata" | "duplicateRules" => {
                LayoutFamily::InlineSeparator { quick_actions: false }
            }
            "quickActions" => LayoutFamily::InlineSeparator { quick_actions: true },
            "flows" | "standardValueSetTranslations" => LayoutFamily::VersionSuffixed,
            "layouts" => LayoutFamily::Layouts,
            "objectTranslations" => LayoutFamily::Translations,
            "aura" | "lwc" => LayoutFamily::Bundle,
            "staticresources" => LayoutFamily::StaticResources,
            "bots" => LayoutFamily::Bots,
            _ => LayoutFamily::Flat,
        }
    }

    /// Whether deleting a file inside an Object of this family may leave the Object alive.
    pub fn has_partial_deletes(&self) -> bool {
        matches!(self, LayoutFamily::Bundle | LayoutFamily::StaticResources)
    }
}
