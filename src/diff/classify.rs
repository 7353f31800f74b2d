//! Per-file routing: path → category folder → family → position.

use super::collection_scan::{scan_lines, CollectionMatch};
use super::record::{ChangeMode, DiffRecord};
use super::{DiffClassifier, FileChange};
use crate::catalog::names::*;
use crate::catalog::{relation, CompositeCategory, LayoutFamily};
use crate::classifier::{self, MemberName, Separator};
use crate::describe::MetadataDetail;
use tracing::debug;

/// Extensions of the file that defines an Aura or LWC bundle.
const BUNDLE_ROOT_EXTENSIONS: [&str; 6] = ["cmp", "app", "evt", "intf", "tokens", "js"];

/// A changed file resolved against the folder map.
#[derive(Debug, Clone)]
pub struct Located<'m> {
    /// Folder segments below the metadata root; the first is the category folder.
    pub folders: Vec<String>,
    pub file: String,
    pub detail: &'m MetadataDetail,
}

impl<'m> Located<'m> {
    pub fn category_folder(&self) -> &str {
        self.folders.first().map(String::as_str).unwrap_or_default()
    }

    /// First sub-folder below the category folder (report folder, bundle, object, ...).
    fn container(&self) -> Option<&str> {
        self.folders.get(1).map(String::as_str)
    }

    fn base_name(&self) -> String {
        classifier::base_name(&self.file, self.detail.suffix.as_deref())
    }
}

impl<'a> DiffClassifier<'a> {
    /// Resolve a repository path to its category folder.
    ///
    /// With source roots configured the path must sit under one of them;
    /// the root and the `main/default` segment are stripped and the next
    /// segment must be a known category folder. Without source roots the
    /// earliest segment naming a known folder is used.
    pub fn locate(&self, path: &str) -> Option<Located<'a>> {
        let normalized = path.replace('\\', "/");
        let mut relative = normalized.trim_start_matches("./").trim_start_matches('/');
        if !self.source_roots.is_empty() {
            relative = self.source_roots.iter().find_map(|root| {
                relative
                    .strip_prefix(root.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
            })?;
        }
        if let Some(rest) = relative
            .strip_prefix(DEFAULT_PACKAGE_SUBPATH)
            .and_then(|rest| rest.strip_prefix('/'))
        {
            relative = rest;
        }

        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        let (file, folders) = segments.split_last()?;
        let start = if self.source_roots.is_empty() {
            folders
                .iter()
                .position(|folder| self.folder_map.contains_folder(folder))?
        } else {
            0
        };
        let folders = &folders[start..];
        if !self.folder_map.contains_folder(folders.first()?) {
            return None;
        }
        let detail = self.folder_map.resolve(folders)?;
        Some(Located {
            folders: folders.iter().map(|s| s.to_string()).collect(),
            file: file.to_string(),
            detail,
        })
    }

    pub(crate) fn classify_record(&self, record: &DiffRecord) -> FileChange {
        let mut change = FileChange::default();
        let Some(located) = self.locate(&record.path) else {
            debug!(path = %record.path, "Path outside known category folders");
            return change;
        };
        if self.ignored_files.iter().any(|ignored| *ignored == located.file) {
            debug!(path = %record.path, "Ignored file");
            return change;
        }
        let family = LayoutFamily::for_folder(located.category_folder(), &located.detail.xml_name);
        if family == LayoutFamily::Bundle && located.container().is_none() {
            debug!(path = %record.path, "File outside any bundle");
            return change;
        }

        if family == LayoutFamily::CompositeCollection {
            if let Some(composite) = relation::composite(&located.detail.xml_name) {
                self.classify_composite(record, &located, composite, &mut change);
                return change;
            }
        }

        let Some(position) = self.position(&located, family) else {
            debug!(path = %record.path, ?family, "No position for file");
            return change;
        };
        match record.mode {
            ChangeMode::New | ChangeMode::Edit => change.deploy.push(position),
            ChangeMode::Delete
                if family.has_partial_deletes() && !is_defining_file(&located, family) =>
            {
                // The Object survives; ship what is left of it.
                change.deploy.push(position)
            }
            ChangeMode::Delete => change.delete.push(position),
        }
        change
    }

    /// `(category, member)` of a non-composite file.
    fn position(&self, located: &Located<'_>, family: LayoutFamily) -> Option<(String, MemberName)> {
        let category = located.detail.xml_name.clone();
        let member = match family {
            LayoutFamily::Flat | LayoutFamily::CompositeCollection => {
                MemberName::object(located.base_name())
            }
            LayoutFamily::FolderPerObject { .. } => {
                let parents = &located.folders[1..];
                if located.file.ends_with(FOLDER_DESCRIPTOR_SUFFIX) || parents.is_empty() {
                    // Folder descriptor such as `Sales/Sub.reportFolder-meta.xml`.
                    let mut path = parents.to_vec();
                    path.push(folder_descriptor_name(&located.file));
                    MemberName::object(path.join("/"))
                } else {
                    MemberName::nested(parents.join("/"), located.base_name())
                }
            }
            LayoutFamily::InlineSeparator { quick_actions } => {
                let member = classifier::split_on(&located.base_name(), Separator::Dot);
                if quick_actions && member.item.is_none() {
                    classifier::global_action(&member.object, self.group_global_actions)
                } else {
                    member
                }
            }
            LayoutFamily::VersionSuffixed | LayoutFamily::Layouts => {
                classifier::split_on(&located.base_name(), Separator::Dash)
            }
            LayoutFamily::Translations => {
                let name = located
                    .container()
                    .map(str::to_string)
                    .unwrap_or_else(|| located.base_name());
                classifier::split_on(&name, Separator::Dash)
            }
            LayoutFamily::CompositeObject => return self.object_position(located),
            LayoutFamily::Bundle | LayoutFamily::StaticResources => MemberName::object(
                located
                    .container()
                    .map(str::to_string)
                    .unwrap_or_else(|| located.base_name()),
            ),
            LayoutFamily::Bots => return self.bot_position(located),
        };
        Some((category, member))
    }

    /// `objects/<Object>/...`: the descriptor feeds CustomObject, child folders their own Type.
    fn object_position(&self, located: &Located<'_>) -> Option<(String, MemberName)> {
        let Some(object) = located.container() else {
            return Some((CUSTOM_OBJECT.to_string(), MemberName::object(located.base_name())));
        };
        match located.folders.get(2) {
            None => Some((CUSTOM_OBJECT.to_string(), MemberName::object(object))),
            Some(child_folder) => {
                let category = object_child_category(child_folder)?;
                let item =
                    classifier::base_name(&located.file, self.folder_map.suffix_of(category));
                Some((category.to_string(), MemberName::nested(object, item)))
            }
        }
    }

    fn bot_position(&self, located: &Located<'_>) -> Option<(String, MemberName)> {
        let bot = located.container()?;
        let version_suffix = self.folder_map.suffix_of(BOT_VERSION).unwrap_or("botVersion");
        let version_marker = format!(".{}{}", version_suffix, META_SUFFIX);
        if located.file.ends_with(&version_marker) {
            let version = classifier::base_name(&located.file, Some(version_suffix));
            return Some((BOT_VERSION.to_string(), MemberName::nested(bot, version)));
        }
        Some((located.detail.xml_name.clone(), MemberName::object(bot)))
    }

    /// Split the changed lines of a composite file into element positions.
    ///
    /// Elements found in added lines are deployed and those in removed lines
    /// deleted. When no element is recognized the whole file Object is used:
    /// deployed for new and edited files, deleted for removed ones.
    fn classify_composite(
        &self,
        record: &DiffRecord,
        located: &Located<'_>,
        composite: &CompositeCategory,
        change: &mut FileChange,
    ) {
        let file_name = located.base_name();
        let element = |found: CollectionMatch| {
            let member = if composite.flat {
                MemberName::object(found.value)
            } else {
                MemberName::nested(&file_name, found.value)
            };
            (found.relation.target.to_string(), member)
        };
        let whole_file = (composite.category.to_string(), MemberName::object(&file_name));

        let removed = scan_lines(composite, &record.removed_lines);
        match record.mode {
            ChangeMode::New | ChangeMode::Edit => {
                let added = scan_lines(composite, &record.added_lines);
                if added.is_empty() {
                    change.deploy.push(whole_file);
                } else {
                    change.deploy.extend(added.into_iter().map(&element));
                }
                change.delete.extend(removed.into_iter().map(&element));
            }
            ChangeMode::Delete => {
                if removed.is_empty() {
                    change.delete.push(whole_file);
                } else {
                    change.delete.extend(removed.into_iter().map(&element));
                }
            }
        }
    }
}

/// Whether deleting this file removes its whole Object.
///
/// Bundles are removed with their defining file (`<bundle>.cmp`,
/// `<bundle>.js`, ...); static resources only when the top-level resource
/// file goes, not a file inside an unpacked folder.
pub fn is_defining_file(located: &Located<'_>, family: LayoutFamily) -> bool {
    match family {
        LayoutFamily::StaticResources => located.container().is_none(),
        LayoutFamily::Bundle => {
            let Some(bundle) = located.container() else {
                return true;
            };
            if located.folders.len() > 2 {
                return false;
            }
            let name = located.file.strip_suffix(META_SUFFIX).unwrap_or(&located.file);
            match name.split_once('.') {
                Some((stem, extension)) => {
                    stem == bundle && BUNDLE_ROOT_EXTENSIONS.contains(&extension)
                }
                None => false,
            }
        }
        _ => true,
    }
}

/// `Sales.reportFolder-meta.xml` → `Sales`.
fn folder_descriptor_name(file: &str) -> String {
    file.split('.').next().unwrap_or(file).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::tests::sample_details;
    use crate::describe::FolderMetadataMap;

    const BASE: &str = "force-app/main/default";

    fn positions(map: &FolderMetadataMap, record: DiffRecord) -> FileChange {
        DiffClassifier::new(map)
            .with_source_roots(["force-app"])
            .classify_record(&record)
    }

    fn deploy(relative: &str) -> Vec<(String, MemberName)> {
        let map = FolderMetadataMap::from_details(&sample_details());
        positions(&map, DiffRecord::new(format!("{}/{}", BASE, relative), ChangeMode::Edit)).deploy
    }

    fn at(category: &str, object: &str, item: Option<&str>) -> (String, MemberName) {
        let member = match item {
            Some(item) => MemberName::nested(object, item),
            None => MemberName::object(object),
        };
        (category.to_string(), member)
    }

    #[test]
    fn test_locate_strips_roots() {
        let map = FolderMetadataMap::from_details(&sample_details());
        let classifier = DiffClassifier::new(&map).with_source_roots(["force-app"]);
        let located = classifier
            .locate("force-app/main/default/objects/Account/fields/A__c.field-meta.xml")
            .unwrap();
        assert_eq!(located.folders, vec!["objects", "Account", "fields"]);
        assert_eq!(located.detail.xml_name, CUSTOM_FIELD);
        assert!(classifier.locate("force-app/main/default/README.md").is_none());
        assert!(classifier.locate("docs/pages/guide.md").is_none());
        assert!(classifier.locate("force-app/main/default/docs/classes/A.cls").is_none());
        assert!(classifier.locate("force-app/classes/A.cls").is_some());
    }

    #[test]
    fn test_positions_per_family() {
        assert_eq!(deploy("classes/Util.cls-meta.xml"), vec![at(APEX_CLASS, "Util", None)]);
        assert_eq!(
            deploy("reports/Sales/Pipeline.report-meta.xml"),
            vec![at(REPORT, "Sales", Some("Pipeline"))]
        );
        assert_eq!(
            deploy("reports/Sales.reportFolder-meta.xml"),
            vec![at(REPORT, "Sales", None)]
        );
        assert_eq!(
            deploy("reports/Sales/Sub/Forecast.report-meta.xml"),
            vec![at(REPORT, "Sales/Sub", Some("Forecast"))]
        );
        assert_eq!(
            deploy("reports/Sales/Sub.reportFolder-meta.xml"),
            vec![at(REPORT, "Sales/Sub", None)]
        );
        assert_eq!(
            deploy("documents/Shared/logo.png"),
            vec![at(DOCUMENT, "Shared", Some("logo"))]
        );
        assert_eq!(
            deploy("customMetadata/Config.Default.md-meta.xml"),
            vec![at(CUSTOM_METADATA, "Config", Some("Default"))]
        );
        assert_eq!(
            deploy("quickActions/LogACall.quickAction-meta.xml"),
            vec![at(QUICK_ACTION, "LogACall", Some("LogACall"))]
        );
        assert_eq!(
            deploy("flows/Onboarding-3.flow-meta.xml"),
            vec![at(FLOW, "Onboarding", Some("3"))]
        );
        assert_eq!(
            deploy("layouts/Account-Account Layout.layout-meta.xml"),
            vec![at(LAYOUT, "Account", Some("Account Layout"))]
        );
        assert_eq!(
            deploy("objectTranslations/Account-es/Name__c.fieldTranslation-meta.xml"),
            vec![at(CUSTOM_OBJECT_TRANSLATION, "Account", Some("es"))]
        );
        assert_eq!(
            deploy("objects/Account/Account.object-meta.xml"),
            vec![at(CUSTOM_OBJECT, "Account", None)]
        );
        assert_eq!(
            deploy("objects/Account/recordTypes/Partner.recordType-meta.xml"),
            vec![at(RECORD_TYPE, "Account", Some("Partner"))]
        );
        assert_eq!(deploy("lwc/card/card.html"), vec![at(LIGHTNING_COMPONENT_BUNDLE, "card", None)]);
        assert_eq!(
            deploy("staticresources/lib/js/app.js"),
            vec![at(STATIC_RESOURCE, "lib", None)]
        );
        assert_eq!(
            deploy("staticresources/logo.resource-meta.xml"),
            vec![at(STATIC_RESOURCE, "logo", None)]
        );
        assert_eq!(
            deploy("bots/Helper/v2.botVersion-meta.xml"),
            vec![at(BOT_VERSION, "Helper", Some("v2"))]
        );
        assert_eq!(deploy("bots/Helper/Helper.bot-meta.xml"), vec![at(BOT, "Helper", None)]);
    }

    #[test]
    fn test_grouped_global_actions() {
        let map = FolderMetadataMap::from_details(&sample_details());
        let change = DiffClassifier::new(&map)
            .with_group_global_actions(true)
            .classify_record(&DiffRecord::new(
                "quickActions/LogACall.quickAction-meta.xml",
                ChangeMode::New,
            ));
        assert_eq!(change.deploy, vec![at(QUICK_ACTION, GLOBAL_ACTIONS, Some("LogACall"))]);
    }

    #[test]
    fn test_defining_files() {
        let map = FolderMetadataMap::from_details(&sample_details());
        let classifier = DiffClassifier::new(&map);
        let defining = |path: &str| {
            let located = classifier.locate(path).unwrap();
            let family =
                LayoutFamily::for_folder(located.category_folder(), &located.detail.xml_name);
            is_defining_file(&located, family)
        };
        assert!(defining("aura/Banner/Banner.cmp"));
        assert!(defining("aura/Banner/Banner.cmp-meta.xml"));
        assert!(!defining("aura/Banner/BannerController.js"));
        assert!(defining("lwc/card/card.js"));
        assert!(defining("lwc/card/card.js-meta.xml"));
        assert!(!defining("lwc/card/card.html"));
        assert!(!defining("lwc/card/__tests__/card.js"));
        assert!(defining("staticresources/logo.resource"));
        assert!(!defining("staticresources/lib/js/app.js"));
        assert!(defining("classes/Util.cls"));
    }

    #[test]
    fn test_composite_edit_splits_elements() {
        let map = FolderMetadataMap::from_details(&sample_details());
        let record = DiffRecord::new(
            format!("{}/workflows/Case.workflow-meta.xml", BASE),
            ChangeMode::Edit,
        )
        .with_added(["<alerts>", "<fullName>NewAlert</fullName>", "</alerts>"])
        .with_removed(["<rules>", "<fullName>OldRule</fullName>", "</rules>"]);
        let change = positions(&map, record);
        assert_eq!(change.deploy, vec![at(WORKFLOW_ALERT, "Case", Some("NewAlert"))]);
        assert_eq!(change.delete, vec![at(WORKFLOW_RULE, "Case", Some("OldRule"))]);
    }

    #[test]
    fn test_composite_without_elements_falls_back_to_file() {
        let map = FolderMetadataMap::from_details(&sample_details());
        let record = DiffRecord::new(
            format!("{}/labels/CustomLabels.labels-meta.xml", BASE),
            ChangeMode::Edit,
        )
        .with_added(["        <value>Hi</value>"])
        .with_removed(["        <value>Hello</value>"]);
        let change = positions(&map, record);
        assert_eq!(change.deploy, vec![at(CUSTOM_LABELS, "CustomLabels", None)]);
        assert!(change.delete.is_empty());

        let record = DiffRecord::new(
            format!("{}/labels/CustomLabels.labels-meta.xml", BASE),
            ChangeMode::Delete,
        );
        let change = positions(&map, record);
        assert!(change.deploy.is_empty());
        assert_eq!(change.delete, vec![at(CUSTOM_LABELS, "CustomLabels", None)]);
    }

    #[test]
    fn test_composite_flat_labels() {
        let map = FolderMetadataMap::from_details(&sample_details());
        let record = DiffRecord::new(
            format!("{}/labels/CustomLabels.labels-meta.xml", BASE),
            ChangeMode::New,
        )
        .with_added(["<labels>", "<fullName>Greeting</fullName>", "</labels>"]);
        let change = positions(&map, record);
        assert_eq!(change.deploy, vec![at(CUSTOM_LABEL, "Greeting", None)]);
    }
}
