use metatree::tree::Container;
use metatree::{create_metadata_types_from_manifest, ManifestInput};
use std::collections::BTreeMap;

fn members(category: &str, names: &[&str]) -> ManifestInput {
    let mut members = BTreeMap::new();
    members.insert(
        category.to_string(),
        names.iter().map(|n| n.to_string()).collect(),
    );
    ManifestInput::Members(members)
}

#[test]
fn wildcard_only_checks_type() {
    let catalog = create_metadata_types_from_manifest(members("ApexClass", &["*"]), false).unwrap();
    let classes = &catalog["ApexClass"];
    assert!(classes.checked);
    assert!(classes.childs.is_empty());
}

#[test]
fn flat_members_become_checked_objects() {
    let catalog =
        create_metadata_types_from_manifest(members("CustomObject", &["Account", "Case"]), false)
            .unwrap();
    let objects = &catalog["CustomObject"];
    assert_eq!(objects.childs.len(), 2);
    for object in objects.childs.values() {
        assert!(object.checked);
        assert!(object.childs.is_empty());
    }
}

#[test]
fn manifest_file_round_trips_through_importer() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("package.xml");
    std::fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
    <types>
        <members>Account.Test__c</members>
        <name>CustomField</name>
    </types>
    <types>
        <members>Sales/Pipeline</members>
        <name>Report</name>
    </types>
    <version>58.0</version>
</Package>"#,
    )
    .unwrap();
    let catalog = create_metadata_types_from_manifest(ManifestInput::Path(path), false).unwrap();
    assert!(catalog["CustomField"]
        .get_child("Account")
        .unwrap()
        .get_child("Test__c")
        .unwrap()
        .checked);
    assert!(catalog["Report"]
        .get_child("Sales")
        .unwrap()
        .get_child("Pipeline")
        .is_some());
}

#[test]
fn markup_without_package_is_malformed() {
    let result = create_metadata_types_from_manifest(
        ManifestInput::Markup("<Types><name>ApexClass</name></Types>".to_string()),
        false,
    );
    assert!(matches!(result, Err(metatree::MetadataError::MalformedManifest(_))));
}
