use metatree::fs::LocalFileSystem;
use metatree::tree::Container;
use metatree::DirectoryTreeBuilder;

use crate::integration::support::{folder_map, sample_project, write, BASE};

#[test]
fn scan_builds_every_family() {
    let project = sample_project();
    let catalog = DirectoryTreeBuilder::new(&LocalFileSystem)
        .build(project.path(), &folder_map())
        .unwrap();

    assert!(catalog["ApexClass"].get_child("Util").is_some());
    assert!(catalog["CustomObject"].get_child("Account").is_some());
    assert!(catalog["CustomField"]
        .get_child("Account")
        .unwrap()
        .get_child("Test__c")
        .is_some());
    assert!(catalog["WorkflowAlert"]
        .get_child("Case")
        .unwrap()
        .get_child("MyAlert")
        .is_some());
    assert!(catalog["WorkflowRule"]
        .get_child("Case")
        .unwrap()
        .get_child("OnCreate")
        .is_some());
    assert!(catalog["CustomLabel"].get_child("Greeting").is_some());
    assert!(catalog["Layout"]
        .get_child("Account")
        .unwrap()
        .get_child("Account Layout")
        .is_some());
    assert!(catalog["Report"]
        .get_child("Sales")
        .unwrap()
        .get_child("Pipeline")
        .is_some());
    assert_eq!(
        catalog["LightningComponentBundle"].childs.keys().collect::<Vec<_>>(),
        vec!["card"]
    );
    assert!(catalog["StaticResource"].get_child("logo").is_some());
}

#[test]
fn scanned_nodes_are_unchecked_with_paths() {
    let project = sample_project();
    let catalog = DirectoryTreeBuilder::new(&LocalFileSystem)
        .build(project.path(), &folder_map())
        .unwrap();
    for metadata_type in catalog.values() {
        assert!(!metadata_type.checked);
        for object in metadata_type.childs.values() {
            assert!(!object.checked);
            assert!(object.childs.values().all(|item| !item.checked));
        }
    }
    let util = catalog["ApexClass"].get_child("Util").unwrap();
    assert!(util.path.as_deref().unwrap().contains("classes"));
}

#[test]
fn rescanning_unchanged_project_is_idempotent() {
    let project = sample_project();
    let builder = DirectoryTreeBuilder::new(&LocalFileSystem);
    let first = builder.build(project.path(), &folder_map()).unwrap();
    let second = builder.build(project.path(), &folder_map()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn every_package_directory_is_scanned() {
    let project = sample_project();
    write(
        project.path(),
        "sfdx-project.json",
        r#"{"packageDirectories":[{"path":"force-app","default":true},{"path":"extras"}]}"#,
    );
    write(project.path(), "extras/main/default/classes/Extra.cls", "");
    write(project.path(), &format!("{}/classes/Other.cls", BASE), "");

    let catalog = DirectoryTreeBuilder::new(&LocalFileSystem)
        .build(project.path(), &folder_map())
        .unwrap();
    let classes = &catalog["ApexClass"];
    assert_eq!(
        classes.childs.keys().collect::<Vec<_>>(),
        vec!["Extra", "Other", "Util"]
    );
}
