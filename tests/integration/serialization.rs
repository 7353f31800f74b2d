use metatree::fs::LocalFileSystem;
use metatree::serialize::{deserialize, deserialize_str, serialize, to_json_string};
use metatree::{ChangeMode, DiffClassifier, DiffRecord, DirectoryTreeBuilder};

use crate::integration::support::{folder_map, sample_project, BASE};

#[test]
fn scanned_catalog_round_trips() {
    let project = sample_project();
    let catalog = DirectoryTreeBuilder::new(&LocalFileSystem)
        .build(project.path(), &folder_map())
        .unwrap();
    let restored = deserialize(&serialize(&catalog).unwrap(), false).unwrap();
    assert_eq!(restored, catalog);

    let text = to_json_string(&catalog).unwrap();
    assert_eq!(deserialize_str(&text, true).unwrap(), catalog);
}

#[test]
fn diff_result_sides_round_trip() {
    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[DiffRecord::new(format!("{}/classes/Util.cls", BASE), ChangeMode::New)]);
    let restored = deserialize(&serialize(&result.to_deploy).unwrap(), false).unwrap();
    assert_eq!(restored, result.to_deploy);
    assert!(restored["ApexClass"].childs["Util"].checked);
}

#[test]
fn malformed_node_is_reported() {
    let value = serde_json::json!({"ApexClass": {"name": "ApexClass", "checked": 1, "childs": {}}});
    assert!(matches!(
        deserialize(&value, false),
        Err(metatree::MetadataError::MalformedTree(_))
    ));
}
