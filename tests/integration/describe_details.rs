use metatree::create_metadata_details;
use serde_json::Value;

use crate::integration::support::{details, DESCRIBE_JSON};

#[test]
fn flattening_yields_parents_plus_children() {
    let response: Value = serde_json::from_str(DESCRIBE_JSON).unwrap();
    let entries = response["result"]["metadataObjects"].as_array().unwrap();
    let children: usize = entries
        .iter()
        .map(|entry| {
            entry
                .get("childXmlNames")
                .and_then(Value::as_array)
                .map_or(0, Vec::len)
        })
        .sum();

    let flattened = create_metadata_details(&response).unwrap();
    assert_eq!(flattened.len(), entries.len() + children);
}

#[test]
fn children_inherit_parent_folder_and_meta_flag() {
    let details = details();
    let field = details.iter().find(|d| d.xml_name == "CustomField").unwrap();
    assert_eq!(field.directory_name, "objects");
    assert!(!field.meta_file);
    assert_eq!(field.suffix.as_deref(), Some("field"));

    let alert = details.iter().find(|d| d.xml_name == "WorkflowAlert").unwrap();
    assert_eq!(alert.directory_name, "workflows");
    assert_eq!(alert.suffix, None);
}

#[test]
fn bare_array_response_is_accepted() {
    let response = serde_json::json!([
        {"xmlName": "ApexPage", "directoryName": "pages", "suffix": "page", "metaFile": true}
    ]);
    let flattened = create_metadata_details(&response).unwrap();
    assert_eq!(flattened.len(), 1);
    assert!(flattened[0].meta_file);
}

#[test]
fn response_without_objects_is_rejected() {
    let result = create_metadata_details(&serde_json::json!({"status": 1}));
    assert!(matches!(result, Err(metatree::MetadataError::InputShape(_))));
}
