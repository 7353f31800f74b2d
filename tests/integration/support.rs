//! Shared fixtures: a describe response and a project layout on disk.

use metatree::{FolderMetadataMap, MetadataDetail};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const BASE: &str = "force-app/main/default";

pub const DESCRIBE_JSON: &str = r#"{
  "status": 0,
  "result": {
    "metadataObjects": [
      {"xmlName": "ApexClass", "directoryName": "classes", "suffix": "cls", "inFolder": false, "metaFile": true, "childXmlNames": []},
      {"xmlName": "CustomObject", "directoryName": "objects", "suffix": "object", "inFolder": false, "metaFile": false,
       "childXmlNames": ["CustomField", "Index", "BusinessProcess", "RecordType", "CompactLayout", "WebLink", "ValidationRule", "SharingReason", "ListView", "FieldSet"]},
      {"xmlName": "Workflow", "directoryName": "workflows", "suffix": "workflow", "inFolder": false, "metaFile": false,
       "childXmlNames": ["WorkflowFieldUpdate", "WorkflowKnowledgePublish", "WorkflowTask", "WorkflowAlert", "WorkflowSend", "WorkflowOutboundMessage", "WorkflowRule"]},
      {"xmlName": "CustomLabels", "directoryName": "labels", "suffix": "labels", "inFolder": false, "metaFile": false, "childXmlNames": ["CustomLabel"]},
      {"xmlName": "Layout", "directoryName": "layouts", "suffix": "layout", "inFolder": false, "metaFile": false},
      {"xmlName": "QuickAction", "directoryName": "quickActions", "suffix": "quickAction", "inFolder": false, "metaFile": false},
      {"xmlName": "Report", "directoryName": "reports", "suffix": "report", "inFolder": true, "metaFile": false},
      {"xmlName": "LightningComponentBundle", "directoryName": "lwc", "inFolder": false, "metaFile": false},
      {"xmlName": "AuraDefinitionBundle", "directoryName": "aura", "inFolder": false, "metaFile": false},
      {"xmlName": "StaticResource", "directoryName": "staticresources", "suffix": "resource", "inFolder": false, "metaFile": true}
    ]
  }
}"#;

pub const WORKFLOW_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Workflow xmlns="http://soap.sforce.com/2006/04/metadata">
    <alerts>
        <fullName>MyAlert</fullName>
        <senderType>CurrentUser</senderType>
    </alerts>
    <rules>
        <fullName>OnCreate</fullName>
        <active>true</active>
    </rules>
</Workflow>"#;

pub const LABELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CustomLabels xmlns="http://soap.sforce.com/2006/04/metadata">
    <labels>
        <fullName>Greeting</fullName>
        <value>Hello</value>
    </labels>
</CustomLabels>"#;

pub fn details() -> Vec<MetadataDetail> {
    metatree::describe::details_from_str(DESCRIBE_JSON).unwrap()
}

pub fn folder_map() -> FolderMetadataMap {
    FolderMetadataMap::from_details(&details())
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project with one package directory and a representative layout.
pub fn sample_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(
        root,
        "sfdx-project.json",
        r#"{"packageDirectories":[{"path":"force-app","default":true}]}"#,
    );
    write(root, &format!("{}/classes/Util.cls", BASE), "public class Util {}");
    write(root, &format!("{}/classes/Util.cls-meta.xml", BASE), "<ApexClass/>");
    write(root, &format!("{}/objects/Account/Account.object-meta.xml", BASE), "<CustomObject/>");
    write(root, &format!("{}/objects/Account/fields/Test__c.field-meta.xml", BASE), "<CustomField/>");
    write(root, &format!("{}/workflows/Case.workflow-meta.xml", BASE), WORKFLOW_XML);
    write(root, &format!("{}/labels/CustomLabels.labels-meta.xml", BASE), LABELS_XML);
    write(root, &format!("{}/layouts/Account-Account Layout.layout-meta.xml", BASE), "<Layout/>");
    write(root, &format!("{}/quickActions/LogACall.quickAction-meta.xml", BASE), "<QuickAction/>");
    write(root, &format!("{}/reports/Sales/Pipeline.report-meta.xml", BASE), "<Report/>");
    write(root, &format!("{}/lwc/card/card.js", BASE), "");
    write(root, &format!("{}/lwc/card/card.js-meta.xml", BASE), "");
    write(root, &format!("{}/lwc/.eslintrc.json", BASE), "{}");
    write(root, &format!("{}/staticresources/logo.resource", BASE), "");
    temp
}
