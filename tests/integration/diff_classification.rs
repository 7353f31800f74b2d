use metatree::catalog::names::{DEPLOY_PRIORITY, WORKFLOW_ALERT};
use metatree::diff::parse_unified_diff;
use metatree::tree::Container;
use metatree::{ChangeMode, DiffClassifier, DiffRecord, MetadataTree};

use crate::integration::support::{folder_map, BASE};

fn checked(catalog: &MetadataTree, category: &str, object: &str, item: Option<&str>) -> Option<bool> {
    let object = catalog.get(category)?.get_child(object)?;
    match item {
        Some(item) => object.get_child(item).map(|i| i.checked),
        None => Some(object.checked),
    }
}

#[test]
fn edited_field_is_deployed() {
    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[DiffRecord::new(
            format!("{}/objects/Account/fields/Test__c.field-meta.xml", BASE),
            ChangeMode::Edit,
        )
        .with_added(["    <label>Test</label>"])]);
    assert_eq!(
        checked(&result.to_deploy, "CustomField", "Account", Some("Test__c")),
        Some(true)
    );
    assert!(result.to_delete.is_empty());
}

#[test]
fn composite_element_is_deployed_under_file_object() {
    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[DiffRecord::new(
            format!("{}/workflows/Account.workflow-meta.xml", BASE),
            ChangeMode::Edit,
        )
        .with_added([
            "    <alerts>",
            "        <fullName>MyAlert</fullName>",
            "        <senderType>CurrentUser</senderType>",
            "    </alerts>",
        ])]);
    assert_eq!(
        checked(&result.to_deploy, WORKFLOW_ALERT, "Account", Some("MyAlert")),
        Some(true)
    );
    assert!(!result.to_deploy.contains_key("Workflow"));
}

#[test]
fn removing_auxiliary_bundle_file_redeploys_bundle() {
    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[
            DiffRecord::new(format!("{}/lwc/card/card.css", BASE), ChangeMode::Delete),
            DiffRecord::new(format!("{}/aura/Banner/BannerHelper.js", BASE), ChangeMode::Delete),
        ]);
    assert_eq!(
        checked(&result.to_deploy, "LightningComponentBundle", "card", None),
        Some(true)
    );
    assert_eq!(
        checked(&result.to_deploy, "AuraDefinitionBundle", "Banner", None),
        Some(true)
    );
    assert!(result.to_delete.is_empty());
}

#[test]
fn deploy_priority_clears_conflicting_delete() {
    assert!(DEPLOY_PRIORITY.contains(&"CustomLabel"));
    let map = folder_map();
    let labels = format!("{}/labels/CustomLabels.labels-meta.xml", BASE);
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[DiffRecord::new(labels, ChangeMode::Edit)
            .with_removed(["<labels>", "<fullName>Greeting</fullName>", "<value>Hi</value>", "</labels>"])
            .with_added(["<labels>", "<fullName>Greeting</fullName>", "<value>Hello</value>", "</labels>"])]);
    assert_eq!(checked(&result.to_deploy, "CustomLabel", "Greeting", None), Some(true));
    assert_eq!(checked(&result.to_delete, "CustomLabel", "Greeting", None), Some(false));
}

#[test]
fn unified_diff_text_end_to_end() {
    let text = format!(
        "\
diff --git a/{base}/classes/Util.cls b/{base}/classes/Util.cls
deleted file mode 100644
index 1111111..0000000
--- a/{base}/classes/Util.cls
+++ /dev/null
@@ -1 +0,0 @@
-public class Util {{}}
diff --git a/{base}/workflows/Case.workflow-meta.xml b/{base}/workflows/Case.workflow-meta.xml
index 2222222..3333333 100644
--- a/{base}/workflows/Case.workflow-meta.xml
+++ b/{base}/workflows/Case.workflow-meta.xml
@@ -1,4 +1,8 @@
 <Workflow>
+    <rules>
+        <fullName>OnClose</fullName>
+    </rules>
-    <alerts>
-        <fullName>OldAlert</fullName>
-    </alerts>
 </Workflow>
",
        base = BASE
    );
    let records = parse_unified_diff(&text);
    assert_eq!(records.len(), 2);

    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&records);
    assert_eq!(checked(&result.to_delete, "ApexClass", "Util", None), Some(true));
    assert_eq!(
        checked(&result.to_deploy, "WorkflowRule", "Case", Some("OnClose")),
        Some(true)
    );
    assert_eq!(
        checked(&result.to_delete, "WorkflowAlert", "Case", Some("OldAlert")),
        Some(true)
    );
}

#[test]
fn unrecognized_files_are_skipped() {
    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[
            DiffRecord::new(".gitignore", ChangeMode::Edit),
            DiffRecord::new(format!("{}/lwc/.eslintrc.json", BASE), ChangeMode::Edit),
        ]);
    assert!(result.is_empty());
}

#[test]
fn files_outside_the_package_directory_are_skipped() {
    let map = folder_map();
    let result = DiffClassifier::new(&map)
        .with_source_roots(["force-app"])
        .classify(&[
            DiffRecord::new("docs/pages/guide.md", ChangeMode::Edit),
            DiffRecord::new("scripts/classes/old.md", ChangeMode::Delete),
        ]);
    assert!(result.is_empty());
}
