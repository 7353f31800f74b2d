use metatree::tooling::cli::{CliContext, Commands};
use std::fs;

use crate::integration::support::{sample_project, write, DESCRIBE_JSON};

fn json_command_output(cli: &CliContext, command: Commands) -> serde_json::Value {
    let output = cli.execute(&command).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn scan_json_contract_has_tree_shape() {
    let project = sample_project();
    write(project.path(), "describe.json", DESCRIBE_JSON);
    let cli = CliContext::new(project.path().to_path_buf(), None).unwrap();

    let parsed = json_command_output(
        &cli,
        Commands::Scan {
            describe: "describe.json".into(),
            group_global_actions: false,
            format: "json".to_string(),
        },
    );
    let classes = &parsed["ApexClass"];
    assert_eq!(classes["name"], "ApexClass");
    assert_eq!(classes["checked"], false);
    assert_eq!(classes["suffix"], "cls");
    assert!(classes["childs"]["Util"]["childs"].is_object());
}

#[test]
fn project_config_groups_global_actions() {
    let project = sample_project();
    write(project.path(), "describe.json", DESCRIBE_JSON);
    write(
        project.path(),
        ".metatree.toml",
        "[scan]\ngroup_global_actions = true\n",
    );
    let cli = CliContext::new(project.path().to_path_buf(), None).unwrap();
    assert!(cli.config().scan.group_global_actions);

    let parsed = json_command_output(
        &cli,
        Commands::Scan {
            describe: "describe.json".into(),
            group_global_actions: false,
            format: "json".to_string(),
        },
    );
    assert!(parsed["QuickAction"]["childs"]["GlobalActions"]["childs"]["LogACall"].is_object());
}

#[test]
fn diff_json_contract_has_both_sides() {
    let project = sample_project();
    write(project.path(), "describe.json", DESCRIBE_JSON);
    write(
        project.path(),
        "changes.json",
        r#"[
            {"path": "force-app/main/default/classes/Util.cls", "mode": "edit", "addedLines": ["x"]},
            {"path": "force-app/main/default/classes/Gone.cls", "mode": "delete"}
        ]"#,
    );
    let cli = CliContext::new(project.path().to_path_buf(), None).unwrap();
    let parsed = json_command_output(
        &cli,
        Commands::Diff {
            describe: "describe.json".into(),
            diffs: "changes.json".into(),
            group_global_actions: false,
            format: "json".to_string(),
        },
    );
    assert_eq!(parsed["toDeploy"]["ApexClass"]["childs"]["Util"]["checked"], true);
    assert_eq!(parsed["toDelete"]["ApexClass"]["childs"]["Gone"]["checked"], true);
}

#[test]
fn combine_merges_catalog_files() {
    let project = sample_project();
    fs::write(
        project.path().join("a.json"),
        r#"{"ApexClass": {"name": "ApexClass", "checked": false, "childs": {
            "Util": {"name": "Util", "checked": false, "childs": {}}}}}"#,
    )
    .unwrap();
    fs::write(
        project.path().join("b.json"),
        r#"{"ApexClass": {"name": "ApexClass", "checked": false, "childs": {
            "Util": {"name": "Util", "checked": true, "childs": {}},
            "Other": {"name": "Other", "checked": false, "childs": {}}}}}"#,
    )
    .unwrap();
    let cli = CliContext::new(project.path().to_path_buf(), None).unwrap();
    let parsed = json_command_output(
        &cli,
        Commands::Combine {
            files: vec!["a.json".into(), "b.json".into()],
            format: "json".to_string(),
        },
    );
    assert_eq!(parsed["ApexClass"]["childs"]["Util"]["checked"], true);
    assert!(parsed["ApexClass"]["childs"]["Other"].is_object());
}

#[test]
fn text_output_renders_summary() {
    let project = sample_project();
    write(project.path(), "describe.json", DESCRIBE_JSON);
    let cli = CliContext::new(project.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Details {
            describe: "describe.json".into(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("CustomField"));
}

#[test]
fn missing_project_root_is_rejected() {
    let temp = tempfile::TempDir::new().unwrap();
    let result = CliContext::new(temp.path().join("missing"), None);
    assert!(matches!(
        result,
        Err(metatree::MetadataError::PathResolution { .. })
    ));
}
