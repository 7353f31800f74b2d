//! Category and folder name constants.

pub const APEX_CLASS: &str = "ApexClass";
pub const APEX_COMPONENT: &str = "ApexComponent";
pub const APEX_PAGE: &str = "ApexPage";
pub const APPROVAL_PROCESS: &str = "ApprovalProcess";
pub const ASSIGNMENT_RULE: &str = "AssignmentRule";
pub const ASSIGNMENT_RULES: &str = "AssignmentRules";
pub const AURA_DEFINITION_BUNDLE: &str = "AuraDefinitionBundle";
pub const AUTORESPONSE_RULE: &str = "AutoResponseRule";
pub const AUTORESPONSE_RULES: &str = "AutoResponseRules";
pub const BOT: &str = "Bot";
pub const BOT_VERSION: &str = "BotVersion";
pub const BUSINESS_PROCESS: &str = "BusinessProcess";
pub const COMPACT_LAYOUT: &str = "CompactLayout";
pub const CUSTOM_FIELD: &str = "CustomField";
pub const CUSTOM_LABEL: &str = "CustomLabel";
pub const CUSTOM_LABELS: &str = "CustomLabels";
pub const CUSTOM_METADATA: &str = "CustomMetadata";
pub const CUSTOM_OBJECT: &str = "CustomObject";
pub const CUSTOM_OBJECT_TRANSLATION: &str = "CustomObjectTranslation";
pub const DASHBOARD: &str = "Dashboard";
pub const DOCUMENT: &str = "Document";
pub const DUPLICATE_RULE: &str = "DuplicateRule";
pub const EMAIL_TEMPLATE: &str = "EmailTemplate";
pub const ESCALATION_RULE: &str = "EscalationRule";
pub const ESCALATION_RULES: &str = "EscalationRules";
pub const FIELD_SET: &str = "FieldSet";
pub const FLOW: &str = "Flow";
pub const INDEX: &str = "Index";
pub const LAYOUT: &str = "Layout";
pub const LIGHTNING_COMPONENT_BUNDLE: &str = "LightningComponentBundle";
pub const LIST_VIEW: &str = "ListView";
pub const MATCHING_RULE: &str = "MatchingRule";
pub const MATCHING_RULES: &str = "MatchingRules";
pub const QUICK_ACTION: &str = "QuickAction";
pub const RECORD_TYPE: &str = "RecordType";
pub const REPORT: &str = "Report";
pub const SHARING_CRITERIA_RULE: &str = "SharingCriteriaRule";
pub const SHARING_GUEST_RULE: &str = "SharingGuestRule";
pub const SHARING_OWNER_RULE: &str = "SharingOwnerRule";
pub const SHARING_REASON: &str = "SharingReason";
pub const SHARING_RULES: &str = "SharingRules";
pub const SHARING_TERRITORY_RULE: &str = "SharingTerritoryRule";
pub const STANDARD_VALUE_SET_TRANSLATION: &str = "StandardValueSetTranslation";
pub const STATIC_RESOURCE: &str = "StaticResource";
pub const VALIDATION_RULE: &str = "ValidationRule";
pub const WEB_LINK: &str = "WebLink";
pub const WORKFLOW: &str = "Workflow";
pub const WORKFLOW_ALERT: &str = "WorkflowAlert";
pub const WORKFLOW_FIELD_UPDATE: &str = "WorkflowFieldUpdate";
pub const WORKFLOW_KNOWLEDGE_PUBLISH: &str = "WorkflowKnowledgePublish";
pub const WORKFLOW_OUTBOUND_MESSAGE: &str = "WorkflowOutboundMessage";
pub const WORKFLOW_RULE: &str = "WorkflowRule";
pub const WORKFLOW_SEND: &str = "WorkflowSend";
pub const WORKFLOW_TASK: &str = "WorkflowTask";

/// Synthetic Object grouping global (un-nested) quick actions.
pub const GLOBAL_ACTIONS: &str = "GlobalActions";

/// Manifest wildcard member.
pub const WILDCARD: &str = "*";

/// Sidecar descriptor suffix in source format.
pub const META_SUFFIX: &str = "-meta.xml";

/// Ending of a folder descriptor (`Sales.reportFolder-meta.xml`).
pub const FOLDER_DESCRIPTOR_SUFFIX: &str = "Folder-meta.xml";

/// Conventional metadata root below a package directory.
pub const DEFAULT_PACKAGE_SUBPATH: &str = "main/default";

/// Folder that holds one sub-folder per table-like entity.
pub const OBJECTS_FOLDER: &str = "objects";

/// Sub-folders of `objects/<Object>/` and the category each one feeds.
pub const OBJECT_CHILD_FOLDERS: [(&str, &str); 10] = [
    ("fields", CUSTOM_FIELD),
    ("indexes", INDEX),
    ("recordTypes", RECORD_TYPE),
    ("listViews", LIST_VIEW),
    ("businessProcesses", BUSINESS_PROCESS),
    ("compactLayouts", COMPACT_LAYOUT),
    ("validationRules", VALIDATION_RULE),
    ("sharingReasons", SHARING_REASON),
    ("fieldSets", FIELD_SET),
    ("webLinks", WEB_LINK),
];

/// Categories whose removal wins over a deploy of the same node.
pub const DELETE_PRIORITY: [&str; 6] = [
    AURA_DEFINITION_BUNDLE,
    LIGHTNING_COMPONENT_BUNDLE,
    EMAIL_TEMPLATE,
    STATIC_RESOURCE,
    APEX_PAGE,
    APEX_COMPONENT,
];

/// Categories whose deploy wins over a removal of the same node.
pub const DEPLOY_PRIORITY: [&str; 16] = [
    CUSTOM_LABEL,
    WORKFLOW_ALERT,
    WORKFLOW_FIELD_UPDATE,
    WORKFLOW_KNOWLEDGE_PUBLISH,
    WORKFLOW_OUTBOUND_MESSAGE,
    WORKFLOW_RULE,
    WORKFLOW_SEND,
    WORKFLOW_TASK,
    SHARING_CRITERIA_RULE,
    SHARING_OWNER_RULE,
    SHARING_GUEST_RULE,
    SHARING_TERRITORY_RULE,
    ASSIGNMENT_RULE,
    AUTORESPONSE_RULE,
    ESCALATION_RULE,
    MATCHING_RULE,
];

/// Look up the category fed by an `objects/<Object>/<folder>` sub-folder.
pub fn object_child_category(folder: &str) -> Option<&'static str> {
    OBJECT_CHILD_FOLDERS
        .iter()
        .find(|(name, _)| *name == folder)
        .map(|(_, category)| *category)
}

/// Reverse of [`object_child_category`].
pub fn object_child_folder(category: &str) -> Option<&'static str> {
    OBJECT_CHILD_FOLDERS
        .iter()
        .find(|(_, name)| *name == category)
        .map(|(folder, _)| *folder)
}
