//! Collection relation: composite files that embed instances of other categories.
//!
//! A composite file such as `Account.workflow-meta.xml` holds `<alerts>`,
//! `<rules>`, ... blocks; each block is identified by its `<fullName>` and is
//! logically an instance of another category (`WorkflowAlert`, `WorkflowRule`).

use crate::catalog::names::*;

/// One `<collection>` block inside a composite file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionRelation {
    /// Markup tag wrapping each element, e.g. `alerts`.
    pub collection: &'static str,
    /// Tag inside the element that carries its identifier.
    pub field_key: &'static str,
    /// Category each element belongs to.
    pub target: &'static str,
}

/// A composite category and the collections it embeds.
#[derive(Debug, Clone, Copy)]
pub struct CompositeCategory {
    pub category: &'static str,
    /// Elements become Objects directly (no per-file intermediate Object).
    pub flat: bool,
    pub collections: &'static [CollectionRelation],
}

impl CompositeCategory {
    pub fn collection(&self, name: &str) -> Option<&'static CollectionRelation> {
        self.collections.iter().find(|relation| relation.collection == name)
    }

    pub fn targets(&self) -> impl Iterator<Item = &'static str> {
        self.collections.iter().map(|relation| relation.target)
    }
}

const fn full_name(collection: &'static str, target: &'static str) -> CollectionRelation {
    CollectionRelation {
        collection,
        field_key: "fullName",
        target,
    }
}

pub static COMPOSITE_CATEGORIES: &[CompositeCategory] = &[
    CompositeCategory {
        category: WORKFLOW,
        flat: false,
        collections: &[
            full_name("alerts", WORKFLOW_ALERT),
            full_name("fieldUpdates", WORKFLOW_FIELD_UPDATE),
            full_name("knowledgePublishes", WORKFLOW_KNOWLEDGE_PUBLISH),
            full_name("outboundMessages", WORKFLOW_OUTBOUND_MESSAGE),
            full_name("rules", WORKFLOW_RULE),
            full_name("send", WORKFLOW_SEND),
            full_name("tasks", WORKFLOW_TASK),
        ],
    },
    CompositeCategory {
        category: SHARING_RULES,
        flat: false,
        collections: &[
            full_name("sharingCriteriaRules", SHARING_CRITERIA_RULE),
            full_name("sharingGuestRules", SHARING_GUEST_RULE),
            full_name("sharingOwnerRules", SHARING_OWNER_RULE),
            full_name("sharingTerritoryRules", SHARING_TERRITORY_RULE),
        ],
    },
    CompositeCategory {
        category: ASSIGNMENT_RULES,
        flat: false,
        collections: &[full_name("assignmentRule", ASSIGNMENT_RULE)],
    },
    CompositeCategory {
        category: AUTORESPONSE_RULES,
        flat: false,
        collections: &[full_name("autoResponseRule", AUTORESPONSE_RULE)],
    },
    CompositeCategory {
        category: ESCALATION_RULES,
        flat: false,
        collections: &[full_name("escalationRule", ESCALATION_RULE)],
    },
    CompositeCategory {
        category: MATCHING_RULES,
        flat: false,
        collections: &[full_name("matchingRules", MATCHING_RULE)],
    },
    CompositeCategory {
        category: CUSTOM_LABELS,
        flat: true,
        collections: &[full_name("labels", CUSTOM_LABEL)],
    },
];

/// Relation entry for a composite category, if it is one.
pub fn composite(category: &str) -> Option<&'static CompositeCategory> {
    COMPOSITE_CATEGORIES
        .iter()
        .find(|composite| composite.category == category)
}
