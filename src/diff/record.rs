//! Per-file change records.

use crate::error::MetadataError;
use serde::{Deserialize, Serialize};

/// How a file changed in the compared revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeMode {
    #[serde(alias = "new file", alias = "added", alias = "A")]
    New,
    #[serde(alias = "edit file", alias = "modified", alias = "M")]
    Edit,
    #[serde(alias = "delete file", alias = "deleted file", alias = "deleted", alias = "D")]
    Delete,
}

/// Line-level summary of one changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRecord {
    /// Path relative to the repository root.
    pub path: String,
    pub mode: ChangeMode,
    #[serde(default)]
    pub added_lines: Vec<String>,
    #[serde(default)]
    pub removed_lines: Vec<String>,
}

impl DiffRecord {
    pub fn new(path: impl Into<String>, mode: ChangeMode) -> Self {
        Self {
            path: path.into(),
            mode,
            added_lines: Vec::new(),
            removed_lines: Vec::new(),
        }
    }

    pub fn with_added<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.added_lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_removed<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.removed_lines.extend(lines.into_iter().map(Into::into));
        self
    }
}

/// Parse change records from JSON (an array of records) or unified diff text.
pub fn records_from_str(text: &str) -> Result<Vec<DiffRecord>, MetadataError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| MetadataError::InputShape(format!("diff records: {}", e)));
    }
    Ok(super::unified::parse_unified_diff(text))
}
