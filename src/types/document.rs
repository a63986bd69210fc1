//! Documentation Domain Types
//!
//! The records produced by one orchestrator run: one `DocumentRecord` per
//! visited selected path, plus one `SectionRecord` per synthesized section
//! for folder- and project-level documents. Records are owned by the
//! orchestrator until handed to the persistence gateway, after which the
//! store is authoritative.

use serde::{Deserialize, Serialize};

/// Level of a generated document in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocLevel {
    File,
    Folder,
    Project,
}

impl DocLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Project => "project",
        }
    }

    /// Parse the stored column value back into a level.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "file" => Some(Self::File),
            "folder" => Some(Self::Folder),
            "project" => Some(Self::Project),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document row ready for persistence.
///
/// Upsert semantics: a later run for the same `path` replaces the earlier
/// row, dropping its section rows.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub user_id: i64,
    pub path: String,
    pub content: String,
    pub project_name: String,
    pub level: DocLevel,
    pub root_path: String,
    pub model: String,
}

/// One synthesized section of a folder- or project-level document,
/// stored together with the literal prompt that produced it for
/// auditability.
#[derive(Debug, Clone)]
pub struct SectionRecord {
    pub name: String,
    pub content: String,
    pub prompt: String,
}

/// Selection of generation models per hierarchy level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSelection {
    pub file_model: String,
    pub folder_model: String,
    pub project_model: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            file_model: "llama-3.1-8b-instant".to_string(),
            folder_model: "llama-3.3-70b-versatile".to_string(),
            project_model: "llama-3.3-70b-versatile".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_level_as_str() {
        assert_eq!(DocLevel::File.as_str(), "file");
        assert_eq!(DocLevel::Folder.as_str(), "folder");
        assert_eq!(DocLevel::Project.as_str(), "project");
    }

    #[test]
    fn test_doc_level_parse_roundtrip() {
        for level in [DocLevel::File, DocLevel::Folder, DocLevel::Project] {
            assert_eq!(DocLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(DocLevel::parse("chapter"), None);
    }
}
