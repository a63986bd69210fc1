//! Canonical Documentation Sections
//!
//! Folder-level documents carry a fixed schema of six canonical sections;
//! project-level documents use a coarser four-section schema. The
//! `SectionContentMap` groups extracted per-path text by canonical section
//! for the synthesis prompts.

pub mod extractor;

use std::collections::BTreeMap;

use crate::prompts::keys;

/// The six canonical sections every folder-level document contains,
/// in their fixed declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalSection {
    OverviewAndPurpose,
    KeyFunctions,
    Architecture,
    InterFileRelationships,
    DependenciesAndExternalCalls,
    CodeSnippetsAndExamples,
}

impl CanonicalSection {
    /// All sections in declaration order.
    pub const ALL: [Self; 6] = [
        Self::OverviewAndPurpose,
        Self::KeyFunctions,
        Self::Architecture,
        Self::InterFileRelationships,
        Self::DependenciesAndExternalCalls,
        Self::CodeSnippetsAndExamples,
    ];

    /// The literal header token used in generated documents.
    pub fn header(&self) -> &'static str {
        match self {
            Self::OverviewAndPurpose => "Overview and Purpose",
            Self::KeyFunctions => "Key Functions",
            Self::Architecture => "Architecture",
            Self::InterFileRelationships => "Inter-File Relationships",
            Self::DependenciesAndExternalCalls => "Dependencies and External Calls",
            Self::CodeSnippetsAndExamples => "Code Snippets and Examples",
        }
    }

    /// Prompt store key for this section's output-format template.
    pub fn prompt_key(&self) -> &'static str {
        match self {
            Self::OverviewAndPurpose => keys::FOLDER_OVERVIEW,
            Self::KeyFunctions => keys::FOLDER_KEY_FUNCTIONS,
            Self::Architecture => keys::FOLDER_ARCHITECTURE,
            Self::InterFileRelationships => keys::FOLDER_INTER_RS,
            Self::DependenciesAndExternalCalls => keys::FOLDER_DEPENDENCIES,
            Self::CodeSnippetsAndExamples => keys::FOLDER_EXAMPLES,
        }
    }

    /// The coarser project-level bucket this section feeds (many-to-one).
    pub fn project_bucket(&self) -> ProjectSection {
        match self {
            Self::OverviewAndPurpose | Self::KeyFunctions => ProjectSection::Overview,
            Self::Architecture | Self::CodeSnippetsAndExamples => ProjectSection::Infrastructure,
            Self::InterFileRelationships => ProjectSection::Organization,
            Self::DependenciesAndExternalCalls => ProjectSection::Dependencies,
        }
    }
}

impl std::fmt::Display for CanonicalSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// The four project-level sections, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectSection {
    Overview,
    Infrastructure,
    Organization,
    Dependencies,
}

impl ProjectSection {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Infrastructure,
        Self::Organization,
        Self::Dependencies,
    ];

    /// Human-readable section name used in prompts and persisted rows.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Project Overview",
            Self::Infrastructure => "Technical Infrastructure",
            Self::Organization => "Component Organization",
            Self::Dependencies => "Dependencies and Requirements",
        }
    }

    /// Prompt store key for this section's output-format template.
    pub fn prompt_key(&self) -> &'static str {
        match self {
            Self::Overview => keys::PROJECT_OVERVIEW,
            Self::Infrastructure => keys::PROJECT_INFRASTRUCTURE,
            Self::Organization => keys::PROJECT_ORGANIZATION,
            Self::Dependencies => keys::PROJECT_DEPENDENCIES,
        }
    }
}

impl std::fmt::Display for ProjectSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// Section Content Map
// =============================================================================

/// Extracted section text grouped by canonical section, then by source path.
///
/// A path is present under a section only when the extractor captured
/// non-empty text for it; there are no empty-string entries. BTreeMaps keep
/// iteration deterministic so prompt assembly is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct SectionContentMap {
    entries: BTreeMap<CanonicalSection, BTreeMap<String, String>>,
}

impl SectionContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, section: CanonicalSection, path: String, text: String) {
        self.entries.entry(section).or_default().insert(path, text);
    }

    /// Contributions for one section, if any path yielded text for it.
    pub fn for_section(&self, section: CanonicalSection) -> Option<&BTreeMap<String, String>> {
        self.entries.get(&section)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (section, path) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(|m| m.len()).sum()
    }

    /// Fold the six fine-grained sections into the four project buckets.
    pub fn into_project_buckets(self) -> BTreeMap<ProjectSection, BTreeMap<String, String>> {
        let mut buckets: BTreeMap<ProjectSection, BTreeMap<String, String>> = BTreeMap::new();
        for (section, paths) in self.entries {
            buckets
                .entry(section.project_bucket())
                .or_default()
                .extend(paths);
        }
        buckets
    }
}
