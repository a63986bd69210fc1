//! Hierarchical Documentation Pipeline
//!
//! Bottom-up generation over a selected project tree: files are documented
//! first (chunked when large), folders synthesize their children's section
//! content, and the project root aggregates everything into four
//! project-level sections. The orchestrator drives the walk with bounded
//! concurrency and write-through persistence.

pub mod file;
pub mod folder;
pub mod orchestrator;
pub mod project;
pub mod selection;

use std::path::Path;

pub use file::FileDocumenter;
pub use folder::{FolderDocumentation, FolderDocumenter, SectionOutcome};
pub use orchestrator::{
    DocumentationRun, FolderOutcome, HierarchyOrchestrator, OrchestratorConfig,
};
pub use project::{ProjectDocumentation, ProjectDocumenter};
pub use selection::SelectedPaths;

/// String form of a path, used as the aggregation and persistence key.
pub(crate) fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
