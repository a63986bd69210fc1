//! Prompt Configuration Store
//!
//! Prompts are opaque, externally configurable templates. The store is a
//! narrow key/value contract; an absent key always falls back to a built-in
//! default so documentation generation never fails on a missing override.

pub mod defaults;

use std::collections::HashMap;
use std::sync::Arc;

/// Prompt template keys, fixed per section.
pub mod keys {
    pub const FILE_PROMPT: &str = "file_prompt";
    pub const FILE_CHUNK_PROMPT: &str = "file_chunk_prompt";
    pub const FILE_CONSOLIDATE_PROMPT: &str = "file_consolidate_prompt";

    pub const FOLDER_OVERVIEW: &str = "folder_overview";
    pub const FOLDER_KEY_FUNCTIONS: &str = "folder_key_functions";
    pub const FOLDER_ARCHITECTURE: &str = "folder_architecture";
    pub const FOLDER_INTER_RS: &str = "folder_inter_rs";
    pub const FOLDER_DEPENDENCIES: &str = "folder_dependencies";
    pub const FOLDER_EXAMPLES: &str = "folder_examples";

    pub const PROJECT_OVERVIEW: &str = "project_overview";
    pub const PROJECT_INFRASTRUCTURE: &str = "project_infrastructure";
    pub const PROJECT_ORGANIZATION: &str = "project_organization";
    pub const PROJECT_DEPENDENCIES: &str = "project_dependencies";
}

/// Narrow read contract over prompt overrides.
pub trait PromptStore: Send + Sync {
    /// Fetch an override for the given key, if one exists.
    fn get(&self, key: &str) -> Option<String>;
}

/// Shared prompt store handle.
pub type SharedPrompts = Arc<dyn PromptStore>;

/// Resolve a template: stored override first, then built-in default.
pub fn template(store: &dyn PromptStore, key: &str) -> String {
    store
        .get(key)
        .or_else(|| defaults::builtin(key).map(str::to_string))
        .unwrap_or_default()
}

/// In-memory prompt store, mainly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryPromptStore {
    entries: HashMap<String, String>,
}

impl MemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl PromptStore for MemoryPromptStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
