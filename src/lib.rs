//! DocLoom - Hierarchical Codebase Documentation Generator
//!
//! Generates layered documentation for a codebase by walking the selected
//! paths of a project tree bottom-up: files first (chunked when large),
//! then folders synthesized from their children's section content, then a
//! single project-level summary at the root. Every document is persisted
//! to SQLite as soon as it is ready.
//!
//! ## Core Features
//!
//! - **Bottom-Up Hierarchy Walk**: parents always see completed child docs
//! - **Bounded Concurrency**: per-folder fan-out pools with worker caps
//! - **Section Schema**: six canonical folder sections, four project sections
//! - **Rate-Limit Aware Retry**: fixed cooldown, bounded attempts
//! - **Write-Through Persistence**: path-keyed upserts, re-runs replace
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docloom::{
//!     Database, DocumentationRun, HierarchyOrchestrator, OrchestratorConfig,
//!     OpenAiClient, RetryClient, SelectedPaths,
//! };
//!
//! let db = Arc::new(Database::open("documentation.db")?);
//! db.initialize()?;
//! let client = RetryClient::wrap(Arc::new(OpenAiClient::new(config.llm)?));
//! let orchestrator = HierarchyOrchestrator::new(
//!     client,
//!     db.clone(),
//!     db.clone(),
//!     OrchestratorConfig::default(),
//! );
//! let outcome = orchestrator.run(&run).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: generation client abstraction, OpenAI-compatible HTTP, retry
//! - [`hierarchy`]: selection, file/folder/project documenters, orchestrator
//! - [`sections`]: canonical section schema and lenient extraction
//! - [`prompts`]: prompt template store with built-in defaults
//! - [`storage`]: SQLite persistence with connection pooling
//! - [`config`]: layered configuration loading

pub mod ai;
pub mod config;
pub mod constants;
pub mod hierarchy;
pub mod prompts;
pub mod sections;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::{DocError, ErrorClassifier, Result};

// Domain Types
pub use types::{DocLevel, DocumentRecord, ModelSelection, SectionRecord};

// Storage
pub use storage::database::PoolConfig;
pub use storage::{Database, DocumentStore, SharedDatabase, SharedStore};

// =============================================================================
// Hierarchy Re-exports
// =============================================================================

pub use hierarchy::{
    DocumentationRun, FileDocumenter, FolderDocumenter, FolderOutcome, HierarchyOrchestrator,
    OrchestratorConfig, ProjectDocumenter, SelectedPaths,
};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    ChatMessage, ClientConfig, GenerationClient, OpenAiClient, RetryClient, RetryPolicy,
    SharedClient,
};
