//! Persistence Layer
//!
//! The orchestrator consumes persistence through the narrow `DocumentStore`
//! contract; the SQLite implementation lives in [`database`].

pub mod database;

use std::sync::Arc;

use crate::types::{DocumentRecord, Result, SectionRecord};

pub use database::{Database, PoolConfig, SharedDatabase};

/// Narrow store/fetch contract for generated documentation.
///
/// `store_document` has upsert semantics on `path`: a later run for the
/// same path replaces the earlier row and its section rows.
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document row. Returns the document id.
    fn store_document(&self, record: &DocumentRecord) -> Result<i64>;

    /// Append one section row for a stored document.
    fn store_section(&self, document_id: i64, section: &SectionRecord) -> Result<()>;
}

/// Shared persistence gateway handle.
pub type SharedStore = Arc<dyn DocumentStore>;
