//! Core domain types and the unified error system.

pub mod document;
pub mod error;

pub use document::{DocLevel, DocumentRecord, ModelSelection, SectionRecord};
pub use error::{DocError, ErrorClassifier, Result};
