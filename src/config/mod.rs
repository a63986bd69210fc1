//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Config file (docloom.toml)
//! 3. Environment variables (DOCLOOM_*)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
