//! Application-level utilities for the Gallery CLI.
//!
//! This module provides:
//! - Path resolution for config and library files
//! - The per-invocation application context (lazy config, codec,
//!   gallery construction)

mod context;
mod resolver;

// Re-export public API
pub use context::{AppContext, LIBRARY_DB_NAME};
pub use resolver::resolve_config_path;
