//! UI primitives for the Gallery CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles, spinner frames
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Spinner for long fetches
//! - **Format**: String utilities (truncate, short ids, byte sizes)

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, header, hint, kv, print, print_warning, receipt, simple_table, Column,
};

// Re-export progress types
pub use progress::Spinner;

// Re-export commonly used format functions
pub use format::{format_bytes, format_datetime, short_id, single_line, truncate};
