//! Path resolution for config and library files.

use std::path::{Path, PathBuf};

use crate::config::default_config_path;

/// Resolve the config file path, checking GALLERY_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("GALLERY_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Error message when no library is configured.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No gallery library configured (looked for {})\n\nRun:\n  gallery init\n\nOr point at a library:\n  GALLERY_LIBRARY=/path/to/library gallery list",
        config_path.display()
    )
}

/// Error message when the library database is missing.
pub fn missing_library_message(root: &Path) -> String {
    format!("No gallery library found at {}", root.display())
}
