use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gallery_core::storage::PAGE_SIZE_DEFAULT;

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub library: LibrarySection,
    #[serde(default)]
    pub pagination: PaginationSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LibrarySection {
    /// Library root directory
    pub path: String,

    /// Object store subdirectory, relative to the library root
    #[serde(default = "default_objects_dir")]
    pub objects_dir: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationSection {
    /// Items per page when `--limit` is not given
    pub page_size: usize,
}

impl Default for PaginationSection {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE_DEFAULT,
        }
    }
}

fn default_objects_dir() -> String {
    "objects".to_string()
}

impl GalleryConfig {
    pub fn new(library_path: PathBuf, objects_dir: String, page_size: usize) -> Self {
        Self {
            library: LibrarySection {
                path: library_path.to_string_lossy().to_string(),
                objects_dir,
            },
            pagination: PaginationSection { page_size },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_library_path() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<GalleryConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &GalleryConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("gallery"));
        }
    }
    Ok(home_dir()?.join(".config").join("gallery"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("gallery"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("gallery"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
