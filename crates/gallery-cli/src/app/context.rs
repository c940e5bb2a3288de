//! Application context for the Gallery CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use gallery_core::crypto::EnvelopeCodec;
use gallery_core::gallery::{Gallery, LocalGallery};
use gallery_core::storage::{FsObjectStore, SqliteMetadataStore, PAGE_SIZE_DEFAULT};

use crate::cli::Cli;
use crate::config::{read_config, GalleryConfig};
use crate::errors::CliError;
use crate::helpers::resolve_passphrase;
use crate::ui::UiContext;

use super::resolver::{missing_config_message, missing_library_message, resolve_config_path};

/// Database filename inside a library directory.
pub const LIBRARY_DB_NAME: &str = "gallery.db";

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple
/// parameters through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<GalleryConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Build a UI context for a command's output flags.
    pub fn ui(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&GalleryConfig> {
        self.config.get_or_try_init(|| {
            let config_path = resolve_config_path()?;
            if !config_path.exists() {
                return Err(CliError::not_found(
                    missing_config_message(&config_path),
                    "Hint: run `gallery init` to create a library",
                )
                .into());
            }
            read_config(&config_path)
        })
    }

    /// Build the envelope codec from the resolved passphrase.
    ///
    /// Falls back to the built-in deployment passphrase when neither
    /// `--prompt-passphrase` nor GALLERY_PASSPHRASE supplies one.
    pub fn codec(&self) -> anyhow::Result<EnvelopeCodec> {
        match resolve_passphrase(self.cli.prompt_passphrase)? {
            Some(passphrase) => Ok(EnvelopeCodec::from_passphrase(&passphrase)?),
            None => Ok(EnvelopeCodec::with_defaults()?),
        }
    }

    /// Library root and objects subdirectory, from flag/env or config.
    pub fn resolve_library(&self) -> anyhow::Result<(PathBuf, String)> {
        if let Some(path) = &self.cli.library {
            return Ok((PathBuf::from(path), "objects".to_string()));
        }
        let config = self.config()?;
        Ok((
            PathBuf::from(&config.library.path),
            config.library.objects_dir.clone(),
        ))
    }

    /// Page size for `list` when `--limit` is not given.
    pub fn page_size(&self) -> usize {
        match self.config() {
            Ok(config) => config.pagination.page_size,
            Err(_) => PAGE_SIZE_DEFAULT,
        }
    }

    /// Open the local gallery behind the resolved library path.
    pub fn open_gallery(&self) -> anyhow::Result<LocalGallery> {
        let (root, objects_dir) = self.resolve_library()?;
        let db_path = root.join(LIBRARY_DB_NAME);
        if !db_path.exists() {
            return Err(CliError::not_found(
                missing_library_message(&root),
                "Hint: run `gallery init` to create it",
            )
            .into());
        }

        let metadata = SqliteMetadataStore::open(&db_path)?;
        let objects = FsObjectStore::new(root.join(objects_dir));
        Ok(Gallery::new(self.codec()?, metadata, objects))
    }
}
