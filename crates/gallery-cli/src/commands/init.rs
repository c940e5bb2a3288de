//! Library initialization.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use gallery_core::storage::{SqliteMetadataStore, PAGE_SIZE_DEFAULT};

use crate::app::{resolve_config_path, AppContext, LIBRARY_DB_NAME};
use crate::cli::InitArgs;
use crate::config::{default_library_path, write_config, GalleryConfig};
use crate::ui::{blank_line, hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let root: PathBuf = match args.path.as_deref().or(ctx.cli().library.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_library_path()?,
    };

    let db_path = root.join(LIBRARY_DB_NAME);
    if db_path.exists() {
        anyhow::bail!(
            "A gallery library already exists at {}; refusing to overwrite it",
            root.display()
        );
    }

    let objects_path = root.join(&args.objects_dir);
    fs::create_dir_all(&objects_path)
        .with_context(|| format!("Failed to create {}", objects_path.display()))?;

    SqliteMetadataStore::create(&db_path)?;

    let config_path = resolve_config_path()?;
    let config = GalleryConfig::new(root.clone(), args.objects_dir.clone(), PAGE_SIZE_DEFAULT);
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        let library = root.display().to_string();
        let objects = objects_path.display().to_string();
        let config_file = config_path.display().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Initialized gallery library",
                &[
                    ("Library", library.as_str()),
                    ("Objects", objects.as_str()),
                    ("Config", config_file.as_str()),
                ],
            ),
        );
        blank_line(&ui);
        print(&ui, &hint(&ui, "gallery add --title <title> --file <path>"));
    }
    Ok(())
}
