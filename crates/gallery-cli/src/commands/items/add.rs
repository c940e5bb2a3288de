//! Add item command handler.

use std::fs;
use std::path::Path;

use anyhow::Context;

use gallery_core::gallery::build_data_url;
use gallery_core::storage::{NewItem, NewLink};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{guess_mime, parse_link_spec, read_text_arg_or_stdin};
use crate::output::json::added_item_json;
use crate::ui::{blank_line, hint, print, receipt};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Resolve the payload data URL from `--file`, `--data-url`, or stdin.
fn resolve_payload(args: &AddArgs) -> anyhow::Result<String> {
    if let Some(path) = &args.file {
        let path = Path::new(path);
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let mime = args
            .mime
            .as_deref()
            .or_else(|| guess_mime(path))
            .unwrap_or(FALLBACK_MIME);
        return Ok(build_data_url(mime, &bytes));
    }

    let raw = read_text_arg_or_stdin(args.data_url.as_deref())?;
    if !raw.starts_with("data:") {
        return Err(CliError::invalid_input(
            "Payload must be a data URL (\"data:<mime>;base64,...\")",
        )
        .into());
    }
    Ok(raw)
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let gallery = ctx.open_gallery()?;
    let data_url = resolve_payload(args)?;

    let links: Vec<NewLink> = args
        .link
        .iter()
        .map(|spec| parse_link_spec(spec))
        .collect::<anyhow::Result<_>>()?;

    let mut new_item = NewItem::new(&args.title, data_url)
        .with_links(links)
        .with_tags(args.tag.clone());
    if let Some(mime) = &args.mime {
        new_item = new_item.with_mime_type(mime);
    }

    let item = gallery.add_item(&new_item)?;

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        let value = added_item_json(&item, &args.title);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if !ctx.quiet() {
        let id = item.id.to_string();
        let size = item
            .size_bytes
            .map(|bytes| bytes.to_string())
            .unwrap_or_else(|| "-".into());
        print(
            &ui,
            &receipt(
                &ui,
                "Added item",
                &[
                    ("ID", id.as_str()),
                    ("Title", args.title.as_str()),
                    ("Size", size.as_str()),
                ],
            ),
        );
        blank_line(&ui);
        print(&ui, &hint(&ui, &format!("gallery show {}", item.id)));
    }
    Ok(())
}
