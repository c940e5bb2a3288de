//! Parsing helpers for IDs, link specs, colors, and output formats.

use std::path::Path;

use uuid::Uuid;

use gallery_core::storage::NewLink;

use crate::errors::CliError;

/// Parse an item ID argument into a UUID.
pub fn parse_item_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|e| CliError::invalid_input(format!("Invalid item ID \"{}\": {}", value, e)).into())
}

/// Parse a link spec of the form `URL`, `URL::PASSWORD`, or
/// `URL::PASSWORD::LABEL`.
///
/// Empty middle segments are allowed, so `URL::::LABEL` attaches a
/// label without a password.
pub fn parse_link_spec(spec: &str) -> anyhow::Result<NewLink> {
    let mut parts = spec.splitn(3, "::");
    let url = parts.next().unwrap_or_default().trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::invalid_input(format!(
            "Invalid link \"{}\": URL must start with http:// or https://",
            spec
        ))
        .into());
    }

    let mut link = NewLink::new(url);
    if let Some(password) = parts.next() {
        if !password.is_empty() {
            link = link.with_password(password);
        }
    }
    if let Some(label) = parts.next() {
        if !label.is_empty() {
            link = link.with_label(label);
        }
    }
    Ok(link)
}

/// Validate and normalize a hex color (`#rgb` or `#rrggbb`).
pub fn parse_hex_color(value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or("");
    let valid = matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(CliError::invalid_input(format!(
            "Invalid color \"{}\" (expected #rgb or #rrggbb)",
            value
        ))
        .into());
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// Validate the `--format` flag and its interaction with `--json`.
pub fn validate_format_flags(json: bool, format: Option<&str>) -> anyhow::Result<()> {
    if let Some(fmt) = format {
        if json {
            return Err(CliError::invalid_input("--format cannot be used with --json").into());
        }
        if fmt != "table" && fmt != "plain" {
            return Err(CliError::invalid_input(format!(
                "Unsupported format: {} (use table or plain)",
                fmt
            ))
            .into());
        }
    }
    Ok(())
}

/// Guess a MIME type from a file extension.
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
