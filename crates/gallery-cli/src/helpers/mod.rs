//! Shared helpers for command handlers.

pub mod input;
pub mod parsing;

pub use input::{read_text_arg_or_stdin, resolve_passphrase};
pub use parsing::{
    guess_mime, parse_hex_color, parse_item_id, parse_link_spec, validate_format_flags,
};

use gallery_core::GalleryError;

use crate::errors::CliError;

/// Attach a hint to a core NotFound error, leaving other errors as-is.
///
/// NotFound carries exit code 3 either way; the hint only improves the
/// message.
pub fn with_not_found_hint(err: GalleryError, hint: &str) -> anyhow::Error {
    match err {
        GalleryError::NotFound(message) => {
            CliError::not_found(message, format!("Hint: {}", hint)).into()
        }
        other => other.into(),
    }
}
