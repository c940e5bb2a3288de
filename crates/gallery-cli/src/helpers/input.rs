//! Input handling helpers for passphrase and text reading.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;

/// Resolve the codec passphrase.
///
/// `--prompt-passphrase` forces an interactive hidden prompt. Otherwise
/// the GALLERY_PASSPHRASE environment variable is used when set and
/// non-empty. Returns `None` when the built-in deployment passphrase
/// should be used.
pub fn resolve_passphrase(force_prompt: bool) -> anyhow::Result<Option<String>> {
    if force_prompt {
        let passphrase = Password::new()
            .with_prompt("Passphrase")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read passphrase: {}", e))?;
        return Ok(Some(passphrase));
    }

    if let Ok(value) = std::env::var("GALLERY_PASSPHRASE") {
        if !value.trim().is_empty() {
            return Ok(Some(value));
        }
    }

    Ok(None)
}

/// Read text from a positional argument or from stdin.
///
/// Trailing newlines from piped input are stripped so shell pipelines
/// round-trip cleanly.
pub fn read_text_arg_or_stdin(arg: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = arg {
        if value.is_empty() {
            return Err(anyhow::anyhow!("TEXT cannot be empty"));
        }
        return Ok(value.to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end_matches(['\n', '\r']).to_string();
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("No input provided on stdin"));
        }
        return Ok(trimmed);
    }

    Err(anyhow::anyhow!(
        "Provide TEXT as an argument or pipe it via stdin"
    ))
}
