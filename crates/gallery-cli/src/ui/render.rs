//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Gallery · command (context)"
/// Plain mode: "gallery command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Gallery", styles::bold(), ctx.color);
            if let Some(c) = context {
                format!("{} \u{00B7} {} ({})", title, command, c)
            } else {
                format!("{} \u{00B7} {}", title, command)
            }
        }
        OutputMode::Plain => {
            format!("gallery {}", command)
        }
        OutputMode::Json => String::new(),
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
///
/// Pretty mode: "Hint: text" with dim styling
/// Plain mode: "hint=text"
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Render a simple table without borders (for lists like items).
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if ctx.mode.is_pretty() {
        let mut table = ComfyTable::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        // Dim headers through comfy-table so column widths stay correct
        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                let mut cell = Cell::new(c.header);
                if ctx.color {
                    cell = cell.add_attribute(Attribute::Dim);
                }
                cell
            })
            .collect();
        table.set_header(header_cells);

        for i in 0..columns.len() {
            if let Some(column) = table.column_mut(i) {
                column.set_padding((0, 2));
            }
        }

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    } else {
        // Plain mode: space-separated values, no header
        rows.iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print a message to stdout with proper mode handling.
///
/// In JSON mode, this does nothing (JSON output is handled separately).
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Print a warning to stderr, leaving stdout untouched.
pub fn print_warning(ctx: &UiContext, message: &str) {
    eprintln!("{}", badge(ctx, Badge::Warn, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_pretty() {
        let ctx = pretty_ctx();
        let h = header(&ctx, "list", None);
        assert!(h.contains("Gallery"));
        assert!(h.contains("list"));
    }

    #[test]
    fn test_header_plain() {
        let ctx = plain_ctx();
        let h = header(&ctx, "list", None);
        assert_eq!(h, "gallery list");
    }

    #[test]
    fn test_badge_ok() {
        let ctx = plain_ctx();
        let b = badge(&ctx, Badge::Ok, "Done");
        assert!(b.contains("[OK]"));
        assert!(b.contains("Done"));
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        let ctx = plain_ctx();
        assert_eq!(kv(&ctx, "Object Path", "a/b"), "object_path=a/b");
    }

    #[test]
    fn test_receipt_plain() {
        let ctx = plain_ctx();
        let r = receipt(&ctx, "Added", &[("id", "123")]);
        assert!(r.starts_with("status=ok"));
        assert!(r.contains("id=123"));
    }

    #[test]
    fn test_simple_table_plain_has_no_header() {
        let ctx = plain_ctx();
        let out = simple_table(
            &ctx,
            &[Column::new("ID"), Column::new("TITLE")],
            &[vec!["a".to_string(), "b".to_string()]],
        );
        assert_eq!(out, "a b");
    }
}
