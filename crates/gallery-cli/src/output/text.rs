//! Human-readable output for the larger views.
//!
//! Small receipts are rendered inline by the handlers; anything with a
//! table or a multi-section layout lives here.

use gallery_core::gallery::{CheckReport, GalleryPage, ItemDetail};
use gallery_core::storage::{Tag, TagStat};

use crate::ui::{
    badge, blank_line, format_bytes, format_datetime, header, hint, kv, print, short_id,
    single_line, simple_table, truncate, Badge, Column, UiContext,
};

const TITLE_WIDTH: usize = 40;

fn format_size(size_bytes: Option<i64>) -> String {
    size_bytes
        .map(|bytes| format_bytes(bytes.max(0) as u64))
        .unwrap_or_else(|| "-".into())
}

/// Render one page of items as a table, with the next-page cursor if any.
pub fn print_page(ctx: &UiContext, page: &GalleryPage, quiet: bool) {
    if page.items.is_empty() {
        if !quiet {
            print(ctx, &badge(ctx, Badge::Info, "No items yet"));
            print(ctx, &hint(ctx, "gallery add --title <title> --file <path>"));
        }
        return;
    }

    let pretty = ctx.mode.is_pretty();
    if pretty && !quiet {
        print(ctx, &header(ctx, "list", None));
        blank_line(ctx);
    }

    let columns = [
        Column::new("ID"),
        Column::new("TITLE"),
        Column::new("FAV"),
        Column::new("SIZE"),
        Column::new("CREATED"),
    ];
    let star = if ctx.unicode { "\u{2605}" } else { "*" };
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|item| {
            let id = if pretty {
                short_id(&item.id)
            } else {
                item.id.to_string()
            };
            vec![
                id,
                truncate(&single_line(&item.title), TITLE_WIDTH),
                if item.is_favorite { star.to_string() } else { String::new() },
                format_size(item.size_bytes),
                format_datetime(&item.created_at, pretty),
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));

    if let Some(cursor) = page.next_cursor {
        if pretty {
            blank_line(ctx);
            print(ctx, &hint(ctx, &format!("gallery list --cursor {}", cursor)));
        } else {
            print(ctx, &kv(ctx, "Next Cursor", &cursor.to_string()));
        }
    }
}

/// Render an item's full detail: fields, links, tags.
pub fn print_item(ctx: &UiContext, detail: &ItemDetail, quiet: bool) {
    let item = &detail.item;
    if quiet {
        println!("{}", item.title);
        return;
    }

    let pretty = ctx.mode.is_pretty();
    if pretty {
        print(ctx, &header(ctx, "show", Some(&short_id(&item.id))));
        blank_line(ctx);
    }

    print(ctx, &kv(ctx, "ID", &item.id.to_string()));
    print(ctx, &kv(ctx, "Title", &item.title));
    print(
        ctx,
        &kv(ctx, "MIME", item.mime_type.as_deref().unwrap_or("-")),
    );
    print(ctx, &kv(ctx, "Size", &format_size(item.size_bytes)));
    print(
        ctx,
        &kv(ctx, "Favorite", if item.is_favorite { "yes" } else { "no" }),
    );
    print(ctx, &kv(ctx, "Created", &format_datetime(&item.created_at, pretty)));
    print(ctx, &kv(ctx, "Content URL", &item.content_url));

    for (index, link) in item.links.iter().enumerate() {
        let n = index + 1;
        print(ctx, &kv(ctx, &format!("Link {}", n), &link.url));
        if let Some(label) = &link.label {
            print(ctx, &kv(ctx, &format!("Link {} Label", n), label));
        }
        if let Some(password) = &link.password {
            print(ctx, &kv(ctx, &format!("Link {} Password", n), password));
        }
    }

    if !detail.tags.is_empty() {
        let names: Vec<&str> = detail.tags.iter().map(|tag| tag.name.as_str()).collect();
        print(ctx, &kv(ctx, "Tags", &names.join(", ")));
    }
}

/// Render the tag list as a table.
pub fn print_tags(ctx: &UiContext, tags: &[Tag], quiet: bool) {
    if tags.is_empty() {
        if !quiet {
            print(ctx, &badge(ctx, Badge::Info, "No tags yet"));
            print(ctx, &hint(ctx, "gallery tag add <name>"));
        }
        return;
    }

    let columns = [Column::new("NAME"), Column::new("COLOR"), Column::new("CREATED")];
    let rows: Vec<Vec<String>> = tags
        .iter()
        .map(|tag| {
            vec![
                tag.name.clone(),
                tag.color.clone(),
                format_datetime(&tag.created_at, ctx.mode.is_pretty()),
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
}

/// Render tag usage counts, most used first.
pub fn print_tag_stats(ctx: &UiContext, stats: &[TagStat], quiet: bool) {
    if stats.is_empty() {
        if !quiet {
            print(ctx, &badge(ctx, Badge::Info, "No tags yet"));
            print(ctx, &hint(ctx, "gallery tag add <name>"));
        }
        return;
    }

    let columns = [Column::new("NAME"), Column::new("COLOR"), Column::new("ITEMS")];
    let rows: Vec<Vec<String>> = stats
        .iter()
        .map(|stat| vec![stat.name.clone(), stat.color.clone(), stat.count.to_string()])
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
}

/// Render an integrity report, one line per finding.
pub fn print_check_report(ctx: &UiContext, report: &CheckReport, quiet: bool) {
    if report.is_clean() {
        if !quiet {
            print(ctx, &badge(ctx, Badge::Ok, "Integrity check passed"));
            print(
                ctx,
                &kv(ctx, "Items Checked", &report.items_checked.to_string()),
            );
        }
        return;
    }

    for path in &report.missing_objects {
        print(ctx, &badge(ctx, Badge::Err, &format!("Missing object: {}", path)));
    }
    for id in &report.plaintext_titles {
        print(
            ctx,
            &badge(ctx, Badge::Warn, &format!("Plaintext title on item {}", id)),
        );
    }
    for path in &report.orphaned_objects {
        print(
            ctx,
            &badge(ctx, Badge::Warn, &format!("Orphaned object: {}", path)),
        );
    }
    if !quiet {
        print(
            ctx,
            &kv(ctx, "Items Checked", &report.items_checked.to_string()),
        );
    }
}
