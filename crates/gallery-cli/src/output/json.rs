//! JSON output formatting.
//!
//! All JSON leaving the CLI goes through these builders so field names
//! stay stable for scripts.

use serde_json::{json, Value};

use gallery_core::gallery::{CheckReport, GalleryPage, ItemDetail, LinkView, PageItem};
use gallery_core::storage::{GalleryItem, Tag, TagStat};

/// JSON for a link with unsealed fields.
pub fn link_json(link: &LinkView) -> Value {
    json!({
        "url": link.url,
        "password": link.password,
        "label": link.label,
    })
}

/// JSON for one unsealed item (without tags).
pub fn page_item_json(item: &PageItem) -> Value {
    json!({
        "id": item.id,
        "title": item.title,
        "mime_type": item.mime_type,
        "size_bytes": item.size_bytes,
        "is_favorite": item.is_favorite,
        "created_at": item.created_at,
        "content_url": item.content_url,
        "links": item.links.iter().map(link_json).collect::<Vec<_>>(),
    })
}

/// JSON for an item detail view, including tags.
pub fn item_json(detail: &ItemDetail) -> Value {
    let mut value = page_item_json(&detail.item);
    value["tags"] = Value::Array(detail.tags.iter().map(tag_json).collect());
    value
}

/// JSON for one page of items plus the pagination cursor.
pub fn page_json(page: &GalleryPage) -> Value {
    json!({
        "items": page.items.iter().map(page_item_json).collect::<Vec<_>>(),
        "next_cursor": page.next_cursor,
    })
}

/// JSON receipt for a freshly added item.
///
/// The stored row carries the sealed title; the plain one comes from
/// the command input so the receipt is readable.
pub fn added_item_json(item: &GalleryItem, plain_title: &str) -> Value {
    json!({
        "id": item.id,
        "title": plain_title,
        "object_path": item.object_path,
        "mime_type": item.mime_type,
        "size_bytes": item.size_bytes,
        "is_favorite": item.is_favorite,
        "created_at": item.created_at,
    })
}

/// JSON for a tag.
pub fn tag_json(tag: &Tag) -> Value {
    json!({
        "id": tag.id,
        "name": tag.name,
        "color": tag.color,
        "created_at": tag.created_at,
    })
}

/// JSON array for a tag list.
pub fn tags_json(tags: &[Tag]) -> Value {
    Value::Array(tags.iter().map(tag_json).collect())
}

/// JSON array for tag usage stats.
pub fn tag_stats_json(stats: &[TagStat]) -> Value {
    Value::Array(
        stats
            .iter()
            .map(|stat| {
                json!({
                    "id": stat.id,
                    "name": stat.name,
                    "color": stat.color,
                    "count": stat.count,
                })
            })
            .collect(),
    )
}

/// JSON for an integrity check report.
pub fn check_json(report: &CheckReport) -> Value {
    json!({
        "items_checked": report.items_checked,
        "missing_objects": report.missing_objects,
        "plaintext_titles": report.plaintext_titles,
        "orphaned_objects": report.orphaned_objects,
        "clean": report.is_clean(),
    })
}
