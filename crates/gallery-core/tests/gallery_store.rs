use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use gallery_core::crypto::EnvelopeCodec;
use gallery_core::error::{GalleryError, Result};
use gallery_core::gallery::{build_data_url, Gallery, LocalGallery};
use gallery_core::storage::{
    FsObjectStore, GalleryItem, ItemPage, LinkRef, MetadataStore, NewItem, NewLink, ObjectStore,
    PageRequest, SqliteMetadataStore, Tag, TagStat, DEFAULT_TAG_COLOR,
};

struct TempLibrary {
    dir: tempfile::TempDir,
}

impl TempLibrary {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir should be created"),
        }
    }

    fn gallery(&self) -> LocalGallery {
        let metadata = SqliteMetadataStore::create(&self.dir.path().join("gallery.db"))
            .expect("metadata store should be created");
        let objects = FsObjectStore::new(self.dir.path().join("objects"));
        let codec = EnvelopeCodec::with_defaults().expect("codec should build");
        Gallery::new(codec, metadata, objects)
    }
}

fn sample_data_url() -> String {
    build_data_url("image/png", b"fake image body for tests")
}

#[test]
fn test_add_item_seals_fields_and_stores_object() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let new_item = NewItem::new("Sunset", sample_data_url())
        .with_links(vec![NewLink::new("https://example.com/full")
            .with_password("hunter2")
            .with_label("original")])
        .with_tags(vec!["nature".to_string(), "sky".to_string()]);

    let stored = gallery.add_item(&new_item).expect("add should succeed");

    // The stored row carries envelopes, not plaintext
    assert_ne!(stored.title, "Sunset");
    assert!(EnvelopeCodec::looks_encrypted(&stored.title));
    assert_eq!(stored.object_path, format!("encrypted/{}.enc", stored.id));
    assert_eq!(stored.mime_type.as_deref(), Some("image/png"));
    assert!(stored.size_bytes.expect("size should be recorded") > 28);
    assert!(!stored.is_favorite);
    assert!(gallery
        .objects()
        .exists(&stored.object_path)
        .expect("exists should succeed"));

    let link_rows = gallery
        .metadata()
        .links_for_item(&stored.id)
        .expect("links should load");
    assert_eq!(link_rows.len(), 1);
    assert!(EnvelopeCodec::looks_encrypted(&link_rows[0].url));

    // The unsealed view restores every field
    let detail = gallery.item(&stored.id).expect("item should load");
    assert_eq!(detail.item.title, "Sunset");
    assert_eq!(detail.item.links.len(), 1);
    assert_eq!(detail.item.links[0].url, "https://example.com/full");
    assert_eq!(detail.item.links[0].password.as_deref(), Some("hunter2"));
    assert_eq!(detail.item.links[0].label.as_deref(), Some("original"));
    let tag_names: Vec<&str> = detail.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["nature", "sky"]);
    assert!(detail.item.content_url.starts_with("file://"));
}

#[test]
fn test_add_item_rejects_empty_inputs() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let no_title = gallery.add_item(&NewItem::new("  ", sample_data_url()));
    assert!(matches!(no_title, Err(GalleryError::InvalidInput(_))));

    let no_payload = gallery.add_item(&NewItem::new("Title", ""));
    assert!(matches!(no_payload, Err(GalleryError::InvalidInput(_))));
}

#[test]
fn test_item_not_found() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let result = gallery.item(&Uuid::new_v4());
    assert!(matches!(result, Err(GalleryError::NotFound(_))));
}

#[test]
fn test_page_walks_newest_first() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    for n in 0..5 {
        gallery
            .add_item(&NewItem::new(format!("item-{n}"), sample_data_url()))
            .expect("add should succeed");
    }

    let first = gallery
        .page(&PageRequest::new().limit(2))
        .expect("page should load");
    let titles: Vec<&str> = first.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["item-4", "item-3"]);
    let cursor = first.next_cursor.expect("first page should have a cursor");

    let second = gallery
        .page(&PageRequest::new().limit(2).cursor(cursor))
        .expect("page should load");
    let titles: Vec<&str> = second.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["item-2", "item-1"]);
    let cursor = second.next_cursor.expect("second page should have a cursor");

    let last = gallery
        .page(&PageRequest::new().limit(2).cursor(cursor))
        .expect("page should load");
    let titles: Vec<&str> = last.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["item-0"]);
    assert!(last.next_cursor.is_none());
}

#[test]
fn test_pagination_stable_when_timestamps_collide() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    // Insert rows sharing one timestamp so only the id tiebreak orders them
    let created_at = Utc::now();
    let mut inserted = HashSet::new();
    for n in 0..5 {
        let id = Uuid::new_v4();
        inserted.insert(id);
        gallery
            .metadata()
            .insert_item(&GalleryItem {
                id,
                title: format!("row-{n}"),
                object_path: format!("encrypted/{id}.enc"),
                mime_type: None,
                size_bytes: None,
                is_favorite: false,
                created_at,
            })
            .expect("insert should succeed");
    }

    let mut seen = Vec::new();
    let mut cursor = None;
    for _ in 0..10 {
        let mut request = PageRequest::new().limit(2);
        if let Some(c) = cursor {
            request = request.cursor(c);
        }
        let page = gallery.page(&request).expect("page should load");
        seen.extend(page.items.iter().map(|i| i.id));
        match page.next_cursor {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }

    // Every row exactly once: no duplicates, no skips
    assert_eq!(seen.len(), 5);
    assert_eq!(seen.iter().copied().collect::<HashSet<_>>(), inserted);
}

#[test]
fn test_unknown_cursor_rejected() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let result = gallery.page(&PageRequest::new().cursor(Uuid::new_v4()));
    assert!(matches!(result, Err(GalleryError::InvalidInput(_))));
}

#[test]
fn test_page_filters_favorites_and_tags() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let plain = gallery
        .add_item(&NewItem::new("plain", sample_data_url()))
        .expect("add should succeed");
    let starred = gallery
        .add_item(&NewItem::new("starred", sample_data_url()))
        .expect("add should succeed");
    let tagged = gallery
        .add_item(&NewItem::new("tagged", sample_data_url()).with_tags(vec!["blue".to_string()]))
        .expect("add should succeed");

    gallery
        .set_favorite(&starred.id, true)
        .expect("favorite should succeed");

    let favorites = gallery
        .page(&PageRequest::new().favorites_only())
        .expect("page should load");
    assert_eq!(favorites.items.len(), 1);
    assert_eq!(favorites.items[0].id, starred.id);
    assert!(favorites.items[0].is_favorite);

    let by_tag = gallery
        .page(&PageRequest::new().tag("blue"))
        .expect("page should load");
    assert_eq!(by_tag.items.len(), 1);
    assert_eq!(by_tag.items[0].id, tagged.id);

    let everything = gallery.page(&PageRequest::new()).expect("page should load");
    assert_eq!(everything.items.len(), 3);
    assert!(everything.items.iter().any(|i| i.id == plain.id));
}

#[test]
fn test_set_favorite_is_explicit() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let item = gallery
        .add_item(&NewItem::new("Sunset", sample_data_url()))
        .expect("add should succeed");

    gallery
        .set_favorite(&item.id, true)
        .expect("set should succeed");
    assert!(gallery.item(&item.id).expect("item should load").item.is_favorite);

    // Setting the same value again is not a toggle
    gallery
        .set_favorite(&item.id, true)
        .expect("set should succeed");
    assert!(gallery.item(&item.id).expect("item should load").item.is_favorite);

    gallery
        .set_favorite(&item.id, false)
        .expect("unset should succeed");
    assert!(!gallery.item(&item.id).expect("item should load").item.is_favorite);

    let missing = gallery.set_favorite(&Uuid::new_v4(), true);
    assert!(matches!(missing, Err(GalleryError::NotFound(_))));
}

#[tokio::test]
async fn test_content_unseals_and_memoizes() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let data_url = sample_data_url();
    let item = gallery
        .add_item(&NewItem::new("Sunset", data_url.clone()))
        .expect("add should succeed");

    let first = gallery.content(&item.id).await.expect("content should load");
    assert_eq!(first, data_url);
    assert!(gallery.cache().contains(&item.id.to_string()).await);

    let second = gallery.content(&item.id).await.expect("content should load");
    assert_eq!(second, data_url);
}

#[tokio::test]
async fn test_delete_item_removes_row_object_and_cache_entry() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let item = gallery
        .add_item(
            &NewItem::new("Sunset", sample_data_url())
                .with_links(vec![NewLink::new("https://example.com/a")])
                .with_tags(vec!["nature".to_string()]),
        )
        .expect("add should succeed");

    gallery.content(&item.id).await.expect("content should load");
    assert!(gallery.cache().contains(&item.id.to_string()).await);

    gallery
        .delete_item(&item.id)
        .await
        .expect("delete should succeed");

    assert!(matches!(
        gallery.item(&item.id),
        Err(GalleryError::NotFound(_))
    ));
    assert!(!gallery
        .objects()
        .exists(&item.object_path)
        .expect("exists should succeed"));
    assert!(!gallery.cache().contains(&item.id.to_string()).await);

    // The tag itself survives, now unused
    let stats = gallery.tag_stats().expect("stats should load");
    let nature = stats
        .iter()
        .find(|s| s.name == "nature")
        .expect("tag should still exist");
    assert_eq!(nature.count, 0);
}

/// Metadata store whose item insert always fails; everything else is
/// unreachable in the tests that use it.
struct RejectingStore;

impl MetadataStore for RejectingStore {
    fn insert_item(&self, _item: &GalleryItem) -> Result<()> {
        Err(GalleryError::Storage("simulated insert failure".to_string()))
    }
    fn get_item(&self, _id: &Uuid) -> Result<Option<GalleryItem>> {
        unimplemented!()
    }
    fn delete_item(&self, _id: &Uuid) -> Result<()> {
        unimplemented!()
    }
    fn list_page(&self, _request: &PageRequest) -> Result<ItemPage> {
        unimplemented!()
    }
    fn all_items(&self) -> Result<Vec<GalleryItem>> {
        unimplemented!()
    }
    fn set_favorite(&self, _id: &Uuid, _favorite: bool) -> Result<()> {
        unimplemented!()
    }
    fn insert_link(&self, _link: &LinkRef) -> Result<()> {
        unimplemented!()
    }
    fn links_for_item(&self, _item_id: &Uuid) -> Result<Vec<LinkRef>> {
        unimplemented!()
    }
    fn links_for_items(&self, _item_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<LinkRef>>> {
        unimplemented!()
    }
    fn create_tag(&self, _name: &str, _color: &str) -> Result<Tag> {
        unimplemented!()
    }
    fn get_tag(&self, _name: &str) -> Result<Option<Tag>> {
        unimplemented!()
    }
    fn list_tags(&self) -> Result<Vec<Tag>> {
        unimplemented!()
    }
    fn delete_tag(&self, _name: &str) -> Result<()> {
        unimplemented!()
    }
    fn attach_tag(&self, _item_id: &Uuid, _tag_id: &Uuid) -> Result<()> {
        unimplemented!()
    }
    fn detach_tag(&self, _item_id: &Uuid, _tag_id: &Uuid) -> Result<()> {
        unimplemented!()
    }
    fn tags_for_item(&self, _item_id: &Uuid) -> Result<Vec<Tag>> {
        unimplemented!()
    }
    fn tag_stats(&self) -> Result<Vec<TagStat>> {
        unimplemented!()
    }
    fn check_integrity(&self) -> Result<()> {
        unimplemented!()
    }
}

#[test]
fn test_add_cleans_up_object_when_metadata_insert_fails() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let objects = FsObjectStore::new(dir.path().join("objects"));
    let codec = EnvelopeCodec::with_defaults().expect("codec should build");
    let gallery = Gallery::new(codec, RejectingStore, objects);

    let result = gallery.add_item(&NewItem::new("Sunset", sample_data_url()));
    assert!(matches!(result, Err(GalleryError::Storage(_))));

    // The object written before the failed insert is gone again
    let leftovers = gallery
        .objects()
        .list("encrypted")
        .expect("list should succeed");
    assert!(leftovers.is_empty());
}

#[test]
fn test_tag_lifecycle() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let item = gallery
        .add_item(&NewItem::new("Sunset", sample_data_url()))
        .expect("add should succeed");

    let custom = gallery
        .create_tag("sunsets", Some("#112233"))
        .expect("create should succeed");
    assert_eq!(custom.color, "#112233");

    let defaulted = gallery
        .create_tag("plain", None)
        .expect("create should succeed");
    assert_eq!(defaulted.color, DEFAULT_TAG_COLOR);

    let duplicate = gallery.create_tag("sunsets", None);
    assert!(matches!(duplicate, Err(GalleryError::AlreadyExists(_))));

    gallery
        .attach_tag(&item.id, "sunsets")
        .expect("attach should succeed");
    let again = gallery.attach_tag(&item.id, "sunsets");
    assert!(matches!(again, Err(GalleryError::AlreadyExists(_))));

    let unknown = gallery.attach_tag(&item.id, "missing");
    assert!(matches!(unknown, Err(GalleryError::NotFound(_))));

    gallery
        .detach_tag(&item.id, "sunsets")
        .expect("detach should succeed");
    let detached_twice = gallery.detach_tag(&item.id, "sunsets");
    assert!(matches!(detached_twice, Err(GalleryError::NotFound(_))));

    gallery.delete_tag("sunsets").expect("delete should succeed");
    let gone = gallery.delete_tag("sunsets");
    assert!(matches!(gone, Err(GalleryError::NotFound(_))));

    let names: Vec<String> = gallery
        .list_tags()
        .expect("list should succeed")
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["plain"]);
}

#[test]
fn test_tag_stats_most_used_first() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let tags = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();

    gallery
        .add_item(&NewItem::new("one", sample_data_url()).with_tags(tags(&["alpha", "beta"])))
        .expect("add should succeed");
    gallery
        .add_item(&NewItem::new("two", sample_data_url()).with_tags(tags(&["alpha"])))
        .expect("add should succeed");
    gallery.create_tag("gamma", None).expect("create should succeed");

    let stats = gallery.tag_stats().expect("stats should load");
    let summary: Vec<(&str, i64)> = stats.iter().map(|s| (s.name.as_str(), s.count)).collect();
    assert_eq!(summary, vec![("alpha", 2), ("beta", 1), ("gamma", 0)]);
}

#[test]
fn test_check_reports_missing_plaintext_and_orphans() {
    let lib = TempLibrary::new();
    let gallery = lib.gallery();

    let kept = gallery
        .add_item(&NewItem::new("kept", sample_data_url()))
        .expect("add should succeed");

    let clean = gallery.check().expect("check should run");
    assert!(clean.is_clean());
    assert_eq!(clean.items_checked, 1);

    // An item whose object vanished
    let lost = gallery
        .add_item(&NewItem::new("lost", sample_data_url()))
        .expect("add should succeed");
    gallery
        .objects()
        .delete(&lost.object_path)
        .expect("delete should succeed");

    // A row stored before encryption was introduced
    let legacy_id = Uuid::new_v4();
    let legacy_path = format!("encrypted/{legacy_id}.enc");
    gallery
        .objects()
        .put(&legacy_path, b"legacy bytes", false)
        .expect("put should succeed");
    gallery
        .metadata()
        .insert_item(&GalleryItem {
            id: legacy_id,
            title: "an old plaintext title".to_string(),
            object_path: legacy_path,
            mime_type: None,
            size_bytes: None,
            is_favorite: false,
            created_at: Utc::now(),
        })
        .expect("insert should succeed");

    // A blob nothing references
    gallery
        .objects()
        .put("encrypted/stray.enc", b"stray", false)
        .expect("put should succeed");

    let report = gallery.check().expect("check should run");
    assert!(!report.is_clean());
    assert_eq!(report.items_checked, 3);
    assert_eq!(report.missing_objects, vec![lost.object_path.clone()]);
    assert_eq!(report.plaintext_titles, vec![legacy_id]);
    assert_eq!(report.orphaned_objects, vec!["encrypted/stray.enc"]);
    assert!(!report.missing_objects.contains(&kept.object_path));
}
