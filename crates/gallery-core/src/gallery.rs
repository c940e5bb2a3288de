//! High-level gallery service.
//!
//! [`Gallery`] composes the envelope codec, the decrypt cache, and the
//! two storage backends. It is the only layer that sees both plaintext
//! and envelopes: callers hand it plain values, the stores only ever
//! see sealed ones.

use std::collections::HashSet;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cache::DecryptCache;
use crate::crypto::{EnvelopeCodec, NONCE_SIZE};
use crate::error::{GalleryError, Result};
use crate::fetch::{self, ByteSource};
use crate::storage::{
    FsObjectStore, GalleryItem, LinkRef, MetadataStore, NewItem, ObjectStore, PageRequest,
    SqliteMetadataStore, Tag, TagStat, DEFAULT_TAG_COLOR,
};

/// How long retrieval URLs handed out by [`Gallery::page`] stay valid.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(300);

/// Gallery over the local filesystem and SQLite backends.
pub type LocalGallery = Gallery<SqliteMetadataStore, FsObjectStore>;

/// A link with its fields unsealed.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub url: String,
    pub password: Option<String>,
    pub label: Option<String>,
}

/// An item with its fields unsealed, ready for display.
#[derive(Debug, Clone)]
pub struct PageItem {
    pub id: Uuid,
    pub title: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    /// Retrieval URL for the sealed object, valid for [`SIGNED_URL_TTL`]
    pub content_url: String,
    pub links: Vec<LinkView>,
}

/// One page of unsealed items.
#[derive(Debug, Clone)]
pub struct GalleryPage {
    pub items: Vec<PageItem>,
    pub next_cursor: Option<Uuid>,
}

/// Single-item view including its tags.
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub item: PageItem,
    pub tags: Vec<Tag>,
}

/// Findings from a library integrity check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Number of item rows examined
    pub items_checked: usize,

    /// Object paths referenced by items but absent from the object store
    pub missing_objects: Vec<String>,

    /// Items whose stored title does not look like an envelope
    pub plaintext_titles: Vec<Uuid>,

    /// Stored objects no item references
    pub orphaned_objects: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing_objects.is_empty()
            && self.plaintext_titles.is_empty()
            && self.orphaned_objects.is_empty()
    }
}

/// The gallery service.
pub struct Gallery<M, O> {
    codec: EnvelopeCodec,
    cache: DecryptCache,
    metadata: M,
    objects: O,
}

impl<M: MetadataStore, O: ObjectStore> Gallery<M, O> {
    pub fn new(codec: EnvelopeCodec, metadata: M, objects: O) -> Self {
        Self {
            codec,
            cache: DecryptCache::new(),
            metadata,
            objects,
        }
    }

    pub fn codec(&self) -> &EnvelopeCodec {
        &self.codec
    }

    pub fn cache(&self) -> &DecryptCache {
        &self.cache
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn objects(&self) -> &O {
        &self.objects
    }

    // --- Item operations ---

    /// Seal and store a new item.
    ///
    /// The payload data URL is sealed whole and written to the object
    /// store as raw envelope bytes; the title and any link fields are
    /// sealed individually into the metadata row. If the metadata
    /// insert fails after the object write, the object is removed on a
    /// best-effort basis so no unreferenced blob is left behind.
    pub fn add_item(&self, new_item: &NewItem) -> Result<GalleryItem> {
        if new_item.title.trim().is_empty() {
            return Err(GalleryError::InvalidInput(
                "title cannot be empty".to_string(),
            ));
        }
        if new_item.data_url.is_empty() {
            return Err(GalleryError::InvalidInput(
                "payload cannot be empty".to_string(),
            ));
        }

        let envelope = self.codec.encrypt(&new_item.data_url)?;
        let sealed = STANDARD
            .decode(&envelope)
            .map_err(|e| GalleryError::CryptoUnavailable(format!("envelope encoding broken: {e}")))?;
        // A well-formed envelope always exceeds the nonce; anything else
        // would be unreadable later.
        if sealed.len() <= NONCE_SIZE {
            return Err(GalleryError::InvalidInput(
                "encrypted payload too short".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let object_path = format!("encrypted/{}.enc", id);
        let mime_type = new_item
            .mime_type
            .clone()
            .or_else(|| data_url_mime(&new_item.data_url).map(String::from));

        self.objects.put(&object_path, &sealed, false)?;

        let item = GalleryItem {
            id,
            title: self.codec.encrypt(&new_item.title)?,
            object_path: object_path.clone(),
            mime_type,
            size_bytes: Some(sealed.len() as i64),
            is_favorite: false,
            created_at: Utc::now(),
        };

        if let Err(e) = self.metadata.insert_item(&item) {
            // Best-effort: do not leave an unreferenced object behind.
            let _ = self.objects.delete(&object_path);
            return Err(e);
        }

        for link in &new_item.links {
            if link.url.trim().is_empty() {
                return Err(GalleryError::InvalidInput(
                    "link URL cannot be empty".to_string(),
                ));
            }
            let link_ref = LinkRef {
                id: Uuid::new_v4(),
                item_id: id,
                url: self.codec.encrypt(&link.url)?,
                password: link
                    .password
                    .as_deref()
                    .map(|p| self.codec.encrypt(p))
                    .transpose()?,
                label: link
                    .label
                    .as_deref()
                    .map(|l| self.codec.encrypt(l))
                    .transpose()?,
                created_at: Utc::now(),
            };
            self.metadata.insert_link(&link_ref)?;
        }

        let mut seen = HashSet::new();
        for name in &new_item.tags {
            let name = name.trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }
            let tag = match self.metadata.get_tag(name)? {
                Some(tag) => tag,
                None => self.metadata.create_tag(name, DEFAULT_TAG_COLOR)?,
            };
            self.metadata.attach_tag(&id, &tag.id)?;
        }

        Ok(item)
    }

    /// Unsealed view of one item, including its links and tags.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::NotFound` if no item has this id.
    pub fn item(&self, id: &Uuid) -> Result<ItemDetail> {
        let row = self
            .metadata
            .get_item(id)?
            .ok_or_else(|| GalleryError::NotFound(format!("Item {} not found", id)))?;

        let links = self.metadata.links_for_item(id)?;
        let tags = self.metadata.tags_for_item(id)?;

        Ok(ItemDetail {
            item: self.unseal_item(row, links)?,
            tags,
        })
    }

    /// Delete an item, its metadata, and its stored object.
    ///
    /// The object removal is best-effort; a leftover blob shows up as
    /// an orphan in [`Gallery::check`].
    pub async fn delete_item(&self, id: &Uuid) -> Result<()> {
        let row = self
            .metadata
            .get_item(id)?
            .ok_or_else(|| GalleryError::NotFound(format!("Item {} not found", id)))?;

        self.metadata.delete_item(id)?;
        let _ = self.objects.delete(&row.object_path);
        self.cache.invalidate(&id.to_string()).await;

        Ok(())
    }

    /// One page of unsealed items, newest first.
    ///
    /// Titles and link fields that fail to unseal come through as their
    /// stored values; a single undecryptable field never breaks the
    /// page.
    pub fn page(&self, request: &PageRequest) -> Result<GalleryPage> {
        let page = self.metadata.list_page(request)?;

        let ids: Vec<Uuid> = page.items.iter().map(|item| item.id).collect();
        let mut links_by_item = self.metadata.links_for_items(&ids)?;

        let mut items = Vec::with_capacity(page.items.len());
        for row in page.items {
            let links = links_by_item.remove(&row.id).unwrap_or_default();
            items.push(self.unseal_item(row, links)?);
        }

        Ok(GalleryPage {
            items,
            next_cursor: page.next_cursor,
        })
    }

    /// Set or clear the favorite flag.
    pub fn set_favorite(&self, id: &Uuid, favorite: bool) -> Result<()> {
        self.metadata.set_favorite(id, favorite)
    }

    /// Unseal the payload of an item, memoized per item id.
    ///
    /// The first call reads the sealed object and unseals it; repeated
    /// and concurrent calls share that result through the cache.
    pub async fn content(&self, id: &Uuid) -> Result<String> {
        let row = self
            .metadata
            .get_item(id)?
            .ok_or_else(|| GalleryError::NotFound(format!("Item {} not found", id)))?;

        self.cache
            .get_or_decrypt(&id.to_string(), || async move {
                let sealed = self.objects.get(&row.object_path)?;
                Ok(self.codec.decrypt(&STANDARD.encode(&sealed)))
            })
            .await
    }

    /// Fetch a remote sealed object and unseal it.
    pub async fn fetch_and_decrypt(&self, source: &dyn ByteSource, url: &str) -> Result<String> {
        fetch::fetch_and_decrypt(source, &self.codec, url).await
    }

    // --- Tag operations ---

    /// Create a tag, using the default color when none is given.
    pub fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GalleryError::InvalidInput(
                "tag name cannot be empty".to_string(),
            ));
        }
        self.metadata
            .create_tag(name, color.unwrap_or(DEFAULT_TAG_COLOR))
    }

    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        self.metadata.list_tags()
    }

    pub fn delete_tag(&self, name: &str) -> Result<()> {
        self.metadata.delete_tag(name)
    }

    /// Attach an existing tag to an item by tag name.
    pub fn attach_tag(&self, item_id: &Uuid, name: &str) -> Result<()> {
        let tag = self
            .metadata
            .get_tag(name)?
            .ok_or_else(|| GalleryError::NotFound(format!("Tag '{}' not found", name)))?;
        self.metadata.attach_tag(item_id, &tag.id)
    }

    /// Detach a tag from an item by tag name.
    pub fn detach_tag(&self, item_id: &Uuid, name: &str) -> Result<()> {
        let tag = self
            .metadata
            .get_tag(name)?
            .ok_or_else(|| GalleryError::NotFound(format!("Tag '{}' not found", name)))?;
        self.metadata.detach_tag(item_id, &tag.id)
    }

    pub fn tag_stats(&self) -> Result<Vec<TagStat>> {
        self.metadata.tag_stats()
    }

    // --- Maintenance operations ---

    /// Audit the library and report everything out of order.
    ///
    /// Schema or foreign key corruption is a hard error; missing
    /// objects, plaintext titles, and orphaned objects are collected
    /// into the report for the caller to present.
    pub fn check(&self) -> Result<CheckReport> {
        self.metadata.check_integrity()?;

        let items = self.metadata.all_items()?;
        let mut report = CheckReport {
            items_checked: items.len(),
            ..CheckReport::default()
        };

        let mut referenced = HashSet::new();
        for item in &items {
            referenced.insert(item.object_path.clone());
            if !self.objects.exists(&item.object_path)? {
                report.missing_objects.push(item.object_path.clone());
            }
            if !EnvelopeCodec::looks_encrypted(&item.title) {
                report.plaintext_titles.push(item.id);
            }
        }

        for path in self.objects.list("encrypted")? {
            if !referenced.contains(&path) {
                report.orphaned_objects.push(path);
            }
        }

        Ok(report)
    }

    /// Unseal one row and its links into a display item.
    fn unseal_item(&self, row: GalleryItem, links: Vec<LinkRef>) -> Result<PageItem> {
        let content_url = self.objects.url(&row.object_path, SIGNED_URL_TTL)?;

        let links = links
            .into_iter()
            .map(|link| LinkView {
                url: self.codec.decrypt(&link.url),
                password: link.password.as_deref().map(|p| self.codec.decrypt(p)),
                label: link.label.as_deref().map(|l| self.codec.decrypt(l)),
            })
            .collect();

        Ok(PageItem {
            id: row.id,
            title: self.codec.decrypt(&row.title),
            mime_type: row.mime_type,
            size_bytes: row.size_bytes,
            is_favorite: row.is_favorite,
            created_at: row.created_at,
            content_url,
            links,
        })
    }
}

// --- Data URL helpers ---

/// Build a data URL carrying `bytes` with the given MIME type.
pub fn build_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// MIME type of a data URL, if it carries one.
pub fn data_url_mime(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let end = rest.find([';', ','])?;
    let mime = &rest[..end];
    if mime.is_empty() {
        None
    } else {
        Some(mime)
    }
}

/// Raw payload bytes of a base64 data URL.
pub fn data_url_payload(data_url: &str) -> Option<Vec<u8>> {
    let (_, payload) = data_url.split_once("base64,")?;
    STANDARD.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_data_url() {
        let url = build_data_url("image/png", b"\x89PNG");
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_data_url_mime() {
        assert_eq!(
            data_url_mime("data:image/png;base64,AAAA"),
            Some("image/png")
        );
        assert_eq!(data_url_mime("data:,plain"), None);
        assert_eq!(data_url_mime("not a data url"), None);
    }

    #[test]
    fn test_data_url_payload_round_trip() {
        let bytes = b"\x89PNG\r\n\x1a\n fake image body";
        let url = build_data_url("image/png", bytes);
        assert_eq!(data_url_payload(&url).unwrap(), bytes);
    }

    #[test]
    fn test_data_url_payload_rejects_non_base64() {
        assert_eq!(data_url_payload("data:text/plain,hello"), None);
    }
}
