//! Core data types for the storage layer.
//!
//! Rows are stored with sensitive fields sealed; the types here carry
//! whatever the backend holds, envelope or plain. Decryption happens
//! one layer up, in the gallery service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default number of items per page.
pub const PAGE_SIZE_DEFAULT: usize = 20;

/// Hard cap on items per page, regardless of what the caller asks for.
pub const PAGE_SIZE_MAX: usize = 100;

/// Color assigned to tags created without an explicit one.
pub const DEFAULT_TAG_COLOR: &str = "#3b82f6";

/// A gallery item row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Unique identifier for this item
    pub id: Uuid,

    /// Title (sealed envelope at rest)
    pub title: String,

    /// Backend path of the stored object (e.g., "encrypted/<id>.enc")
    pub object_path: String,

    /// MIME type of the original payload, if known
    pub mime_type: Option<String>,

    /// Size of the stored (sealed) object in bytes
    pub size_bytes: Option<i64>,

    /// Whether the item is marked as a favorite
    pub is_favorite: bool,

    /// When this item was created
    pub created_at: DateTime<Utc>,
}

/// A reference link attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRef {
    /// Unique identifier for this link
    pub id: Uuid,

    /// Item this link belongs to
    pub item_id: Uuid,

    /// Link URL (sealed envelope at rest)
    pub url: String,

    /// Optional access password (sealed envelope at rest)
    pub password: Option<String>,

    /// Optional display label (sealed envelope at rest)
    pub label: Option<String>,

    /// When this link was created
    pub created_at: DateTime<Utc>,
}

/// A tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier for this tag
    pub id: Uuid,

    /// Tag name, unique across the library
    pub name: String,

    /// Display color as a hex string (e.g., "#3b82f6")
    pub color: String,

    /// When this tag was created
    pub created_at: DateTime<Utc>,
}

/// Usage count for one tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagStat {
    /// Tag identifier
    pub id: Uuid,

    /// Tag name
    pub name: String,

    /// Tag color
    pub color: String,

    /// Number of items carrying this tag
    pub count: i64,
}

/// One page of item rows plus the cursor for the next page.
#[derive(Debug, Clone)]
pub struct ItemPage {
    /// Rows in newest-first order
    pub items: Vec<GalleryItem>,

    /// Cursor to pass for the following page; `None` when exhausted
    pub next_cursor: Option<Uuid>,
}

/// Builder for adding a new item.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Plain title (sealed by the service before storage)
    pub title: String,

    /// Payload as a data URL ("data:<mime>;base64,<bytes>")
    pub data_url: String,

    /// MIME type override; inferred from the data URL when absent
    pub mime_type: Option<String>,

    /// Links to attach
    pub links: Vec<NewLink>,

    /// Tag names to attach (created on first use)
    pub tags: Vec<String>,
}

impl NewItem {
    pub fn new(title: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data_url: data_url.into(),
            mime_type: None,
            links: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_links(mut self, links: Vec<NewLink>) -> Self {
        self.links = links;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Builder for a link on a new item.
#[derive(Debug, Clone)]
pub struct NewLink {
    /// Plain URL (sealed by the service before storage)
    pub url: String,

    /// Optional plain access password
    pub password: Option<String>,

    /// Optional plain display label
    pub label: Option<String>,
}

impl NewLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            password: None,
            label: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Parameters for querying a page of items.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Resume after this item id (exclusive); `None` starts from the newest
    pub cursor: Option<Uuid>,

    /// Requested page size
    pub limit: Option<usize>,

    /// Only return favorites
    pub favorites_only: bool,

    /// Only return items carrying this tag
    pub tag: Option<String>,
}

impl PageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(mut self, cursor: Uuid) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Page size after applying the default and the hard cap.
    ///
    /// A requested limit of zero falls back to the default rather than
    /// producing an empty page.
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            None | Some(0) => PAGE_SIZE_DEFAULT,
            Some(n) => n.min(PAGE_SIZE_MAX),
        }
    }
}
