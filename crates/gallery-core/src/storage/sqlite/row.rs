//! Raw row types for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{GalleryError, Result};
use crate::storage::types::{GalleryItem, LinkRef, Tag};

/// Raw row data from the items table, before parsing into domain types.
#[derive(Debug)]
pub struct ItemRow {
    pub id: String,
    pub title: String,
    pub object_path: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub is_favorite: i64,
    pub created_at: String,
}

impl ItemRow {
    /// Column order: id, title, object_path, mime_type, size_bytes,
    /// is_favorite, created_at.
    pub fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            object_path: row.get(2)?,
            mime_type: row.get(3)?,
            size_bytes: row.get(4)?,
            is_favorite: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl TryFrom<ItemRow> for GalleryItem {
    type Error = GalleryError;

    fn try_from(row: ItemRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| GalleryError::Storage(format!("Invalid item UUID: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| GalleryError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(GalleryItem {
            id,
            title: row.title,
            object_path: row.object_path,
            mime_type: row.mime_type,
            size_bytes: row.size_bytes,
            is_favorite: row.is_favorite != 0,
            created_at,
        })
    }
}

/// Raw row data from the links table.
#[derive(Debug)]
pub struct LinkRow {
    pub id: String,
    pub item_id: String,
    pub url: String,
    pub password: Option<String>,
    pub label: Option<String>,
    pub created_at: String,
}

impl LinkRow {
    /// Column order: id, item_id, url, password, label, created_at.
    pub fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            item_id: row.get(1)?,
            url: row.get(2)?,
            password: row.get(3)?,
            label: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl TryFrom<LinkRow> for LinkRef {
    type Error = GalleryError;

    fn try_from(row: LinkRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| GalleryError::Storage(format!("Invalid link UUID: {}", e)))?;
        let item_id = Uuid::parse_str(&row.item_id)
            .map_err(|e| GalleryError::Storage(format!("Invalid link item UUID: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| GalleryError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(LinkRef {
            id,
            item_id,
            url: row.url,
            password: row.password,
            label: row.label,
            created_at,
        })
    }
}

/// Raw row data from the tags table.
#[derive(Debug)]
pub struct TagRow {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: String,
}

impl TagRow {
    /// Column order: id, name, color, created_at.
    pub fn from_sql_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl TryFrom<TagRow> for Tag {
    type Error = GalleryError;

    fn try_from(row: TagRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| GalleryError::Storage(format!("Invalid tag UUID: {}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| GalleryError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Tag {
            id,
            name: row.name,
            color: row.color,
            created_at,
        })
    }
}
