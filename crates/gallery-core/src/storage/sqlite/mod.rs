//! SQLite metadata store.
//!
//! Item, link, and tag rows live in a single SQLite database file
//! inside the library directory. Protected columns hold sealed
//! envelopes; the database itself is not encrypted, so nothing here
//! touches the codec. The connection sits behind a mutex and all
//! methods take `&self`.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{GalleryError, Result};
use crate::storage::traits::MetadataStore;
use crate::storage::types::{GalleryItem, ItemPage, LinkRef, PageRequest, Tag, TagStat};

use row::{ItemRow, LinkRow, TagRow};

/// SQLite-backed metadata store.
pub struct SqliteMetadataStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteMetadataStore {
    /// Create a new database at `path` and initialize the schema.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::AlreadyExists` if a file is already
    /// present at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(GalleryError::AlreadyExists(format!(
                "library database already exists at {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        // Initialize schema
        conn.execute_batch(
            r#"
            CREATE TABLE items (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                object_path TEXT NOT NULL,
                mime_type TEXT,
                size_bytes INTEGER,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX items_page_order ON items (created_at DESC, id DESC);

            CREATE TABLE links (
                id TEXT PRIMARY KEY,
                item_id TEXT NOT NULL,
                url TEXT NOT NULL,
                password TEXT,
                label TEXT,
                created_at TEXT NOT NULL,

                FOREIGN KEY (item_id) REFERENCES items(id) ON DELETE CASCADE
            );

            CREATE INDEX links_item ON links (item_id);

            CREATE TABLE tags (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                color TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE item_tags (
                item_id TEXT NOT NULL,
                tag_id TEXT NOT NULL,
                created_at TEXT NOT NULL,

                PRIMARY KEY (item_id, tag_id),
                FOREIGN KEY (item_id) REFERENCES items(id) ON DELETE CASCADE,
                FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
            );
            "#,
        )?;

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    /// Open an existing database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::NotFound` if no file exists at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GalleryError::NotFound(format!(
                "no library database at {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the database file in bytes.
    pub fn file_size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GalleryError::Storage("SQLite connection poisoned".to_string()))
    }
}

impl MetadataStore for SqliteMetadataStore {
    // --- Item operations ---

    fn insert_item(&self, item: &GalleryItem) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            INSERT INTO items (id, title, object_path, mime_type, size_bytes, is_favorite, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                item.id.to_string(),
                &item.title,
                &item.object_path,
                &item.mime_type,
                item.size_bytes,
                item.is_favorite,
                item.created_at.to_rfc3339(),
            ),
        )?;

        Ok(())
    }

    fn get_item(&self, id: &Uuid) -> Result<Option<GalleryItem>> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, title, object_path, mime_type, size_bytes, is_favorite, created_at
            FROM items
            WHERE id = ?
            "#,
            [id.to_string()],
            ItemRow::from_sql_row,
        );

        match result {
            Ok(row) => Ok(Some(row.try_into()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_item(&self, id: &Uuid) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        // Remove associations first, then the item itself
        tx.execute(
            "DELETE FROM item_tags WHERE item_id = ?",
            [id.to_string()],
        )?;
        tx.execute("DELETE FROM links WHERE item_id = ?", [id.to_string()])?;
        let deleted = tx.execute("DELETE FROM items WHERE id = ?", [id.to_string()])?;

        if deleted == 0 {
            return Err(GalleryError::NotFound(format!("Item {} not found", id)));
        }

        tx.commit()?;
        Ok(())
    }

    fn list_page(&self, request: &PageRequest) -> Result<ItemPage> {
        let conn = self.lock_conn()?;
        let limit = request.effective_limit();

        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(cursor) = request.cursor {
            // The cursor is the id of the last row of the previous page;
            // resume strictly after it in (created_at, id) order.
            let anchor: Option<String> = conn
                .query_row(
                    "SELECT created_at FROM items WHERE id = ?",
                    [cursor.to_string()],
                    |row| row.get(0),
                )
                .optional()?;
            let anchor = anchor.ok_or_else(|| {
                GalleryError::InvalidInput(format!("unknown cursor: {}", cursor))
            })?;

            conditions
                .push("(i.created_at < ? OR (i.created_at = ? AND i.id < ?))".to_string());
            params.push(Box::new(anchor.clone()));
            params.push(Box::new(anchor));
            params.push(Box::new(cursor.to_string()));
        }

        if request.favorites_only {
            conditions.push("i.is_favorite = 1".to_string());
        }

        if let Some(ref tag) = request.tag {
            conditions.push(
                "EXISTS (SELECT 1 FROM item_tags it JOIN tags t ON t.id = it.tag_id WHERE it.item_id = i.id AND t.name = ?)"
                    .to_string(),
            );
            params.push(Box::new(tag.clone()));
        }

        let mut query = String::from(
            "SELECT i.id, i.title, i.object_path, i.mime_type, i.size_bytes, i.is_favorite, i.created_at FROM items i",
        );
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY i.created_at DESC, i.id DESC LIMIT ?");
        params.push(Box::new(limit as i64));

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            ItemRow::from_sql_row(row)
        })?;

        let mut items: Vec<GalleryItem> = Vec::new();
        for row in rows {
            items.push(row?.try_into()?);
        }

        // A short page means the listing is exhausted.
        let next_cursor = if items.len() == limit {
            items.last().map(|item| item.id)
        } else {
            None
        };

        Ok(ItemPage { items, next_cursor })
    }

    fn all_items(&self) -> Result<Vec<GalleryItem>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, object_path, mime_type, size_bytes, is_favorite, created_at
            FROM items
            ORDER BY created_at DESC, id DESC
            "#,
        )?;
        let rows = stmt.query_map([], |row| ItemRow::from_sql_row(row))?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?.try_into()?);
        }

        Ok(items)
    }

    fn set_favorite(&self, id: &Uuid, favorite: bool) -> Result<()> {
        let conn = self.lock_conn()?;

        let updated = conn.execute(
            "UPDATE items SET is_favorite = ? WHERE id = ?",
            (favorite, id.to_string()),
        )?;

        if updated == 0 {
            return Err(GalleryError::NotFound(format!("Item {} not found", id)));
        }

        Ok(())
    }

    // --- Link operations ---

    fn insert_link(&self, link: &LinkRef) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            INSERT INTO links (id, item_id, url, password, label, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                link.id.to_string(),
                link.item_id.to_string(),
                &link.url,
                &link.password,
                &link.label,
                link.created_at.to_rfc3339(),
            ),
        )?;

        Ok(())
    }

    fn links_for_item(&self, item_id: &Uuid) -> Result<Vec<LinkRef>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, item_id, url, password, label, created_at
            FROM links
            WHERE item_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map([item_id.to_string()], |row| LinkRow::from_sql_row(row))?;

        let mut links = Vec::new();
        for row in rows {
            links.push(row?.try_into()?);
        }

        Ok(links)
    }

    fn links_for_items(
        &self,
        item_ids: &[Uuid],
    ) -> Result<std::collections::HashMap<Uuid, Vec<LinkRef>>> {
        let mut grouped = std::collections::HashMap::new();
        if item_ids.is_empty() {
            return Ok(grouped);
        }

        let conn = self.lock_conn()?;

        let placeholders = vec!["?"; item_ids.len()].join(", ");
        let query = format!(
            "SELECT id, item_id, url, password, label, created_at FROM links \
             WHERE item_id IN ({placeholders}) ORDER BY created_at ASC, id ASC"
        );

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(item_ids.iter().map(|id| id.to_string())),
            |row| LinkRow::from_sql_row(row),
        )?;

        for row in rows {
            let link: LinkRef = row?.try_into()?;
            grouped
                .entry(link.item_id)
                .or_insert_with(Vec::new)
                .push(link);
        }

        Ok(grouped)
    }

    // --- Tag operations ---

    fn create_tag(&self, name: &str, color: &str) -> Result<Tag> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        // Check if a tag with this name already exists
        let exists: Option<String> = tx
            .query_row("SELECT id FROM tags WHERE name = ?", [name], |row| {
                row.get(0)
            })
            .optional()?;

        if exists.is_some() {
            return Err(GalleryError::AlreadyExists(format!(
                "Tag '{}' already exists",
                name
            )));
        }

        let tag = Tag {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            created_at: Utc::now(),
        };

        tx.execute(
            "INSERT INTO tags (id, name, color, created_at) VALUES (?, ?, ?, ?)",
            (
                tag.id.to_string(),
                &tag.name,
                &tag.color,
                tag.created_at.to_rfc3339(),
            ),
        )?;

        tx.commit()?;
        Ok(tag)
    }

    fn get_tag(&self, name: &str) -> Result<Option<Tag>> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT id, name, color, created_at FROM tags WHERE name = ?",
            [name],
            TagRow::from_sql_row,
        );

        match result {
            Ok(row) => Ok(Some(row.try_into()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let conn = self.lock_conn()?;

        let mut stmt =
            conn.prepare("SELECT id, name, color, created_at FROM tags ORDER BY name")?;
        let rows = stmt.query_map([], |row| TagRow::from_sql_row(row))?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row?.try_into()?);
        }

        Ok(tags)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let tag_id: Option<String> = tx
            .query_row("SELECT id FROM tags WHERE name = ?", [name], |row| {
                row.get(0)
            })
            .optional()?;

        let tag_id = match tag_id {
            Some(id) => id,
            None => {
                return Err(GalleryError::NotFound(format!("Tag '{}' not found", name)));
            }
        };

        // Remove all item associations, then the tag itself
        tx.execute("DELETE FROM item_tags WHERE tag_id = ?", [&tag_id])?;
        tx.execute("DELETE FROM tags WHERE id = ?", [&tag_id])?;

        tx.commit()?;
        Ok(())
    }

    fn attach_tag(&self, item_id: &Uuid, tag_id: &Uuid) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        // Check item exists
        let item_exists: Option<String> = tx
            .query_row(
                "SELECT id FROM items WHERE id = ?",
                [item_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        if item_exists.is_none() {
            return Err(GalleryError::NotFound(format!(
                "Item {} not found",
                item_id
            )));
        }

        // Check tag exists
        let tag_exists: Option<String> = tx
            .query_row(
                "SELECT id FROM tags WHERE id = ?",
                [tag_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        if tag_exists.is_none() {
            return Err(GalleryError::NotFound(format!("Tag {} not found", tag_id)));
        }

        // Check if already attached
        let already_attached: Option<String> = tx
            .query_row(
                "SELECT item_id FROM item_tags WHERE item_id = ? AND tag_id = ?",
                (item_id.to_string(), tag_id.to_string()),
                |row| row.get(0),
            )
            .optional()?;

        if already_attached.is_some() {
            return Err(GalleryError::AlreadyExists(format!(
                "Tag already attached to item {}",
                item_id
            )));
        }

        tx.execute(
            "INSERT INTO item_tags (item_id, tag_id, created_at) VALUES (?, ?, ?)",
            (
                item_id.to_string(),
                tag_id.to_string(),
                Utc::now().to_rfc3339(),
            ),
        )?;

        tx.commit()?;
        Ok(())
    }

    fn detach_tag(&self, item_id: &Uuid, tag_id: &Uuid) -> Result<()> {
        let conn = self.lock_conn()?;

        let deleted = conn.execute(
            "DELETE FROM item_tags WHERE item_id = ? AND tag_id = ?",
            (item_id.to_string(), tag_id.to_string()),
        )?;

        if deleted == 0 {
            return Err(GalleryError::NotFound(format!(
                "Tag is not attached to item {}",
                item_id
            )));
        }

        Ok(())
    }

    fn tags_for_item(&self, item_id: &Uuid) -> Result<Vec<Tag>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT t.id, t.name, t.color, t.created_at
            FROM tags t
            JOIN item_tags it ON t.id = it.tag_id
            WHERE it.item_id = ?
            ORDER BY t.name
            "#,
        )?;
        let rows = stmt.query_map([item_id.to_string()], |row| TagRow::from_sql_row(row))?;

        let mut tags = Vec::new();
        for row in rows {
            tags.push(row?.try_into()?);
        }

        Ok(tags)
    }

    fn tag_stats(&self) -> Result<Vec<TagStat>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT t.id, t.name, t.color, COUNT(it.item_id) AS usage_count
            FROM tags t
            LEFT JOIN item_tags it ON it.tag_id = t.id
            GROUP BY t.id, t.name, t.color
            ORDER BY usage_count DESC, t.name ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut stats = Vec::new();
        for row in rows {
            let (id_str, name, color, count) = row?;
            let id = Uuid::parse_str(&id_str)
                .map_err(|e| GalleryError::Storage(format!("Invalid tag UUID: {}", e)))?;
            stats.push(TagStat {
                id,
                name,
                color,
                count,
            });
        }

        Ok(stats)
    }

    // --- Maintenance operations ---

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(GalleryError::Storage(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('items', 'links', 'tags', 'item_tags')",
            [],
            |row| row.get(0),
        )?;
        if table_count < 4 {
            return Err(GalleryError::Storage(
                "Library database is missing required tables".to_string(),
            ));
        }

        Ok(())
    }
}
