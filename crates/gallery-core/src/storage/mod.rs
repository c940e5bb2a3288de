//! Storage backends for the gallery library.
//!
//! A library is a directory holding an object store (sealed payload
//! files) and a metadata database (item, link, and tag rows). The
//! traits in [`traits`] keep the gallery service independent of both.

pub mod fs_object;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use fs_object::FsObjectStore;
pub use sqlite::SqliteMetadataStore;
pub use traits::{MetadataStore, ObjectStore};
pub use types::{
    GalleryItem, ItemPage, LinkRef, NewItem, NewLink, PageRequest, Tag, TagStat,
    DEFAULT_TAG_COLOR, PAGE_SIZE_DEFAULT, PAGE_SIZE_MAX,
};
