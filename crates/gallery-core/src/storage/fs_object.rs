//! Filesystem-backed object store.
//!
//! Objects live as plain files under a root directory, addressed by
//! their relative path. This backs a local library the same way a
//! storage bucket backs a hosted one; the sealed bytes on disk are
//! identical either way.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::error::{GalleryError, Result};
use crate::fs::write_atomic;
use crate::storage::traits::ObjectStore;

/// Object store rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory itself is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an object path onto the filesystem, refusing anything that
    /// would escape the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() {
            return Err(GalleryError::InvalidInput(
                "object path cannot be empty".to_string(),
            ));
        }

        let mut clean = PathBuf::new();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(GalleryError::InvalidInput(format!(
                        "object path must stay inside the store: {path}"
                    )))
                }
            }
        }

        Ok(self.root.join(clean))
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, path: &str, bytes: &[u8], replace: bool) -> Result<()> {
        let full = self.resolve(path)?;

        if !replace && full.exists() {
            return Err(GalleryError::AlreadyExists(format!(
                "object already exists at {path}"
            )));
        }

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }

        write_atomic(&full, bytes)?;
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        fs::read(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GalleryError::NotFound(format!("no object at {path}")),
            _ => GalleryError::Storage(format!("failed to read object at {path}: {e}")),
        })
    }

    fn delete(&self, path: &str) -> Result<()> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GalleryError::Storage(format!(
                "failed to delete object at {path}: {e}"
            ))),
        }
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.is_file())
    }

    fn url(&self, path: &str, _ttl: Duration) -> Result<String> {
        // file:// URLs do not expire; the TTL is advisory here.
        let full = self.resolve(path)?;
        let absolute = std::path::absolute(&full)
            .map_err(|e| GalleryError::Storage(format!("cannot resolve object path: {e}")))?;
        Ok(format!("file://{}", absolute.display()))
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.resolve(prefix)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut stack = vec![dir];
        while let Some(current) = stack.pop() {
            for entry in fs::read_dir(&current)? {
                let entry = entry?;
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if let Ok(relative) = path.strip_prefix(&self.root) {
                    paths.push(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }

        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store.put("encrypted/a.enc", b"sealed", false).unwrap();

        assert!(store.exists("encrypted/a.enc").unwrap());
        assert_eq!(store.get("encrypted/a.enc").unwrap(), b"sealed");
    }

    #[test]
    fn test_put_without_replace_rejects_existing() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store.put("encrypted/a.enc", b"first", false).unwrap();
        let result = store.put("encrypted/a.enc", b"second", false);

        assert!(matches!(result, Err(GalleryError::AlreadyExists(_))));
        assert_eq!(store.get("encrypted/a.enc").unwrap(), b"first");
    }

    #[test]
    fn test_put_with_replace_overwrites() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store.put("encrypted/a.enc", b"first", false).unwrap();
        store.put("encrypted/a.enc", b"second", true).unwrap();

        assert_eq!(store.get("encrypted/a.enc").unwrap(), b"second");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        let result = store.get("encrypted/missing.enc");
        assert!(matches!(result, Err(GalleryError::NotFound(_))));
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store.delete("encrypted/missing.enc").unwrap();
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        assert!(matches!(
            store.put("../outside.enc", b"x", false),
            Err(GalleryError::InvalidInput(_))
        ));
        assert!(matches!(
            store.get("/etc/passwd"),
            Err(GalleryError::InvalidInput(_))
        ));
        assert!(matches!(
            store.get("encrypted/../../outside"),
            Err(GalleryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_url_points_at_object() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store.put("encrypted/a.enc", b"sealed", false).unwrap();
        let url = store
            .url("encrypted/a.enc", Duration::from_secs(300))
            .unwrap();

        assert!(url.starts_with("file://"));
        assert!(url.ends_with("encrypted/a.enc"));
    }

    #[test]
    fn test_list_returns_stored_paths() {
        let dir = tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store.put("encrypted/b.enc", b"two", false).unwrap();
        store.put("encrypted/a.enc", b"one", false).unwrap();

        let paths = store.list("encrypted").unwrap();
        assert_eq!(paths, vec!["encrypted/a.enc", "encrypted/b.enc"]);

        assert!(store.list("nothing-here").unwrap().is_empty());
    }
}
