//! Directory-backed store: one JSON file per key.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::{CacheError, Store};

const EXTENSION: &str = "json";

/// A [`Store`] keeping each slot in `<dir>/<key>.json`.
///
/// Keys map to file names one to one, so [`Store::keys`] returns exactly the
/// keys that were set. Keys that are empty, made only of dots, or contain
/// anything but ASCII letters, digits, `-`, `_` and `.` are rejected with
/// [`CacheError::InvalidKey`].
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the store root. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && !key.chars().all(|c| c == '.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

fn not_found_as_none<T>(result: io::Result<T>) -> Result<Option<T>, CacheError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        let bytes = not_found_as_none(fs::read(&path))?;
        tracing::trace!(path = %path.display(), found = bytes.is_some(), "read slot");
        Ok(bytes)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote slot");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        not_found_as_none(fs::remove_file(&path))?;
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let Some(entries) = not_found_as_none(fs::read_dir(&self.dir))? else {
            return Ok(Vec::new());
        };
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cache;

    #[test]
    fn test_path_for_maps_key_to_file_name() {
        let store = FileStore::new("/tmp/softo");
        assert_eq!(
            store.path_for("softodev_cart_v1").unwrap(),
            PathBuf::from("/tmp/softo/softodev_cart_v1.json")
        );
        for key in ["a/b", "a:b", "..", "", "سلة", "a b"] {
            assert!(
                matches!(store.path_for(key), Err(CacheError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());

        store.set("a_b", b"1").unwrap();
        assert!(matches!(
            store.set("a/b", b"2"),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(store.get("a/b"), Err(CacheError::InvalidKey(_))));

        assert_eq!(store.get("a_b").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.keys().unwrap(), vec!["a_b"]);
    }

    #[test]
    fn test_keys_round_trip_through_set() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        for key in ["softodev_cart_v1", "prefs.v2", "x-1"] {
            store.set(key, b"{}").unwrap();
        }
        fs::write(tmp.path().join("stray.txt"), b"").unwrap();

        let keys = store.keys().unwrap();
        assert_eq!(keys, vec!["prefs.v2", "softodev_cart_v1", "x-1"]);
        for key in &keys {
            assert!(store.exists(key).unwrap());
        }
    }

    #[test]
    fn test_missing_dir_reads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("nope"));
        assert!(store.get("slot").unwrap().is_none());
        assert!(!store.exists("slot").unwrap());
        assert!(store.keys().unwrap().is_empty());
        store.delete("slot").unwrap();
    }

    #[test]
    fn test_set_creates_dir_and_replaces() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("nested/store"));

        store.set("slot", b"{\"a\":1}").unwrap();
        store.set("slot", b"{\"a\":2}").unwrap();

        assert_eq!(store.get("slot").unwrap(), Some(b"{\"a\":2}".to_vec()));
        assert_eq!(
            fs::read(store.path_for("slot").unwrap()).unwrap(),
            b"{\"a\":2}".to_vec()
        );
        assert_eq!(store.keys().unwrap(), vec!["slot"]);
    }

    #[test]
    fn test_delete_removes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        store.set("slot", b"1").unwrap();
        store.delete("slot").unwrap();
        assert!(!store.path_for("slot").unwrap().exists());
    }

    #[test]
    fn test_cache_over_file_store() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = Cache::new(FileStore::new(tmp.path()));
        cache.set("langs", &vec!["en", "ar"]).unwrap();

        let reopened = Cache::new(FileStore::new(tmp.path()));
        assert_eq!(
            reopened.get::<Vec<String>>("langs").unwrap(),
            Some(vec!["en".to_string(), "ar".to_string()])
        );
    }
}
