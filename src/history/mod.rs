//! Post history persistence.
//!
//! The history is a small JSON document, `{"posts": ["theme", ...]}`, listing every
//! theme that was successfully posted, oldest first. Only the tail of the list is
//! consulted for de-duplication, but the file itself is never pruned.
//!
//! Writes go through a temporary file in the same directory which is then renamed
//! over the target, so readers never observe a half-written record. Appends take an
//! exclusive advisory lock on a sidecar `<history>.lock` file for the whole
//! load-modify-save sequence.

use crate::constants::LOCK_FILE_SUFFIX;
use crate::errors::{AppResult, LockError, StorageError};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Chronological record of posted themes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Themes in posting order.
    #[serde(default)]
    pub posts: Vec<String>,
}

impl HistoryRecord {
    /// Creates a record from an existing list of themes.
    pub fn new(posts: Vec<String>) -> Self {
        Self { posts }
    }

    /// The last `window` entries, or all of them if there are fewer.
    ///
    /// # Examples
    ///
    /// ```
    /// use uranai_bot::history::HistoryRecord;
    ///
    /// let record = HistoryRecord::new(vec!["a".into(), "b".into(), "c".into()]);
    /// assert_eq!(record.recent(2), ["b".to_string(), "c".to_string()]);
    /// assert_eq!(record.recent(10).len(), 3);
    /// ```
    pub fn recent(&self, window: usize) -> &[String] {
        let start = self.posts.len().saturating_sub(window);
        &self.posts[start..]
    }

    /// Appends a theme to the end of the record.
    pub fn push(&mut self, theme: impl Into<String>) {
        self.posts.push(theme.into());
    }
}

/// File-backed store for the [`HistoryRecord`].
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Creates a store for the given history file. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar lock file.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(LOCK_FILE_SUFFIX);
        PathBuf::from(name)
    }

    /// Reads the persisted record.
    ///
    /// A missing file, or one containing only whitespace, yields an empty record.
    ///
    /// # Errors
    ///
    /// - `StorageError::Read` if the file exists but cannot be read
    /// - `StorageError::Malformed` if the content is not a valid history record
    pub fn load(&self) -> AppResult<HistoryRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No history at {}, starting empty", self.path.display());
                return Ok(HistoryRecord::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into())
            }
        };

        if content.trim().is_empty() {
            return Ok(HistoryRecord::default());
        }

        let record: HistoryRecord =
            serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} history entries", record.posts.len());
        Ok(record)
    }

    /// Overwrites the persisted record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the directory cannot be created or the
    /// temporary file cannot be written or renamed into place.
    pub fn save(&self, record: &HistoryRecord) -> AppResult<()> {
        let write_err = |source: io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(write_err)?;

        let mut json = serde_json::to_string_pretty(record)
            .map_err(|e| write_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        json.push('\n');

        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(
            "Saved {} history entries to {}",
            record.posts.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Records a posted theme: lock, load, append, save.
    ///
    /// Returns the record as written.
    ///
    /// # Errors
    ///
    /// - `LockError::FileBusy` if another process holds the history lock
    /// - Any error from [`HistoryStore::load`] or [`HistoryStore::save`]
    pub fn append(&self, theme: &str) -> AppResult<HistoryRecord> {
        let lock = self.lock()?;
        self.append_locked(&lock, theme)
    }

    /// Records a posted theme under a lock the caller already holds.
    ///
    /// # Errors
    ///
    /// Any error from [`HistoryStore::load`] or [`HistoryStore::save`].
    pub fn append_locked(&self, _lock: &HistoryLock, theme: &str) -> AppResult<HistoryRecord> {
        let mut record = self.load()?;
        record.push(theme);
        self.save(&record)?;
        Ok(record)
    }

    /// Takes the exclusive history lock without blocking.
    ///
    /// The lock is released when the returned guard is dropped.
    pub fn lock(&self) -> AppResult<HistoryLock> {
        let path = self.lock_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("Acquired history lock {}", path.display());
                Ok(HistoryLock { file, path })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(LockError::FileBusy { path }.into())
            }
            Err(source) => Err(LockError::AcquisitionFailed { path, source }.into()),
        }
    }
}

/// Guard for the exclusive history lock.
#[derive(Debug)]
pub struct HistoryLock {
    file: File,
    path: PathBuf,
}

impl Drop for HistoryLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_returns_empty_record() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("post_history.json"));

        let record = store.load().unwrap();
        assert!(record.posts.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_whitespace_file_returns_empty_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("post_history.json");
        fs::write(&path, "  \n").unwrap();

        let record = HistoryStore::new(&path).load().unwrap();
        assert_eq!(record, HistoryRecord::default());
    }

    #[test]
    fn test_load_tolerates_missing_posts_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("post_history.json");
        fs::write(&path, "{}").unwrap();

        let record = HistoryStore::new(&path).load().unwrap();
        assert!(record.posts.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("post_history.json");
        fs::write(&path, "{\"posts\": [1, 2").unwrap();

        let err = HistoryStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            AppError::Storage(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_save_then_load_preserves_order_and_unicode() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nested").join("history.json"));
        let record = HistoryRecord::new(vec![
            "夢占いの歴史と直感力の関係".to_string(),
            "星座と季節の移ろい".to_string(),
        ]);

        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), record);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("夢占いの歴史と直感力の関係"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["posts"].is_array());
    }

    #[test]
    fn test_append_grows_history_without_pruning() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        for i in 0..8 {
            store.append(&format!("theme-{}", i)).unwrap();
        }

        let record = store.load().unwrap();
        assert_eq!(record.posts.len(), 8);
        assert_eq!(record.posts.first().map(String::as_str), Some("theme-0"));
        assert_eq!(record.recent(5)[4], "theme-7");
    }

    #[test]
    fn test_append_fails_while_lock_is_held() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));
        store.save(&HistoryRecord::new(vec!["before".to_string()])).unwrap();
        let before = fs::read(store.path()).unwrap();

        let guard = store.lock().unwrap();
        let err = store.append("after").unwrap_err();
        assert!(matches!(err, AppError::Lock(LockError::FileBusy { .. })));
        assert_eq!(fs::read(store.path()).unwrap(), before);

        drop(guard);
        store.append("after").unwrap();
        assert_eq!(store.load().unwrap().posts, vec!["before", "after"]);
    }

    #[test]
    fn test_append_locked_writes_under_held_lock() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let guard = store.lock().unwrap();
        store.append_locked(&guard, "held").unwrap();
        assert_eq!(store.load().unwrap().posts, vec!["held"]);

        // A second acquisition still fails until the guard is dropped.
        assert!(matches!(
            store.lock().unwrap_err(),
            AppError::Lock(LockError::FileBusy { .. })
        ));
        drop(guard);
        assert!(store.lock().is_ok());
    }

    #[test]
    fn test_lock_path_is_sidecar() {
        let store = HistoryStore::new("/srv/uranai/post_history.json");
        assert_eq!(
            store.lock_path(),
            PathBuf::from("/srv/uranai/post_history.json.lock")
        );
    }

    #[test]
    fn test_recent_window_edges() {
        let record = HistoryRecord::new(vec!["a".into(), "b".into()]);
        assert!(record.recent(0).is_empty());
        assert_eq!(record.recent(5), ["a".to_string(), "b".to_string()]);
        assert!(HistoryRecord::default().recent(5).is_empty());
    }
}
