use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::NamedTempFile;

use crate::io::lock::{DirLock, LockError};

/// Error type for key-value storage
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable string storage addressed by key.
///
/// A missing key is a normal outcome (`Ok(None)`), not an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a data directory.
///
/// Writes go through a temp file + rename under the directory lock, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let _lock = DirLock::acquire_default(&self.dir)?;
        atomic_write(&path, value.as_bytes())
            .map_err(|source| StorageError::Write { path, source })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Volatile store for tests. Every write is kept, so it is not meant for
/// long-lived sessions.
///
/// Clones share the same contents, so a test can keep a handle after moving
/// one into a gateway and inspect what was written. Reads and writes can be
/// switched to fail to exercise the error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Current value for `key`
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes.len()
    }

    /// Every successful write, oldest first
    pub fn writes(&self) -> Vec<(String, String)> {
        self.inner.borrow().writes.clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(StorageError::Unavailable(format!("read of {:?} refused", key)));
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StorageError::Unavailable(format!("write of {:?} refused", key)));
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
