use std::path::Path;

use tracing::debug;

use crate::io::storage::{FileStore, KeyValueStore, StorageError};

/// Storage key the whole task list lives under
pub const TASKS_KEY: &str = "tasks";

/// Reads and writes the serialized task list as one blob.
///
/// The gateway knows nothing about the blob's format; decoding is the
/// store's job.
pub struct TaskGateway {
    backend: Box<dyn KeyValueStore>,
}

impl TaskGateway {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        TaskGateway {
            backend: Box::new(backend),
        }
    }

    /// Gateway over the `tasks.json` file in `data_dir`
    pub fn open(data_dir: &Path) -> Self {
        Self::new(FileStore::new(data_dir))
    }

    /// The stored blob, or `None` if nothing has been saved yet.
    pub fn read(&self) -> Result<Option<String>, StorageError> {
        let blob = self.backend.get(TASKS_KEY)?;
        debug!(present = blob.is_some(), "read task blob");
        Ok(blob)
    }

    pub fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        self.backend.set(TASKS_KEY, blob)?;
        debug!(bytes = blob.len(), "wrote task blob");
        Ok(())
    }
}
