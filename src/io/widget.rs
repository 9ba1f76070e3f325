use std::path::{Path, PathBuf};

use tracing::warn;

use crate::io::storage::atomic_write;
use crate::model::task::Task;
use crate::parse::serialize_tasks;
use crate::store::SnapshotObserver;

/// File the widget mirror is written to, next to tasks.json
pub const WIDGET_FILE: &str = "widget.json";

/// Mirrors the task list into `widget.json` for home-screen widgets.
///
/// One-way: nothing is read back, and a failed write is logged and dropped.
#[derive(Debug, Clone)]
pub struct FileWidgetBridge {
    path: PathBuf,
}

impl FileWidgetBridge {
    pub fn new(data_dir: &Path) -> Self {
        FileWidgetBridge {
            path: data_dir.join(WIDGET_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn push(&self, tasks: &[Task]) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let blob = serialize_tasks(tasks)?;
        atomic_write(&self.path, blob.as_bytes())?;
        Ok(())
    }
}

impl SnapshotObserver for FileWidgetBridge {
    fn snapshot_changed(&mut self, tasks: &[Task]) {
        if let Err(e) = self.push(tasks) {
            warn!(path = %self.path.display(), error = %e, "widget update failed");
        }
    }
}
