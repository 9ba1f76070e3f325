use crate::model::task::Task;

/// Receives the task list whenever it changes.
///
/// Observers get a read-only view and nothing they do feeds back into the
/// store. Used for the home-screen widget mirror.
pub trait SnapshotObserver {
    fn snapshot_changed(&mut self, tasks: &[Task]);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&[Task]),
{
    fn snapshot_changed(&mut self, tasks: &[Task]) {
        self(tasks)
    }
}
