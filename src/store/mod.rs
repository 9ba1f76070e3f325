//! The task store: sole owner of the task list.
//!
//! Every screen reads from and mutates through a [`TaskStore`]. Mutations are
//! applied in memory immediately; persistence is debounced. Each mutation
//! replaces the store's single [`PendingSave`] with one due a quiet interval
//! later, and the host loop calls [`TaskStore::poll_save`] to let it fire.
//! Storage failures never escape the store: they become [`Notice`]s.

pub mod clock;
pub mod debounce;
pub mod notice;
pub mod observer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::PendingSave;
pub use notice::Notice;
pub use observer::SnapshotObserver;

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::io::gateway::TaskGateway;
use crate::io::picker::ImagePicker;
use crate::io::storage::StorageError;
use crate::model::config::StoreConfig;
use crate::model::task::{Task, TaskId};
use crate::ops::search;
use crate::ops::task_ops::{self, IdAllocator};
use crate::parse::{CodecError, parse_tasks, serialize_tasks};

/// Why the stored list could not be used
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("stored list is corrupt ({0})")]
    Corrupt(#[from] CodecError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a save did not reach storage
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("could not encode task list: {0}")]
    Encode(#[from] CodecError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of [`TaskStore::load`]
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing stored yet; the list starts empty
    Missing,
    /// The stored list was loaded
    Loaded(usize),
    /// The stored list was unusable; the list starts empty and a notice is queued
    Failed(LoadError),
    /// `load` already ran for this store
    AlreadyLoaded,
}

/// Result of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { tasks: usize },
    Failed,
}

/// The one task currently being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedEdit {
    pub id: TaskId,
    /// Working text; starts as the task's text when the edit begins
    pub text: String,
}

pub struct TaskStore {
    tasks: Vec<Task>,
    gateway: TaskGateway,
    clock: Box<dyn Clock>,
    debounce: Duration,
    pending_save: Option<PendingSave>,
    mutation_seq: u64,
    ids: IdAllocator,
    loaded: bool,
    /// Text typed for the next new task
    draft: String,
    staged_edit: Option<StagedEdit>,
    notices: Vec<Notice>,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl TaskStore {
    pub fn new(gateway: TaskGateway, clock: impl Clock + 'static, debounce: Duration) -> Self {
        TaskStore {
            tasks: Vec::new(),
            gateway,
            clock: Box::new(clock),
            debounce,
            pending_save: None,
            mutation_seq: 0,
            ids: IdAllocator::new(),
            loaded: false,
            draft: String::new(),
            staged_edit: None,
            notices: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Store on the real clock, configured from `[store]`
    pub fn from_config(gateway: TaskGateway, config: &StoreConfig) -> Self {
        Self::new(gateway, SystemClock, config.debounce())
    }

    /// Register an observer. It receives the current list immediately.
    pub fn subscribe(&mut self, mut observer: Box<dyn SnapshotObserver>) {
        observer.snapshot_changed(&self.tasks);
        self.observers.push(observer);
    }

    // -----------------------------------------------------------------------
    // Load / save
    // -----------------------------------------------------------------------

    /// Seed the list from storage. Runs once per store.
    ///
    /// A missing list is simply empty. A corrupt list, or a storage fault,
    /// also leaves the list empty and queues a [`Notice::LoadError`].
    pub fn load(&mut self) -> LoadOutcome {
        if self.loaded {
            debug!("load skipped: store already loaded");
            return LoadOutcome::AlreadyLoaded;
        }
        self.loaded = true;

        let outcome = match self.read_stored() {
            Ok(None) => {
                info!("no stored task list; starting empty");
                self.tasks.clear();
                LoadOutcome::Missing
            }
            Ok(Some(tasks)) => {
                info!(count = tasks.len(), "loaded task list");
                self.tasks = tasks;
                LoadOutcome::Loaded(self.tasks.len())
            }
            Err(e) => {
                warn!(error = %e, "task list could not be loaded; starting empty");
                self.tasks.clear();
                self.push_notice(Notice::LoadError {
                    reason: e.to_string(),
                });
                LoadOutcome::Failed(e)
            }
        };
        self.publish();
        outcome
    }

    fn read_stored(&self) -> Result<Option<Vec<Task>>, LoadError> {
        match self.gateway.read()? {
            None => Ok(None),
            Some(blob) => Ok(Some(parse_tasks(&blob)?)),
        }
    }

    /// Write the list now if the pending save is due.
    pub fn poll_save(&mut self) -> Option<SaveOutcome> {
        let now = self.clock.now();
        match self.pending_save {
            Some(pending) if pending.is_due(now) => {
                self.pending_save = None;
                Some(self.write_now())
            }
            _ => None,
        }
    }

    /// Wait out the quiet period and let any pending save fire.
    ///
    /// For one-shot commands whose session ends with the command.
    pub fn settle(&mut self) -> Option<SaveOutcome> {
        let pending = self.pending_save?;
        self.clock.sleep_until(pending.due());
        self.poll_save()
    }

    /// Write a pending save immediately, without waiting for it to come due.
    pub fn flush(&mut self) -> Option<SaveOutcome> {
        self.pending_save.take()?;
        Some(self.write_now())
    }

    fn write_now(&mut self) -> SaveOutcome {
        match self.try_write() {
            Ok(()) => {
                info!(count = self.tasks.len(), "saved task list");
                SaveOutcome::Saved {
                    tasks: self.tasks.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "save failed; keeping in-memory list");
                self.push_notice(Notice::SaveError {
                    reason: e.to_string(),
                });
                SaveOutcome::Failed
            }
        }
    }

    fn try_write(&mut self) -> Result<(), SaveError> {
        let blob = serialize_tasks(&self.tasks)?;
        self.gateway.write(&blob)?;
        Ok(())
    }

    pub fn pending_save(&self) -> Option<&PendingSave> {
        self.pending_save.as_ref()
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    /// When the pending save fires, if there is one
    pub fn next_save_deadline(&self) -> Option<Instant> {
        self.pending_save.map(|p| p.due())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Replace the pending save with one due a full interval from now
    fn schedule_save(&mut self) {
        self.mutation_seq += 1;
        let pending = PendingSave::schedule(self.clock.now(), self.debounce, self.mutation_seq);
        if self.pending_save.replace(pending).is_some() {
            debug!(seq = self.mutation_seq, "pending save rescheduled");
        } else {
            debug!(seq = self.mutation_seq, "save scheduled");
        }
    }

    /// Bookkeeping after any mutation that changed the list
    fn changed(&mut self) {
        self.schedule_save();
        self.publish();
    }

    fn publish(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.snapshot_changed(&self.tasks);
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new task. Blank text is ignored and returns `None`.
    ///
    /// On success the draft input is cleared and a [`Notice::TaskAdded`] is
    /// queued.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() {
            debug!("add ignored: blank text");
            return None;
        }
        let id = self.ids.allocate(&self.tasks, self.clock.wall_millis());
        if let Err(e) = task_ops::add_task(&mut self.tasks, id.clone(), text) {
            debug!(error = %e, "add rejected");
            return None;
        }
        self.draft.clear();
        self.push_notice(Notice::TaskAdded {
            text: text.to_string(),
        });
        self.changed();
        Some(id)
    }

    /// Add the current draft as a new task
    pub fn add_draft(&mut self) -> Option<TaskId> {
        let text = self.draft.clone();
        self.add(&text)
    }

    /// Remove a task. An unknown id leaves the list alone but still re-arms the
    /// pending save. Returns whether a task was removed.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        match task_ops::remove_task(&mut self.tasks, id) {
            Ok(_) => {
                self.changed();
                true
            }
            Err(e) => {
                debug!(error = %e, "remove ignored");
                self.schedule_save();
                false
            }
        }
    }

    /// Flip a task's completed flag. Returns the new value, or `None` for an
    /// unknown id, which still re-arms the pending save.
    pub fn toggle_complete(&mut self, id: &TaskId) -> Option<bool> {
        match task_ops::toggle_complete(&mut self.tasks, id) {
            Ok(completed) => {
                self.changed();
                Some(completed)
            }
            Err(e) => {
                debug!(error = %e, "toggle ignored");
                self.schedule_save();
                None
            }
        }
    }

    /// Stage a task for editing, replacing any edit already staged.
    ///
    /// For an unknown id nothing is staged afterwards. Returns whether an
    /// edit is now staged.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        self.staged_edit = task_ops::find_task(&self.tasks, id).map(|task| StagedEdit {
            id: task.id.clone(),
            text: task.text.clone(),
        });
        self.staged_edit.is_some()
    }

    pub fn staged_edit(&self) -> Option<&StagedEdit> {
        self.staged_edit.as_ref()
    }

    /// Update the working text of the staged edit, if any
    pub fn set_staged_edit_text(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.staged_edit {
            edit.text = text.into();
        }
    }

    /// Replace the staged task's text and end the edit.
    ///
    /// The new text is not checked for emptiness. Without a staged edit this
    /// does nothing. If the staged task is gone only the save is re-armed.
    /// Returns whether a task was changed.
    pub fn commit_edit(&mut self, new_text: impl Into<String>) -> bool {
        let Some(edit) = self.staged_edit.take() else {
            return false;
        };
        match task_ops::set_text(&mut self.tasks, &edit.id, new_text.into()) {
            Ok(()) => {
                self.changed();
                true
            }
            Err(e) => {
                debug!(error = %e, "staged task vanished before commit");
                self.schedule_save();
                false
            }
        }
    }

    /// Commit the staged edit with its working text
    pub fn commit_staged_edit(&mut self) -> bool {
        match self.staged_edit.as_ref().map(|e| e.text.clone()) {
            Some(text) => self.commit_edit(text),
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.staged_edit = None;
    }

    /// Set a task's image reference. An unknown id only re-arms the pending save.
    pub fn attach_image(&mut self, id: &TaskId, image_ref: impl Into<String>) -> bool {
        match task_ops::set_image(&mut self.tasks, id, image_ref.into()) {
            Ok(()) => {
                self.changed();
                true
            }
            Err(e) => {
                debug!(error = %e, "image attach ignored");
                self.schedule_save();
                false
            }
        }
    }

    /// Ask `picker` for an image and attach the first asset it returns.
    ///
    /// No selection leaves the task untouched. A picker failure is reported
    /// as a [`Notice::ImageError`].
    pub fn pick_image(&mut self, id: &TaskId, picker: &mut dyn ImagePicker) -> bool {
        match picker.pick() {
            Ok(Some(assets)) => match assets.into_iter().next() {
                Some(asset) => self.attach_image(id, asset.uri),
                None => false,
            },
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "image pick failed");
                self.push_notice(Notice::ImageError {
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Draft input
    // -----------------------------------------------------------------------

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        task_ops::find_task(&self.tasks, id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks whose text contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&Task> {
        search::search_tasks(&self.tasks, query)
    }

    /// Completed tasks, for the secondary screen
    pub fn completed_view(&self) -> Vec<&Task> {
        search::completed_tasks(&self.tasks)
    }

    // -----------------------------------------------------------------------
    // Notices
    // -----------------------------------------------------------------------

    fn push_notice(&mut self, notice: Notice) {
        if notice.is_error() {
            warn!(%notice, "notice");
        } else {
            info!(%notice, "notice");
        }
        self.notices.push(notice);
    }

    /// Drain queued notices, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::gateway::TASKS_KEY;
    use crate::io::picker::{PickedAsset, PickerError};
    use crate::io::storage::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SAMPLE: &str = r#"[{"key":"1","value":"Task 1","completed":false,"image":null},{"key":"2","value":"Task 2","completed":true,"image":null}]"#;

    fn store_with(backend: &MemoryStore, clock: &ManualClock) -> TaskStore {
        TaskStore::new(
            TaskGateway::new(backend.clone()),
            clock.clone(),
            Duration::from_millis(500),
        )
    }

    fn loaded_sample() -> (TaskStore, MemoryStore, ManualClock) {
        let backend = MemoryStore::with_value(TASKS_KEY, SAMPLE);
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        store.load();
        (store, backend, clock)
    }

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    struct FixedPicker(Result<Option<Vec<PickedAsset>>, ()>);

    impl ImagePicker for FixedPicker {
        fn pick(&mut self) -> Result<Option<Vec<PickedAsset>>, PickerError> {
            self.0
                .clone()
                .map_err(|_| PickerError::Missing("/gone.png".into()))
        }
    }

    fn asset(uri: &str) -> PickedAsset {
        PickedAsset { uri: uri.into() }
    }

    // --- load ---

    #[test]
    fn load_missing_is_empty_without_notice() {
        let backend = MemoryStore::new();
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        assert!(matches!(store.load(), LoadOutcome::Missing));
        assert!(store.is_empty());
        assert!(store.take_notices().is_empty());
        assert!(!store.has_pending_save());
    }

    #[test]
    fn load_reads_stored_list() {
        let (mut store, _, _) = loaded_sample();
        assert_eq!(texts(&store), vec!["Task 1", "Task 2"]);
        assert!(store.tasks()[1].completed);
        assert!(store.take_notices().is_empty());
    }

    #[test]
    fn load_malformed_reports_and_starts_empty() {
        let backend = MemoryStore::with_value(TASKS_KEY, "{not json");
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        assert!(matches!(
            store.load(),
            LoadOutcome::Failed(LoadError::Corrupt(_))
        ));
        assert!(store.is_empty());
        let notices = store.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(matches!(notices[0], Notice::LoadError { .. }));
    }

    #[test]
    fn load_storage_fault_reports_and_starts_empty() {
        let backend = MemoryStore::with_value(TASKS_KEY, SAMPLE);
        backend.set_fail_reads(true);
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        assert!(matches!(
            store.load(),
            LoadOutcome::Failed(LoadError::Storage(_))
        ));
        assert!(store.is_empty());
        assert!(matches!(
            store.take_notices().as_slice(),
            [Notice::LoadError { .. }]
        ));
    }

    #[test]
    fn load_runs_once() {
        let (mut store, _, _) = loaded_sample();
        store.remove(&TaskId::from("1"));
        assert!(matches!(store.load(), LoadOutcome::AlreadyLoaded));
        assert_eq!(texts(&store), vec!["Task 2"]);
    }

    // --- add ---

    #[test]
    fn add_appends_and_schedules_save() {
        let backend = MemoryStore::new();
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        store.load();

        let id = store.add("Buy milk").unwrap();
        assert_eq!(store.len(), 1);
        let task = &store.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.image_ref.is_none());
        assert!(store.has_pending_save());
        assert_eq!(
            store.take_notices(),
            vec![Notice::TaskAdded {
                text: "Buy milk".into()
            }]
        );
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn add_blank_is_ignored() {
        let (mut store, _, _) = loaded_sample();
        store.set_draft("   ");
        assert!(store.add("").is_none());
        assert!(store.add(" \t ").is_none());
        assert!(store.add_draft().is_none());
        assert_eq!(store.len(), 2);
        assert!(!store.has_pending_save());
        assert!(store.take_notices().is_empty());
        // The draft is only cleared by a successful add
        assert_eq!(store.draft(), "   ");
    }

    #[test]
    fn add_draft_clears_input() {
        let (mut store, _, _) = loaded_sample();
        store.set_draft("Walk dog");
        assert!(store.add_draft().is_some());
        assert_eq!(store.draft(), "");
        assert_eq!(texts(&store), vec!["Task 1", "Task 2", "Walk dog"]);
    }

    #[test]
    fn rapid_adds_get_distinct_ids() {
        let (mut store, _, _) = loaded_sample();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn adds_after_largest_possible_stored_id_stay_distinct() {
        let backend = MemoryStore::with_value(
            TASKS_KEY,
            r#"[{"key":"18446744073709551615","value":"max","completed":false,"image":null}]"#,
        );
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        store.load();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        assert_ne!(a, b);
        assert_ne!(a.as_str(), "18446744073709551615");
        assert_ne!(b.as_str(), "18446744073709551615");
    }

    // --- remove / toggle ---

    #[test]
    fn remove_unknown_id_is_noop() {
        let (mut store, backend, clock) = loaded_sample();
        let log: Rc<RefCell<usize>> = Rc::default();
        let sink = Rc::clone(&log);
        store.subscribe(Box::new(move |_: &[Task]| *sink.borrow_mut() += 1));

        assert!(!store.remove(&TaskId::from("404")));
        assert_eq!(texts(&store), vec!["Task 1", "Task 2"]);
        assert_eq!(
            store.next_save_deadline(),
            Some(clock.now() + Duration::from_millis(500))
        );
        assert!(store.take_notices().is_empty());
        // Only the snapshot on subscribe
        assert_eq!(*log.borrow(), 1);

        clock.advance_ms(500);
        assert_eq!(store.poll_save(), Some(SaveOutcome::Saved { tasks: 2 }));
        assert_eq!(backend.value(TASKS_KEY).as_deref(), Some(SAMPLE));
    }

    #[test]
    fn unknown_id_rearms_pending_save() {
        let (mut store, backend, clock) = loaded_sample();
        store.toggle_complete(&TaskId::from("1"));
        clock.advance_ms(400);
        assert_eq!(store.toggle_complete(&TaskId::from("404")), None);
        assert_eq!(
            store.next_save_deadline(),
            Some(clock.now() + Duration::from_millis(500))
        );
        clock.advance_ms(400);
        store.poll_save();
        assert_eq!(backend.write_count(), 0);
        clock.advance_ms(100);
        store.poll_save();
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn toggle_twice_restores() {
        let (mut store, _, _) = loaded_sample();
        let id = TaskId::from("1");
        assert_eq!(store.toggle_complete(&id), Some(true));
        assert_eq!(store.toggle_complete(&id), Some(false));
        assert!(!store.task(&id).unwrap().completed);
        assert_eq!(store.toggle_complete(&TaskId::from("404")), None);
    }

    // --- edit ---

    #[test]
    fn edit_commit_replaces_text() {
        let (mut store, _, _) = loaded_sample();
        let id = TaskId::from("1");
        assert!(store.begin_edit(&id));
        assert_eq!(store.staged_edit().unwrap().text, "Task 1");
        assert!(store.commit_edit("Edited Task"));
        assert!(store.staged_edit().is_none());
        assert_eq!(texts(&store), vec!["Edited Task", "Task 2"]);
        assert!(store.has_pending_save());
    }

    #[test]
    fn edit_commit_allows_empty_text() {
        let (mut store, _, _) = loaded_sample();
        store.begin_edit(&TaskId::from("2"));
        assert!(store.commit_edit(""));
        assert_eq!(texts(&store), vec!["Task 1", ""]);
    }

    #[test]
    fn commit_without_staged_edit_is_noop() {
        let (mut store, _, _) = loaded_sample();
        assert!(!store.commit_edit("nothing"));
        assert!(!store.commit_staged_edit());
        assert_eq!(texts(&store), vec!["Task 1", "Task 2"]);
        assert!(!store.has_pending_save());
    }

    #[test]
    fn begin_edit_replaces_previous_and_unknown_clears() {
        let (mut store, _, _) = loaded_sample();
        store.begin_edit(&TaskId::from("1"));
        store.set_staged_edit_text("unsaved");
        store.begin_edit(&TaskId::from("2"));
        let staged = store.staged_edit().unwrap();
        assert_eq!(staged.id, TaskId::from("2"));
        assert_eq!(staged.text, "Task 2");
        assert_eq!(texts(&store), vec!["Task 1", "Task 2"]);

        assert!(!store.begin_edit(&TaskId::from("404")));
        assert!(store.staged_edit().is_none());
    }

    #[test]
    fn cancel_edit_discards() {
        let (mut store, _, _) = loaded_sample();
        store.begin_edit(&TaskId::from("1"));
        store.set_staged_edit_text("changed");
        store.cancel_edit();
        assert!(store.staged_edit().is_none());
        assert_eq!(texts(&store), vec!["Task 1", "Task 2"]);
        assert!(!store.has_pending_save());
    }

    #[test]
    fn commit_after_task_removed_only_clears_edit() {
        let (mut store, backend, clock) = loaded_sample();
        store.begin_edit(&TaskId::from("1"));
        store.remove(&TaskId::from("1"));
        clock.advance_ms(600);
        store.poll_save();
        assert!(!store.commit_staged_edit());
        assert!(store.staged_edit().is_none());
        assert_eq!(texts(&store), vec!["Task 2"]);
        assert_eq!(
            store.next_save_deadline(),
            Some(clock.now() + Duration::from_millis(500))
        );
        assert_eq!(backend.write_count(), 1);
    }

    // --- images ---

    #[test]
    fn pick_image_attaches_first_asset() {
        let (mut store, _, _) = loaded_sample();
        let id = TaskId::from("2");
        let mut picker = FixedPicker(Ok(Some(vec![asset("file:///a.jpg"), asset("file:///b.jpg")])));
        assert!(store.pick_image(&id, &mut picker));
        assert_eq!(store.task(&id).unwrap().image_ref.as_deref(), Some("file:///a.jpg"));
        assert!(store.has_pending_save());
    }

    #[test]
    fn pick_image_without_selection_is_noop() {
        let (mut store, _, _) = loaded_sample();
        let id = TaskId::from("1");
        assert!(!store.pick_image(&id, &mut FixedPicker(Ok(None))));
        assert!(!store.pick_image(&id, &mut FixedPicker(Ok(Some(vec![])))));
        assert!(store.task(&id).unwrap().image_ref.is_none());
        assert!(!store.has_pending_save());
        assert!(store.take_notices().is_empty());
    }

    #[test]
    fn pick_image_failure_is_a_notice() {
        let (mut store, _, _) = loaded_sample();
        assert!(!store.pick_image(&TaskId::from("1"), &mut FixedPicker(Err(()))));
        assert!(matches!(
            store.take_notices().as_slice(),
            [Notice::ImageError { .. }]
        ));
    }

    #[test]
    fn attach_image_unknown_id_is_noop() {
        let (mut store, _, clock) = loaded_sample();
        assert!(!store.attach_image(&TaskId::from("404"), "file:///x.png"));
        assert!(store.tasks().iter().all(|t| t.image_ref.is_none()));
        assert_eq!(
            store.next_save_deadline(),
            Some(clock.now() + Duration::from_millis(500))
        );
    }

    // --- queries ---

    #[test]
    fn mutations_are_visible_to_next_read() {
        let (mut store, _, _) = loaded_sample();
        store.add("Buy bread");
        assert_eq!(store.search("bread").len(), 1);
        store.toggle_complete(&TaskId::from("1"));
        let done: Vec<&str> = store
            .completed_view()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(done, vec!["Task 1", "Task 2"]);
    }

    // --- debounce ---

    #[test]
    fn save_fires_after_quiet_interval() {
        let (mut store, backend, clock) = loaded_sample();
        store.toggle_complete(&TaskId::from("1"));
        clock.advance_ms(499);
        assert_eq!(store.poll_save(), None);
        assert_eq!(backend.write_count(), 0);

        clock.advance_ms(1);
        assert_eq!(store.poll_save(), Some(SaveOutcome::Saved { tasks: 2 }));
        assert_eq!(backend.write_count(), 1);
        assert!(!store.has_pending_save());
        assert_eq!(store.poll_save(), None);
    }

    #[test]
    fn burst_of_mutations_coalesces_into_one_write() {
        let (mut store, backend, clock) = loaded_sample();
        store.add("a");
        clock.advance_ms(300);
        store.poll_save();
        store.add("b");
        clock.advance_ms(300);
        store.poll_save();
        store.remove(&TaskId::from("1"));
        clock.advance_ms(300);
        store.poll_save();
        assert_eq!(backend.write_count(), 0);

        clock.advance_ms(200);
        store.poll_save();
        assert_eq!(backend.write_count(), 1);
        let saved = parse_tasks(&backend.value(TASKS_KEY).unwrap()).unwrap();
        assert_eq!(saved, store.tasks());
    }

    #[test]
    fn each_mutation_pushes_deadline_back() {
        let (mut store, _, clock) = loaded_sample();
        store.add("a");
        let first = store.next_save_deadline().unwrap();
        let first_seq = store.pending_save().unwrap().seq();
        clock.advance_ms(100);
        store.add("b");
        let second = store.next_save_deadline().unwrap();
        assert_eq!(second - first, Duration::from_millis(100));
        assert!(store.pending_save().unwrap().seq() > first_seq);
    }

    #[test]
    fn failed_save_keeps_memory_and_reports() {
        let (mut store, backend, clock) = loaded_sample();
        backend.set_fail_writes(true);
        store.add("survives");
        store.take_notices();
        clock.advance_ms(500);
        assert_eq!(store.poll_save(), Some(SaveOutcome::Failed));
        assert_eq!(texts(&store), vec!["Task 1", "Task 2", "survives"]);
        assert!(matches!(
            store.take_notices().as_slice(),
            [Notice::SaveError { .. }]
        ));
        // No automatic retry
        assert!(!store.has_pending_save());
        clock.advance_ms(5_000);
        assert_eq!(store.poll_save(), None);

        // The next mutation's save is the recovery path
        backend.set_fail_writes(false);
        store.toggle_complete(&TaskId::from("1"));
        clock.advance_ms(500);
        assert_eq!(store.poll_save(), Some(SaveOutcome::Saved { tasks: 3 }));
    }

    #[test]
    fn settle_waits_for_pending_save() {
        let (mut store, backend, clock) = loaded_sample();
        let start = clock.now();
        store.add("a");
        assert_eq!(store.settle(), Some(SaveOutcome::Saved { tasks: 3 }));
        assert_eq!(clock.now() - start, Duration::from_millis(500));
        assert_eq!(backend.write_count(), 1);
        assert_eq!(store.settle(), None);
    }

    #[test]
    fn flush_writes_immediately() {
        let (mut store, backend, _) = loaded_sample();
        assert_eq!(store.flush(), None);
        store.add("a");
        assert_eq!(store.flush(), Some(SaveOutcome::Saved { tasks: 3 }));
        assert_eq!(backend.write_count(), 1);
        assert!(!store.has_pending_save());
    }

    #[test]
    fn dropping_store_loses_pending_save() {
        let (mut store, backend, _) = loaded_sample();
        store.add("never saved");
        drop(store);
        assert_eq!(backend.write_count(), 0);
        assert_eq!(backend.value(TASKS_KEY).as_deref(), Some(SAMPLE));
    }

    // --- observers ---

    #[test]
    fn observers_see_load_and_changes() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let backend = MemoryStore::with_value(TASKS_KEY, SAMPLE);
        let clock = ManualClock::new();
        let mut store = store_with(&backend, &clock);
        let sink = Rc::clone(&seen);
        store.subscribe(Box::new(move |tasks: &[Task]| sink.borrow_mut().push(tasks.len())));

        store.load();
        store.add("a");
        store.remove(&TaskId::from("404"));
        store.remove(&TaskId::from("1"));
        assert_eq!(*seen.borrow(), vec![0, 2, 3, 2]);
    }
}
