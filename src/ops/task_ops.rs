use crate::model::task::{Task, TaskId};

/// Error type for task operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task text cannot be empty")]
    EmptyText,
}

// ---------------------------------------------------------------------------
// Id allocation
// ---------------------------------------------------------------------------

/// Hands out task ids derived from the wall clock.
///
/// An id is the current time in milliseconds unless that would not be
/// strictly greater than every id already issued or present in the list, in
/// which case it is bumped past them. Ids therefore never collide and are
/// never reused within a session, even for rapid adds or a clock that steps
/// backwards.
///
/// Once the numeric range is exhausted (a stored id of `u64::MAX`) ids become
/// `<u64::MAX>-<n>`, skipping any already present.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last_issued: u64,
    overflow_seq: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a task about to be added to `tasks`.
    pub fn allocate(&mut self, tasks: &[Task], now_millis: i64) -> TaskId {
        let candidate = u64::try_from(now_millis).unwrap_or(0);
        let floor = tasks
            .iter()
            .filter_map(|t| t.id.as_number())
            .max()
            .unwrap_or(0)
            .max(self.last_issued);
        let next = if candidate > floor {
            Some(candidate)
        } else {
            floor.checked_add(1)
        };
        match next {
            Some(id) => {
                self.last_issued = id;
                TaskId::new(id.to_string())
            }
            None => self.allocate_past_max(tasks),
        }
    }

    fn allocate_past_max(&mut self, tasks: &[Task]) -> TaskId {
        loop {
            self.overflow_seq += 1;
            let id = TaskId::new(format!("{}-{}", u64::MAX, self.overflow_seq));
            if find_task(tasks, &id).is_none() {
                return id;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Append a new task to the end of the list.
///
/// Text that is empty after trimming is rejected; accepted text is stored
/// exactly as given.
pub fn add_task(tasks: &mut Vec<Task>, id: TaskId, text: &str) -> Result<(), TaskError> {
    if text.trim().is_empty() {
        return Err(TaskError::EmptyText);
    }
    tasks.push(Task::new(id, text));
    Ok(())
}

/// Remove a task, keeping the relative order of the rest. Returns the removed task.
pub fn remove_task(tasks: &mut Vec<Task>, id: &TaskId) -> Result<Task, TaskError> {
    let idx = tasks
        .iter()
        .position(|t| &t.id == id)
        .ok_or_else(|| TaskError::NotFound(id.clone()))?;
    Ok(tasks.remove(idx))
}

/// Flip a task's completed flag. Returns the new value.
pub fn toggle_complete(tasks: &mut [Task], id: &TaskId) -> Result<bool, TaskError> {
    let task = find_task_mut(tasks, id).ok_or_else(|| TaskError::NotFound(id.clone()))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

/// Replace a task's text. Empty text is allowed here.
pub fn set_text(tasks: &mut [Task], id: &TaskId, text: String) -> Result<(), TaskError> {
    let task = find_task_mut(tasks, id).ok_or_else(|| TaskError::NotFound(id.clone()))?;
    task.text = text;
    Ok(())
}

/// Attach (or replace) a task's image reference.
pub fn set_image(tasks: &mut [Task], id: &TaskId, image_ref: String) -> Result<(), TaskError> {
    let task = find_task_mut(tasks, id).ok_or_else(|| TaskError::NotFound(id.clone()))?;
    task.image_ref = Some(image_ref);
    Ok(())
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_task<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|t| &t.id == id)
}

pub fn find_task_mut<'a>(tasks: &'a mut [Task], id: &TaskId) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| &t.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
