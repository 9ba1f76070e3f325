use std::collections::HashSet;

use crate::model::task::{Task, TaskId};

/// Error type for decoding a stored task list
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("stored task list is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored task list repeats id {0}")]
    DuplicateId(TaskId),
}

/// Decode the stored blob into a task collection.
///
/// The blob must be a JSON array of task records. A list that repeats an id
/// is rejected rather than silently deduplicated.
pub fn parse_tasks(blob: &str) -> Result<Vec<Task>, CodecError> {
    let tasks: Vec<Task> = serde_json::from_str(blob)?;
    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(&task.id) {
            return Err(CodecError::DuplicateId(task.id.clone()));
        }
    }
    Ok(tasks)
}

/// Encode a task collection as a compact JSON array, in collection order.
pub fn serialize_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(tasks)?)
}
