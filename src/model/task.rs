use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque task identifier.
///
/// Ids issued by this crate are decimal millisecond timestamps, but ids read
/// from storage are accepted verbatim and never reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it is a plain decimal number
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

/// A single to-do item.
///
/// Field names on the wire are fixed (`key`, `value`, `completed`, `image`)
/// so existing stored lists keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "key")]
    pub id: TaskId,
    #[serde(rename = "value")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// URI of the attached image, if any
    #[serde(rename = "image", default)]
    pub image_ref: Option<String>,
}

impl Task {
    /// Create a fresh, incomplete task with no image
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            completed: false,
            image_ref: None,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_ref.is_some()
    }
}
