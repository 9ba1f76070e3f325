use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// One task, in the same layout the list is stored in
#[derive(Serialize)]
pub struct TaskJson<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub completed: bool,
    pub image: Option<&'a str>,
}

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub count: usize,
    pub tasks: Vec<TaskJson<'a>>,
}

/// Result of a mutating command
#[derive(Serialize)]
pub struct ChangeJson<'a> {
    pub action: &'a str,
    pub id: &'a str,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskJson<'a>>,
}

pub fn task_to_json(task: &Task) -> TaskJson<'_> {
    TaskJson {
        key: task.id.as_str(),
        value: &task.text,
        completed: task.completed,
        image: task.image_ref.as_deref(),
    }
}

pub fn task_list_json<'a>(tasks: &[&'a Task]) -> TaskListJson<'a> {
    TaskListJson {
        count: tasks.len(),
        tasks: tasks.iter().map(|&t| task_to_json(t)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

fn check_char(task: &Task) -> char {
    if task.completed { 'x' } else { ' ' }
}

/// `[x] 1700000000000 Buy milk  @file:///photo.jpg`
pub fn format_task_line(task: &Task) -> String {
    let image = task
        .image_ref
        .as_ref()
        .map(|uri| format!("  @{}", uri))
        .unwrap_or_default();
    format!("[{}] {} {}{}", check_char(task), task.id, task.text, image)
}
