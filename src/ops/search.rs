use regex::Regex;

use crate::model::task::Task;

/// Tasks whose text contains `query`, ignoring case, in list order.
///
/// An empty query matches every task.
pub fn search_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    if query.is_empty() {
        return tasks.iter().collect();
    }
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.text.to_lowercase().contains(&needle))
        .collect()
}

/// Completed tasks, in list order.
pub fn completed_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.completed).collect()
}

/// Case-insensitive literal regex for highlighting `query` in rendered text.
/// Returns `None` for an empty query.
pub fn highlight_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}
