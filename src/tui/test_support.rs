//! Builders shared by the TUI tests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::time::Duration;

use crate::io::gateway::{TASKS_KEY, TaskGateway};
use crate::io::storage::MemoryStore;
use crate::model::config::AppConfig;
use crate::model::task::{Task, TaskId};
use crate::parse::serialize_tasks;
use crate::store::{ManualClock, TaskStore};
use crate::tui::app::App;
use crate::tui::input::handle_key;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 12;

/// An App over a loaded in-memory list of `(id, text, completed)`
pub fn app_with_tasks(tasks: &[(&str, &str, bool)]) -> (App, MemoryStore, ManualClock) {
    let tasks: Vec<Task> = tasks
        .iter()
        .map(|&(id, text, completed)| {
            let mut task = Task::new(TaskId::from(id), text);
            task.completed = completed;
            task
        })
        .collect();
    let backend = MemoryStore::with_value(TASKS_KEY, &serialize_tasks(&tasks).unwrap());
    let clock = ManualClock::new();
    let mut store = TaskStore::new(
        TaskGateway::new(backend.clone()),
        clock.clone(),
        Duration::from_millis(500),
    );
    store.load();
    (App::new(store, &AppConfig::default()), backend, clock)
}

pub fn press(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}
