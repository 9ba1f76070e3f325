use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, View};
use crate::util::text::TextInput;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.switch_view(),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.move_cursor(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Char('/') => {
            app.input = TextInput::with_text(app.search_query.clone());
            app.mode = Mode::Search;
        }
        KeyCode::Esc => {
            app.search_query.clear();
            app.clamp_cursor();
        }
        _ if app.view == View::Tasks => handle_task_key(app, key),
        _ => {}
    }
}

/// Keys that change tasks; only the task view allows them
fn handle_task_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => {
            app.input = TextInput::with_text(app.store.draft());
            app.mode = Mode::Add;
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = app.selected_id() {
                app.store.toggle_complete(&id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_id() {
                app.store.remove(&id);
                app.clamp_cursor();
            }
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.selected_id()
                && app.store.begin_edit(&id)
                && let Some(staged) = app.store.staged_edit()
            {
                app.input = TextInput::with_text(staged.text.clone());
                app.mode = Mode::Edit;
            }
        }
        KeyCode::Char('i') => {
            if app.selected_task().is_some() {
                app.input = TextInput::new();
                app.mode = Mode::Image;
            }
        }
        _ => {}
    }
}
