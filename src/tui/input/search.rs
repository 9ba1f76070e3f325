use crossterm::event::KeyEvent;

use crate::tui::app::{App, Mode};

use super::{LineKey, edit_line};

/// The task view filters live as the query is typed
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match edit_line(app, key) {
        LineKey::Submit => {
            app.search_query = app.input.text().to_string();
            finish(app);
        }
        LineKey::Cancel => {
            app.search_query.clear();
            finish(app);
        }
        LineKey::Changed => {
            app.tasks_cursor = 0;
        }
        LineKey::Moved | LineKey::Ignored => {}
    }
}

fn finish(app: &mut App) {
    app.input.clear();
    app.mode = Mode::Navigate;
    app.clamp_cursor();
}
