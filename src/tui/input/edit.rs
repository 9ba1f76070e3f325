use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::io::picker::PathPicker;
use crate::tui::app::{App, Mode};

use super::{LineKey, edit_line};

/// Typing a new task. The text lives in the store's draft.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match edit_line(app, key) {
        LineKey::Submit => {
            if app.store.add_draft().is_some() {
                app.input.clear();
                app.mode = Mode::Navigate;
                // Select the new task, which is always last
                app.search_query.clear();
                app.move_cursor(isize::MAX);
            }
        }
        LineKey::Cancel => app.mode = Mode::Navigate,
        LineKey::Changed => app.store.set_draft(app.input.text()),
        LineKey::Moved | LineKey::Ignored => {}
    }
}

/// Edit dialog for the staged task
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match edit_line(app, key) {
        LineKey::Submit => {
            app.store.commit_staged_edit();
            close_prompt(app);
        }
        LineKey::Cancel => {
            app.store.cancel_edit();
            close_prompt(app);
        }
        LineKey::Changed => app.store.set_staged_edit_text(app.input.text()),
        LineKey::Moved | LineKey::Ignored => {}
    }
}

/// Path prompt for attaching an image to the selected task
pub(super) fn handle_image(app: &mut App, key: KeyEvent) {
    match edit_line(app, key) {
        LineKey::Submit => {
            if let Some(id) = app.selected_id() {
                let mut picker = PathPicker::relative_to(app.input.text(), &app.image_base);
                app.store.pick_image(&id, &mut picker);
                app.collect_notices(Instant::now());
            }
            close_prompt(app);
        }
        LineKey::Cancel => close_prompt(app),
        LineKey::Changed | LineKey::Moved | LineKey::Ignored => {}
    }
}

fn close_prompt(app: &mut App) {
    app.input.clear();
    app.mode = Mode::Navigate;
}
