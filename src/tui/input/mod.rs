mod edit;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use edit::{handle_add, handle_edit, handle_image};
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Image => handle_image(app, key),
        Mode::Search => handle_search(app, key),
    }
}

/// What a line-editing key did to the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKey {
    Submit,
    Cancel,
    Changed,
    Moved,
    Ignored,
}

/// Shared single-line editing for every prompt
fn edit_line(app: &mut App, key: KeyEvent) -> LineKey {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let input = &mut app.input;
    match key.code {
        KeyCode::Enter => LineKey::Submit,
        KeyCode::Esc => LineKey::Cancel,
        KeyCode::Char('u') if ctrl => {
            input.kill_to_start();
            LineKey::Changed
        }
        KeyCode::Char('a') if ctrl => {
            input.home();
            LineKey::Moved
        }
        KeyCode::Char('e') if ctrl => {
            input.end();
            LineKey::Moved
        }
        KeyCode::Char(_) if ctrl => LineKey::Ignored,
        KeyCode::Char(c) => {
            input.insert(c);
            LineKey::Changed
        }
        KeyCode::Backspace => {
            input.backspace();
            LineKey::Changed
        }
        KeyCode::Delete => {
            input.delete();
            LineKey::Changed
        }
        KeyCode::Left => {
            input.left();
            LineKey::Moved
        }
        KeyCode::Right => {
            input.right();
            LineKey::Moved
        }
        KeyCode::Home => {
            input.home();
            LineKey::Moved
        }
        KeyCode::End => {
            input.end();
            LineKey::Moved
        }
        _ => LineKey::Ignored,
    }
}
