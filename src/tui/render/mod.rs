pub mod completed_view;
pub mod edit_dialog;
pub mod status_row;
pub mod tab_bar;
pub mod task_view;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode, View};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(app.theme.base()), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Tasks => task_view::render_task_view(frame, app, chunks[1]),
        View::Completed => completed_view::render_completed_view(frame, app, chunks[1]),
    }

    status_row::render_status_row(frame, app, chunks[2]);

    if app.mode == Mode::Edit {
        edit_dialog::render_edit_dialog(frame, app, area);
    }
}

/// Split `text` into spans, styling every match of `re` with `hit`.
pub(super) fn highlighted_spans(
    text: &str,
    re: Option<&Regex>,
    base: Style,
    hit: Style,
) -> Vec<Span<'static>> {
    let Some(re) = re else {
        return vec![Span::styled(text.to_string(), base)];
    };

    let mut spans = Vec::new();
    let mut pos = 0;
    for m in re.find_iter(text).filter(|m| !m.is_empty()) {
        if m.start() > pos {
            spans.push(Span::styled(text[pos..m.start()].to_string(), base));
        }
        spans.push(Span::styled(m.as_str().to_string(), hit));
        pos = m.end();
    }
    if pos < text.len() || spans.is_empty() {
        spans.push(Span::styled(text[pos..].to_string(), base));
    }
    spans
}

/// Adjust `scroll` so that `cursor` is within a window of `height` rows
pub(super) fn scroll_into_view(scroll: &mut usize, cursor: usize, height: usize) {
    if height == 0 {
        return;
    }
    if cursor < *scroll {
        *scroll = cursor;
    } else if cursor >= *scroll + height {
        *scroll = cursor + 1 - height;
    }
}
