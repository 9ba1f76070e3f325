use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::text::{display_width, truncate_to_width};

use super::scroll_into_view;

/// Render completed tasks with their image references
pub fn render_completed_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height as usize;
    let width = area.width as usize;
    let cursor = app.cursor();
    scroll_into_view(&mut app.completed_scroll, cursor, height);

    let tasks = app.store.completed_view();
    if tasks.is_empty() {
        let line = Line::from(Span::styled("  Nothing completed yet.", app.theme.dimmed()));
        frame.render_widget(Paragraph::new(line).style(app.theme.base()), area);
        return;
    }

    let theme = &app.theme;
    let mut lines = Vec::new();
    for (i, task) in tasks.iter().enumerate().skip(app.completed_scroll).take(height) {
        let row = if i == cursor { theme.selected() } else { theme.base() };
        let mut spans = vec![Span::styled(" \u{2713} ", row.fg(theme.done))];

        let image = task
            .image_ref
            .as_deref()
            .map(|uri| format!("  {}", uri))
            .unwrap_or_default();
        let text_room = width.saturating_sub(3);
        let text = truncate_to_width(&task.text, text_room);
        let image_room = text_room.saturating_sub(display_width(&text));
        spans.push(Span::styled(text, row));
        if !image.is_empty() && image_room > 2 {
            spans.push(Span::styled(
                truncate_to_width(&image, image_room),
                row.fg(theme.dim),
            ));
        }

        let filled: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if i == cursor && filled < width {
            spans.push(Span::styled(" ".repeat(width - filled), row));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(theme.base()), area);
}
