use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};
use crate::util::text::display_width;

const TASK_HINTS: &str = "a add  e edit  x done  d del  i image  / find  q quit";
const COMPLETED_HINTS: &str = "j/k move  / find  Tab tasks  q quit";

/// Render the status row (bottom of screen): prompts, toasts, key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width as usize;

    let prompt = match app.mode {
        Mode::Add => Some(("+ ", "Enter add  Esc cancel")),
        Mode::Image => Some(("image: ", "Enter attach  Esc cancel")),
        Mode::Search => Some(("/", "Enter search  Esc clear")),
        Mode::Edit | Mode::Navigate => None,
    };

    let (left, hint) = if let Some((label, hint)) = prompt {
        let spans = vec![
            Span::styled(label, Style::default().fg(theme.highlight).bg(theme.background)),
            Span::styled(
                app.input.text().to_string(),
                Style::default().fg(theme.text_bright).bg(theme.background),
            ),
        ];
        let x = area.x as usize + display_width(label) + app.input.cursor_col();
        if x < (area.x + area.width) as usize {
            frame.set_cursor_position(Position::new(x as u16, area.y));
        }
        (spans, Some(hint))
    } else if let Some(toast) = &app.toast {
        let color = if toast.is_error { theme.error } else { theme.done };
        let spans = vec![Span::styled(
            toast.text.clone(),
            Style::default().fg(color).bg(theme.background),
        )];
        (spans, None)
    } else if app.mode == Mode::Edit {
        (Vec::new(), Some("Enter save  Esc cancel"))
    } else {
        let mut spans = Vec::new();
        if !app.search_query.is_empty() {
            spans.push(Span::styled(format!("/{}", app.search_query), theme.dimmed()));
        }
        let hints = match app.view {
            View::Tasks => TASK_HINTS,
            View::Completed => COMPLETED_HINTS,
        };
        (spans, app.show_key_hints.then_some(hints))
    };

    let mut spans = left;
    if let Some(hint) = hint {
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint);
        if used + hint_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - hint_width),
                Style::default().bg(theme.background),
            ));
            spans.push(Span::styled(hint, theme.dimmed()));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
}
