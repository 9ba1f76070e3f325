use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

/// Render the view tabs with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let tabs = [
        (View::Tasks, "Tasks", app.store.len()),
        (View::Completed, "Completed", app.store.completed_view().len()),
    ];

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled("\u{2713}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
    ];
    for (view, name, count) in tabs {
        let style = if app.view == view {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        spans.push(Span::styled(format!(" {} ({}) ", name, count), style));
        spans.push(sep.clone());
    }

    let tab_row = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(Line::from(spans)).style(app.theme.base()), tab_row);

    if area.height > 1 {
        let sep_row = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        let rule = "\u{2500}".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(rule, app.theme.dimmed())),
            sep_row,
        );
    }
}
