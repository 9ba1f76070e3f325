use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::app::App;

/// Centered box for editing the staged task's text
pub fn render_edit_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width.saturating_sub(4).min(64);
    let height = 3.min(area.height);
    if width < 4 || height < 3 {
        return;
    }
    let dialog = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit task ")
        .border_style(Style::default().fg(theme.highlight).bg(theme.background))
        .style(theme.base());
    let inner = block.inner(dialog);

    // Keep the cursor visible when the text is wider than the box
    let text = app.input.text();
    let cursor_col = app.input.cursor_col();
    let room = inner.width as usize;
    let skip_cols = (cursor_col + 1).saturating_sub(room);
    let visible: String = {
        let mut col = 0;
        text.chars()
            .filter(|c| {
                let w = UnicodeWidthChar::width(*c).unwrap_or(0);
                let keep = col >= skip_cols;
                col += w;
                keep
            })
            .collect()
    };

    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            visible,
            Style::default().fg(theme.text_bright).bg(theme.background),
        )))
        .block(block),
        dialog,
    );

    let x = inner.x as usize + cursor_col - skip_cols;
    frame.set_cursor_position(Position::new(x as u16, inner.y));
}
