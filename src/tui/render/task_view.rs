use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::App;
use crate::util::text::{display_width, truncate_to_width};

use super::{highlighted_spans, scroll_into_view};

const IMAGE_MARK: &str = " \u{25A3}";

/// Render the main task list
pub fn render_task_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height as usize;
    let cursor = app.cursor();
    scroll_into_view(&mut app.tasks_scroll, cursor, height);

    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let message = if app.active_query().is_empty() {
            "No tasks yet. Press a to add one.".to_string()
        } else {
            format!("No tasks match \"{}\"", app.active_query())
        };
        let line = Line::from(Span::styled(format!("  {}", message), app.theme.dimmed()));
        frame.render_widget(Paragraph::new(line).style(app.theme.base()), area);
        return;
    }

    let re = app.active_search_re();
    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(app.tasks_scroll)
        .take(height)
        .map(|(i, task)| task_line(app, task, i == cursor, re.as_ref(), area.width as usize))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(app.theme.base()), area);
}

fn task_line(
    app: &App,
    task: &Task,
    selected: bool,
    re: Option<&regex::Regex>,
    width: usize,
) -> Line<'static> {
    let theme = &app.theme;
    let row = if selected { theme.selected() } else { theme.base() };
    let text_style = if task.completed {
        row.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        row
    };
    let check_style = if task.completed { row.fg(theme.done) } else { row };

    let mut spans = vec![
        Span::styled(if selected { "\u{25B8}" } else { " " }, row.fg(theme.highlight)),
        Span::styled(if task.completed { "[x] " } else { "[ ] " }, check_style),
    ];

    let mark = if task.has_image() { IMAGE_MARK } else { "" };
    let used = 5 + display_width(mark);
    let text = truncate_to_width(&task.text, width.saturating_sub(used));
    let hit = theme.search_match().add_modifier(Modifier::BOLD);
    spans.extend(highlighted_spans(&text, re, text_style, hit));

    if !mark.is_empty() {
        spans.push(Span::styled(mark, row.fg(theme.highlight)));
    }

    let filled: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if selected && filled < width {
        spans.push(Span::styled(" ".repeat(width - filled), row));
    }
    Line::from(spans)
}
