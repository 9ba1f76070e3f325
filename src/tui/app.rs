use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;
use tracing::info;

use crate::io::config_io;
use crate::io::gateway::TaskGateway;
use crate::io::widget::FileWidgetBridge;
use crate::model::config::AppConfig;
use crate::model::task::{Task, TaskId};
use crate::ops::search;
use crate::store::{Notice, TaskStore};
use crate::util::text::TextInput;

use super::input;
use super::render;
use super::theme::Theme;

/// How long a notice stays in the status row
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Longest the event loop sleeps between redraws
const MAX_POLL: Duration = Duration::from_millis(250);

/// Which screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every task, filtered by the search query
    Tasks,
    /// Completed tasks only, read-only
    Completed,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the draft line
    Add,
    /// Edit dialog open for the staged task
    Edit,
    /// Prompting for an image path
    Image,
    /// Typing a search query
    Search,
}

/// A notice shown briefly in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub is_error: bool,
    pub expires_at: Instant,
}

pub struct App {
    pub store: TaskStore,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub flush_on_exit: bool,
    /// Base for relative image paths
    pub image_base: PathBuf,
    /// Line editor for whichever prompt is open
    pub input: TextInput,
    /// Committed search query; empty means no filter
    pub search_query: String,
    pub tasks_cursor: usize,
    pub completed_cursor: usize,
    pub tasks_scroll: usize,
    pub completed_scroll: usize,
    pub toast: Option<Toast>,
}

impl App {
    pub fn new(store: TaskStore, config: &AppConfig) -> Self {
        App {
            store,
            view: View::Tasks,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            flush_on_exit: config.store.flush_on_exit,
            image_base: std::env::current_dir().unwrap_or_default(),
            input: TextInput::new(),
            search_query: String::new(),
            tasks_cursor: 0,
            completed_cursor: 0,
            tasks_scroll: 0,
            completed_scroll: 0,
            toast: None,
        }
    }

    /// The query currently filtering the task view. While typing a search it
    /// is the live input.
    pub fn active_query(&self) -> &str {
        if self.mode == Mode::Search {
            self.input.text()
        } else {
            &self.search_query
        }
    }

    /// Case-insensitive highlighter for the active query
    pub fn active_search_re(&self) -> Option<Regex> {
        search::highlight_regex(self.active_query())
    }

    /// Tasks shown in the current view, in list order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.view {
            View::Tasks => self.store.search(self.active_query()),
            View::Completed => self.store.completed_view(),
        }
    }

    pub fn cursor(&self) -> usize {
        match self.view {
            View::Tasks => self.tasks_cursor,
            View::Completed => self.completed_cursor,
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.view {
            View::Tasks => &mut self.tasks_cursor,
            View::Completed => &mut self.completed_cursor,
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor()).copied()
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id.clone())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_tasks().len();
        let cursor = self.cursor_mut();
        *cursor = if len == 0 {
            0
        } else {
            cursor.saturating_add_signed(delta).min(len - 1)
        };
    }

    /// Keep the cursor on a row after the list shrinks
    pub fn clamp_cursor(&mut self) {
        self.move_cursor(0);
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Tasks => View::Completed,
            View::Completed => View::Tasks,
        };
        self.clamp_cursor();
    }

    /// Move queued store notices into the toast slot. The newest wins.
    pub fn collect_notices(&mut self, now: Instant) {
        if let Some(notice) = self.store.take_notices().into_iter().last() {
            self.show_notice(&notice, now);
        }
    }

    pub fn show_notice(&mut self, notice: &Notice, now: Instant) {
        self.toast = Some(Toast {
            text: notice.to_string(),
            is_error: notice.is_error(),
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Housekeeping between events: fire a due save, surface notices, expire
    /// the toast.
    pub fn tick(&mut self, now: Instant) {
        self.store.poll_save();
        self.collect_notices(now);
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }

    /// How long the event loop may block before `tick` has work to do
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        [
            self.store.next_save_deadline(),
            self.toast.as_ref().map(|t| t.expires_at),
        ]
        .into_iter()
        .flatten()
        .map(|deadline| deadline.saturating_duration_since(now))
        .fold(MAX_POLL, Duration::min)
    }

    /// Leave the TUI. A pending save is dropped unless `flush_on_exit` is set.
    pub fn shutdown(&mut self) {
        if self.flush_on_exit {
            self.store.flush();
        } else if self.store.has_pending_save() {
            info!("exiting with an unsaved change pending");
        }
    }
}

fn open_store(data_dir: &Path, config: &AppConfig) -> TaskStore {
    let mut store = TaskStore::from_config(TaskGateway::open(data_dir), &config.store);
    store.load();
    if config.widget.enabled {
        store.subscribe(Box::new(FileWidgetBridge::new(data_dir)));
    }
    store
}

/// Run the TUI against the list in `data_dir`
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config(data_dir)?;
    let store = open_store(data_dir, &config);
    let mut app = App::new(store, &config);
    app.collect_notices(Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
