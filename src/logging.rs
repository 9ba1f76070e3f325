//! Diagnostic logging setup.
//!
//! The filter comes from `TASKLIST_LOG` (same syntax as `RUST_LOG`). The CLI
//! logs to stderr; the TUI owns the terminal, so it logs to a file in the
//! data directory instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TASKLIST_LOG";
pub const LOG_FILE: &str = "tasklist.log";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Log to stderr at `warn` unless `TASKLIST_LOG` says otherwise.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to `<data_dir>/tasklist.log` at `info` unless `TASKLIST_LOG` says
/// otherwise. If the file cannot be opened, logging stays off.
pub fn init_tui(data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    {
        Ok(file) => file,
        Err(_) => return,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
