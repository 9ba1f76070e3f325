//! A to-do list with optional photo attachments.
//!
//! [`store::TaskStore`] owns the list and persists it, debounced, as one JSON
//! blob under the `tasks` key. The `tl` binary puts a CLI and a terminal UI
//! on top of it.

pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod parse;
pub mod store;
pub mod tui;
pub mod util;
