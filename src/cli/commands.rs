use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("[x] tasklist v", env!("CARGO_PKG_VERSION"), " - a to-do list with pictures"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and a config template
    Init(InitArgs),
    /// List tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Mark a task done, or not done
    Toggle(IdArgs),
    /// Replace a task's text
    Edit(EditArgs),
    /// Attach an image file to a task
    Image(ImageArgs),
    /// Find tasks containing some text (case-insensitive)
    Search(SearchArgs),
    /// Show or change configuration
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only completed tasks
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: String,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct ImageArgs {
    /// Task id
    pub id: String,
    /// Path to the image file
    pub path: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set one value, e.g. `store.debounce_ms 250`
    Set {
        /// Dotted key: section.key or ui.colors.<slot>
        key: String,
        value: String,
    },
}
