use std::error::Error;
use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io::{CONFIG_TEMPLATE, config_path};
use crate::io::gateway::TASKS_KEY;
use crate::io::storage::FileStore;

pub fn cmd_init(args: InitArgs, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let config_file = config_path(data_dir);
    if config_file.exists() && !args.force {
        return Err(format!(
            "already initialized: {} exists (use --force to overwrite)",
            config_file.display()
        )
        .into());
    }

    fs::create_dir_all(data_dir)?;
    fs::write(&config_file, CONFIG_TEMPLATE)?;

    println!("Initialized tasklist in {}", data_dir.display());
    println!("  config: {}", config_file.display());
    let tasks_file = FileStore::new(data_dir).path_for(TASKS_KEY);
    if tasks_file.exists() {
        println!("  tasks:  {} (kept)", tasks_file.display());
    }
    Ok(())
}
