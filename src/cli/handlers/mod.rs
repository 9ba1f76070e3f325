mod init;
pub use init::cmd_init;

use std::error::Error;
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::gateway::TaskGateway;
use crate::io::picker::PathPicker;
use crate::io::widget::FileWidgetBridge;
use crate::model::config::AppConfig;
use crate::model::task::{Task, TaskId};
use crate::store::{LoadOutcome, Notice, SaveOutcome, TaskStore};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let json = cli.json;

    match cli.command {
        // The TUI is launched from main.rs
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(args, data_dir),

            // Read commands
            Commands::List(args) => cmd_list(args, data_dir, json),
            Commands::Search(args) => cmd_search(args, data_dir, json),
            Commands::Config(cmd) => match cmd.action {
                ConfigAction::Show => cmd_config_show(data_dir, json),
                ConfigAction::Set { key, value } => cmd_config_set(data_dir, &key, &value),
            },

            // Write commands
            Commands::Add(args) => cmd_add(args, data_dir, json),
            Commands::Rm(args) => cmd_rm(args, data_dir, json),
            Commands::Toggle(args) => cmd_toggle(args, data_dir, json),
            Commands::Edit(args) => cmd_edit(args, data_dir, json),
            Commands::Image(args) => cmd_image(args, data_dir, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_store(data_dir: &Path, config: &AppConfig) -> TaskStore {
    TaskStore::from_config(TaskGateway::open(data_dir), &config.store)
}

/// Load the list for reading. An unreadable list is reported and read as empty.
fn open_for_read(data_dir: &Path) -> Result<TaskStore, Box<dyn Error>> {
    let config = config_io::read_config(data_dir)?;
    let mut store = new_store(data_dir, &config);
    store.load();
    report_notices(&mut store, false);
    Ok(store)
}

/// Load the list for a mutation.
///
/// Refuses to continue if the stored list could not be read, so the next
/// save cannot replace it with an empty list.
fn open_for_write(data_dir: &Path) -> Result<TaskStore, Box<dyn Error>> {
    let config = config_io::read_config(data_dir)?;
    let mut store = new_store(data_dir, &config);
    // The store itself still starts empty on a failed load; only the CLI refuses
    if let LoadOutcome::Failed(e) = store.load() {
        return Err(format!("could not load tasks: {} (nothing was changed)", e).into());
    }
    if config.widget.enabled {
        store.subscribe(Box::new(FileWidgetBridge::new(data_dir)));
    }
    Ok(store)
}

/// Let the pending save complete, then report what happened.
fn finish(mut store: TaskStore, json: bool) -> Result<(), Box<dyn Error>> {
    let outcome = store.settle();
    report_notices(&mut store, json);
    match outcome {
        Some(SaveOutcome::Failed) => Err("task list was not saved".into()),
        _ => Ok(()),
    }
}

/// Print queued notices: confirmations to stdout, problems to stderr.
fn report_notices(store: &mut TaskStore, json: bool) {
    for notice in store.take_notices() {
        if notice.is_error() {
            eprintln!("{}", notice);
        } else if !json {
            println!("{}", notice);
        }
    }
}

fn print_change(store: &TaskStore, action: &str, id: &TaskId, changed: bool, json: bool) {
    if json {
        let change = ChangeJson {
            action,
            id: id.as_str(),
            changed,
            task: store.task(id).map(task_to_json),
        };
        if let Ok(text) = serde_json::to_string_pretty(&change) {
            println!("{}", text);
        }
    } else if !changed {
        eprintln!("no task with id {}", id);
    }
}

fn print_tasks(tasks: &[&Task], json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&task_list_json(tasks))?);
    } else {
        for task in tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = open_for_read(data_dir)?;
    let tasks = if args.completed {
        store.completed_view()
    } else {
        store.tasks().iter().collect()
    };
    print_tasks(&tasks, json)
}

fn cmd_search(args: SearchArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = open_for_read(data_dir)?;
    let hits = store.search(&args.query);
    print_tasks(&hits, json)
}

fn cmd_config_show(data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let config = config_io::read_config(data_dir)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

fn cmd_config_set(data_dir: &Path, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut doc = config_io::read_config_doc(data_dir)?;
    config_io::set_config_value(&mut doc, key, value)?;
    config_io::write_config_doc(data_dir, &doc)?;
    println!("{} = {}", key, value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_for_write(data_dir)?;
    let id = store
        .add(&args.text)
        .ok_or("task text cannot be empty")?;
    if json {
        print_change(&store, "add", &id, true, json);
    }
    finish(store, json)
}

fn cmd_rm(args: IdArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_for_write(data_dir)?;
    let id = TaskId::new(args.id);
    let removed = store.remove(&id);
    print_change(&store, "rm", &id, removed, json);
    if removed && !json {
        println!("{} removed", id);
    }
    finish(store, json)
}

fn cmd_toggle(args: IdArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_for_write(data_dir)?;
    let id = TaskId::new(args.id);
    let completed = store.toggle_complete(&id);
    print_change(&store, "toggle", &id, completed.is_some(), json);
    if !json {
        match completed {
            Some(true) => println!("{} done", id),
            Some(false) => println!("{} not done", id),
            None => {}
        }
    }
    finish(store, json)
}

fn cmd_edit(args: EditArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_for_write(data_dir)?;
    let id = TaskId::new(args.id);
    let changed = store.begin_edit(&id) && store.commit_edit(args.text);
    print_change(&store, "edit", &id, changed, json);
    if changed && !json {
        println!("{} text updated", id);
    }
    finish(store, json)
}

fn cmd_image(args: ImageArgs, data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_for_write(data_dir)?;
    let id = TaskId::new(args.id);
    if store.task(&id).is_none() {
        print_change(&store, "image", &id, false, json);
        return Ok(());
    }

    let mut picker = PathPicker::new(args.path);
    let attached = store.pick_image(&id, &mut picker);
    let notices = store.take_notices();
    if let Some(problem) = notices.iter().find(|n| matches!(n, Notice::ImageError { .. })) {
        return Err(problem.to_string().into());
    }
    if !attached {
        return Err("no image path given".into());
    }

    print_change(&store, "image", &id, true, json);
    if !json {
        println!("{} image attached", id);
    }
    finish(store, json)
}
