use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::io::paths;
use tasklist::logging;

fn main() {
    let cli = Cli::parse();

    let data_dir = match paths::resolve_data_dir(cli.data_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand → launch TUI
        None => {
            logging::init_tui(&data_dir);
            tasklist::tui::run(&data_dir)
        }
        Some(_) => {
            logging::init_cli();
            handlers::dispatch(cli, &data_dir)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
