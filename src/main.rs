use clap::Parser;
use tada::cli::commands::Cli;
use tada::cli::handlers;
use tada::io::config_io;
use tada::io::paths::DataPaths;
use tada::logging;
use tada::tui::{self, RunConfig};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => run_tui(cli.data_dir.as_deref()),
        Some(_) => {
            logging::init_cli();
            handlers::dispatch(cli)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = handlers::data_root(data_dir)?;
    let config = config_io::read_config(&root)?;

    let paths = DataPaths::new(&root, &config.storage);
    if let Err(e) = logging::init_tui(&paths.log_file()) {
        eprintln!("warning: logging disabled: {}", e);
    }

    tui::run(RunConfig {
        data_dir: root,
        config,
    })
}
